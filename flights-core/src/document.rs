use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity document kinds accepted for boarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Id card")]
    IdCard,
    #[serde(rename = "International passport")]
    InternationalPassport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Passport,
        DocumentType::IdCard,
        DocumentType::InternationalPassport,
    ];

    /// The stored and serialized spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::IdCard => "Id card",
            DocumentType::InternationalPassport => "International passport",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type: {0}")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
    pub passenger_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
    pub passenger_id: Uuid,
}

impl Document {
    pub fn from_details(id: Uuid, details: DocumentDetails) -> Self {
        Self {
            id,
            doc_type: details.doc_type,
            number: details.number,
            passenger_id: details.passenger_id,
        }
    }
}

/// Document as nested under its owner in an aggregated ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
}
