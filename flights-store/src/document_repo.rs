use async_trait::async_trait;
use flights_core::repository::DocumentRepository;
use flights_core::{Document, DocumentType, FlightsError, FlightsResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::constraints;

pub struct StoreDocumentRepository {
    pool: PgPool,
}

impl StoreDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    document_id: Uuid,
    #[sqlx(rename = "type")]
    doc_type: String,
    number: String,
    passenger_id: Uuid,
}

impl TryFrom<DocumentRow> for Document {
    type Error = FlightsError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let doc_type = row
            .doc_type
            .parse::<DocumentType>()
            .map_err(|e| FlightsError::infrastructure("documents by passenger", e))?;

        Ok(Document {
            id: row.document_id,
            doc_type,
            number: row.number,
            passenger_id: row.passenger_id,
        })
    }
}

#[async_trait]
impl DocumentRepository for StoreDocumentRepository {
    async fn create_document(&self, document: &Document) -> FlightsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (document_id, type, number, passenger_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(document.id)
        .bind(document.doc_type.as_str())
        .bind(&document.number)
        .bind(document.passenger_id)
        .execute(&self.pool)
        .await
        .map_err(|e| constraints::translate(e, "create document", constraints::document_write))?;

        Ok(())
    }

    async fn replace_document(&self, document: &Document) -> FlightsResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET type = $2, number = $3, passenger_id = $4
            WHERE document_id = $1
            "#,
        )
        .bind(document.id)
        .bind(document.doc_type.as_str())
        .bind(&document.number)
        .bind(document.passenger_id)
        .execute(&self.pool)
        .await
        .map_err(|e| constraints::translate(e, "replace document", constraints::document_write))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToChange);
        }

        Ok(())
    }

    async fn delete_document(&self, id: Uuid) -> FlightsResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE document_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| FlightsError::infrastructure("delete document", e))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToDelete);
        }

        Ok(())
    }

    async fn documents_by_passenger(&self, passenger_id: Uuid) -> FlightsResult<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT document_id, type, number, passenger_id
            FROM documents
            WHERE passenger_id = $1
            ORDER BY document_id
            "#,
        )
        .bind(passenger_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("documents by passenger", e))?;

        if rows.is_empty() {
            return Err(FlightsError::NothingFound);
        }

        rows.into_iter().map(Document::try_from).collect()
    }
}
