use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flights_core::repository::ReportRepository;
use flights_core::{FlightsError, FlightsResult, PeriodFilter, ReportRow};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct StoreReportRepository {
    pool: PgPool,
}

impl StoreReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReportRowRecord {
    date_of_issue: DateTime<Utc>,
    fly_at: DateTime<Utc>,
    ticket_id: Uuid,
    fly_from: String,
    fly_to: String,
    service_provided: bool,
}

impl From<ReportRowRecord> for ReportRow {
    fn from(row: ReportRowRecord) -> Self {
        ReportRow {
            date_of_issue: row.date_of_issue,
            fly_at: row.fly_at,
            ticket_id: row.ticket_id,
            fly_from: row.fly_from,
            fly_to: row.fly_to,
            service_provided: row.service_provided,
        }
    }
}

/// The two disjoint halves of a passenger report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportBranch {
    /// Issued and arrived by the end of the period.
    Provided,
    /// Issued within the period, arriving after it.
    Pending,
}

/// Appends one `SELECT` of the report union.
pub(crate) fn push_branch(
    query: &mut QueryBuilder<'_, Postgres>,
    branch: ReportBranch,
    passenger_id: Uuid,
    period: &PeriodFilter,
) {
    let service_provided = match branch {
        ReportBranch::Provided => "TRUE",
        ReportBranch::Pending => "FALSE",
    };

    query
        .push("SELECT t.created_at AS date_of_issue, t.fly_at, t.ticket_id, t.fly_from, t.fly_to, ")
        .push(service_provided)
        .push(" AS service_provided")
        .push(" FROM passenger_ticket pt JOIN tickets t ON t.ticket_id = pt.ticket_id")
        .push(" WHERE pt.passenger_id = ")
        .push_bind(passenger_id);

    match branch {
        ReportBranch::Provided => {
            query
                .push(" AND t.created_at <= ")
                .push_bind(period.to)
                .push(" AND t.arrive_at <= ")
                .push_bind(period.to);
        }
        ReportBranch::Pending => {
            query
                .push(" AND t.created_at BETWEEN ")
                .push_bind(period.from)
                .push(" AND ")
                .push_bind(period.to)
                .push(" AND t.arrive_at > ")
                .push_bind(period.to);
        }
    }
}

pub(crate) fn report_query<'args>(
    passenger_id: Uuid,
    period: &PeriodFilter,
) -> QueryBuilder<'args, Postgres> {
    let mut query = QueryBuilder::new("");
    push_branch(&mut query, ReportBranch::Provided, passenger_id, period);
    query.push(" UNION ");
    push_branch(&mut query, ReportBranch::Pending, passenger_id, period);
    query.push(" ORDER BY date_of_issue, ticket_id");
    query
}

#[async_trait]
impl ReportRepository for StoreReportRepository {
    async fn passenger_report(
        &self,
        passenger_id: Uuid,
        period: &PeriodFilter,
    ) -> FlightsResult<Vec<ReportRow>> {
        let mut query = report_query(passenger_id, period);

        let rows: Vec<ReportRowRecord> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FlightsError::infrastructure("passenger report", e))?;

        if rows.is_empty() {
            return Err(FlightsError::NothingFound);
        }

        Ok(rows.into_iter().map(ReportRow::from).collect())
    }
}
