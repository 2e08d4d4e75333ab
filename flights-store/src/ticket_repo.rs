use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flights_core::repository::TicketRepository;
use flights_core::{FlightsError, FlightsResult, Ticket, TicketDetails, TicketWholeInfo};
use futures_util::TryStreamExt;
use sqlx::PgPool;
use uuid::Uuid;

use crate::constraints;
use crate::whole_info::{WholeInfoAccumulator, WholeInfoRow, WHOLE_INFO_SQL};

pub struct StoreTicketRepository {
    pool: PgPool,
}

impl StoreTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    ticket_id: Uuid,
    provider: String,
    fly_from: String,
    fly_to: String,
    fly_at: DateTime<Utc>,
    arrive_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.ticket_id,
            provider: row.provider,
            fly_from: row.fly_from,
            fly_to: row.fly_to,
            fly_at: row.fly_at,
            arrive_at: row.arrive_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TicketRepository for StoreTicketRepository {
    async fn create_ticket(&self, ticket: &Ticket) -> FlightsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tickets (ticket_id, provider, fly_from, fly_to, fly_at, arrive_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(ticket.id)
        .bind(&ticket.provider)
        .bind(&ticket.fly_from)
        .bind(&ticket.fly_to)
        .bind(ticket.fly_at)
        .bind(ticket.arrive_at)
        .bind(ticket.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("create ticket", e))?;

        Ok(())
    }

    async fn replace_ticket(&self, id: Uuid, details: &TicketDetails) -> FlightsResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET provider = $2, fly_from = $3, fly_to = $4, fly_at = $5, arrive_at = $6
            WHERE ticket_id = $1
            "#,
        )
        .bind(id)
        .bind(&details.provider)
        .bind(&details.fly_from)
        .bind(&details.fly_to)
        .bind(details.fly_at)
        .bind(details.arrive_at)
        .execute(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("replace ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToChange);
        }

        Ok(())
    }

    async fn delete_ticket(&self, id: Uuid) -> FlightsResult<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE ticket_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraints::translate(e, "delete ticket", constraints::ticket_delete))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToDelete);
        }

        Ok(())
    }

    async fn list_tickets(&self) -> FlightsResult<Vec<Ticket>> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            r#"
            SELECT ticket_id, provider, fly_from, fly_to, fly_at, arrive_at, created_at
            FROM tickets
            ORDER BY created_at, ticket_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("list tickets", e))?;

        if rows.is_empty() {
            return Err(FlightsError::NothingFound);
        }

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn ticket_whole_info(&self, id: Uuid) -> FlightsResult<TicketWholeInfo> {
        let mut rows = sqlx::query_as::<_, WholeInfoRow>(WHOLE_INFO_SQL)
            .bind(id)
            .fetch(&self.pool);

        let mut acc = WholeInfoAccumulator::default();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| FlightsError::infrastructure("ticket whole info", e))?
        {
            acc.push(row)?;
        }

        acc.finish()
    }
}
