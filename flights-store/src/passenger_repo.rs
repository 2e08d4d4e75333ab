use async_trait::async_trait;
use flights_core::repository::PassengerRepository;
use flights_core::{Binding, FlightsError, FlightsResult, Passenger};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::constraints;

pub struct StorePassengerRepository {
    pool: PgPool,
}

impl StorePassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_passengers(
        &self,
        mut query: QueryBuilder<'_, Postgres>,
        context: &'static str,
    ) -> FlightsResult<Vec<Passenger>> {
        query.push(" ORDER BY p.passenger_id");

        let rows: Vec<PassengerRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FlightsError::infrastructure(context, e))?;

        if rows.is_empty() {
            return Err(FlightsError::NothingFound);
        }

        Ok(rows.into_iter().map(Passenger::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    passenger_id: Uuid,
    first_name: String,
    last_name: String,
    middle_name: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.passenger_id,
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
        }
    }
}

fn select_passengers<'args>() -> QueryBuilder<'args, Postgres> {
    QueryBuilder::new(
        "SELECT p.passenger_id, p.first_name, p.last_name, p.middle_name FROM passengers p",
    )
}

#[async_trait]
impl PassengerRepository for StorePassengerRepository {
    async fn create_passenger(&self, passenger: &Passenger) -> FlightsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO passengers (passenger_id, first_name, last_name, middle_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(passenger.id)
        .bind(&passenger.first_name)
        .bind(&passenger.last_name)
        .bind(&passenger.middle_name)
        .execute(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("create passenger", e))?;

        Ok(())
    }

    async fn replace_passenger(&self, passenger: &Passenger) -> FlightsResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE passengers
            SET first_name = $2, last_name = $3, middle_name = $4
            WHERE passenger_id = $1
            "#,
        )
        .bind(passenger.id)
        .bind(&passenger.first_name)
        .bind(&passenger.last_name)
        .bind(&passenger.middle_name)
        .execute(&self.pool)
        .await
        .map_err(|e| FlightsError::infrastructure("replace passenger", e))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToChange);
        }

        Ok(())
    }

    async fn delete_passenger(&self, id: Uuid) -> FlightsResult<()> {
        // Documents and bindings go with the passenger (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM passengers WHERE passenger_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| FlightsError::infrastructure("delete passenger", e))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToDelete);
        }

        Ok(())
    }

    async fn list_passengers(&self) -> FlightsResult<Vec<Passenger>> {
        self.fetch_passengers(select_passengers(), "list passengers").await
    }

    async fn bind_to_ticket(&self, binding: Binding) -> FlightsResult<()> {
        sqlx::query("INSERT INTO passenger_ticket (passenger_id, ticket_id) VALUES ($1, $2)")
            .bind(binding.passenger_id)
            .bind(binding.ticket_id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraints::translate(e, "bind to ticket", constraints::binding_insert))?;

        Ok(())
    }

    async fn unbind_from_ticket(&self, binding: Binding) -> FlightsResult<()> {
        let result =
            sqlx::query("DELETE FROM passenger_ticket WHERE passenger_id = $1 AND ticket_id = $2")
                .bind(binding.passenger_id)
                .bind(binding.ticket_id)
                .execute(&self.pool)
                .await
                .map_err(|e| FlightsError::infrastructure("unbind from ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(FlightsError::NothingToDelete);
        }

        Ok(())
    }

    async fn passengers_by_ticket(&self, ticket_id: Uuid) -> FlightsResult<Vec<Passenger>> {
        let mut query = select_passengers();
        query
            .push(" JOIN passenger_ticket pt ON pt.passenger_id = p.passenger_id")
            .push(" WHERE pt.ticket_id = ")
            .push_bind(ticket_id);

        self.fetch_passengers(query, "passengers by ticket").await
    }
}
