use async_trait::async_trait;
use flights_core::FlightsService;
use flights_store::DbClient;
use std::sync::Arc;

/// Liveness probe for the storage backing the service.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl HealthCheck for DbClient {
    async fn ping(&self) -> anyhow::Result<()> {
        DbClient::ping(self).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FlightsService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(service: FlightsService, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            service: Arc::new(service),
            health,
        }
    }
}
