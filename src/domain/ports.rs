use crate::domain::model::{OrphanageSummary, PermissionStatus, PositionReading, Route};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote listing of orphanages.
#[async_trait]
pub trait OrphanageDirectory: Send + Sync {
    async fn list_orphanages(&self) -> Result<Vec<OrphanageSummary>>;
}

/// Platform geolocation service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionStatus>;
    async fn current_position(&self) -> Result<PositionReading>;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route) -> Result<()>;
}

pub trait AlertSink: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}
