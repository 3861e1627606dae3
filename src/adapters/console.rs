use crate::core::{AlertSink, DeviceCoordinate, LocationProvider, Navigator};
use crate::domain::model::{PermissionStatus, PositionReading, Route};
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Stands in for the device GPS: a fixed permission answer and an optional fix.
#[derive(Debug, Clone)]
pub struct SimulatedLocation {
    permission: PermissionStatus,
    position: Option<DeviceCoordinate>,
}

impl SimulatedLocation {
    pub fn new(permission: PermissionStatus, position: Option<DeviceCoordinate>) -> Self {
        Self {
            permission,
            position,
        }
    }

    pub fn granted(position: DeviceCoordinate) -> Self {
        Self::new(PermissionStatus::Granted, Some(position))
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied, None)
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<PositionReading> {
        let coords = self.position.ok_or_else(|| MapError::LocationError {
            message: "no simulated position configured".to_string(),
        })?;

        Ok(PositionReading {
            coords,
            timestamp: chrono::Utc::now(),
        })
    }
}

/// Records navigation requests and logs them; stands in for the navigation stack.
#[derive(Debug, Clone, Default)]
pub struct LoggingNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl LoggingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: Route) -> Result<()> {
        tracing::info!(
            "Navigating to {}: {}",
            route.screen_name(),
            serde_json::to_string(&route)?
        );

        self.history
            .lock()
            .map_err(|_| MapError::NavigationError {
                message: "navigation history lock poisoned".to_string(),
            })?
            .push(route);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn alert(&self, title: &str, message: &str) {
        tracing::warn!("Alert shown: {}", title);
        eprintln!("⚠️  {}: {}", title, message);
    }
}
