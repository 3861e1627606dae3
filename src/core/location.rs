use crate::core::{AlertSink, DeviceCoordinate, LocationProvider};

pub const PERMISSION_ALERT_TITLE: &str = "Ops!";
pub const PERMISSION_ALERT_MESSAGE: &str = "Precisamos de sua permissão para obeter a localização";

#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Acquired(DeviceCoordinate),
    /// Denied, undetermined, or the permission request itself failed.
    PermissionDenied,
    /// Permission was granted but no reading could be taken.
    PositionUnavailable(String),
}

impl LocationOutcome {
    pub fn coordinate(&self) -> Option<DeviceCoordinate> {
        match self {
            LocationOutcome::Acquired(coordinate) => Some(*coordinate),
            _ => None,
        }
    }
}

/// Asks the platform for permission and takes one position reading.
pub struct LocationAcquirer<L: LocationProvider> {
    provider: L,
}

impl<L: LocationProvider> LocationAcquirer<L> {
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    pub async fn acquire<A: AlertSink>(&self, alerts: &A) -> LocationOutcome {
        let granted = match self.provider.request_permission().await {
            Ok(status) => {
                tracing::debug!("Location permission status: {:?}", status);
                status.is_granted()
            }
            Err(e) => {
                tracing::debug!("Location permission request failed: {}", e);
                false
            }
        };

        if !granted {
            tracing::info!("Location permission not granted");
            alerts.alert(PERMISSION_ALERT_TITLE, PERMISSION_ALERT_MESSAGE);
            return LocationOutcome::PermissionDenied;
        }

        match self.provider.current_position().await {
            Ok(reading) => {
                tracing::debug!(
                    "Device position {}, {} at {}",
                    reading.coords.latitude,
                    reading.coords.longitude,
                    reading.timestamp
                );
                LocationOutcome::Acquired(reading.coords)
            }
            Err(e) => {
                tracing::warn!("Could not read device position: {}", e);
                LocationOutcome::PositionUnavailable(e.to_string())
            }
        }
    }
}
