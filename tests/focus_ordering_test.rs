use async_trait::async_trait;
use orphanage_map::core::location::LocationOutcome;
use orphanage_map::core::presenter::{FetchOutcome, ScreenPhase};
use orphanage_map::domain::ports::{AlertSink, LocationProvider, OrphanageDirectory};
use orphanage_map::utils::error::{MapError, Result};
use orphanage_map::{
    DeviceCoordinate, LoggingNavigator, MapPresenter, OrphanageSummary, PermissionStatus,
    PositionReading, SimulatedLocation,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct SilentAlerts;

impl AlertSink for SilentAlerts {
    fn alert(&self, _title: &str, _message: &str) {}
}

fn orphanage(id: i64) -> OrphanageSummary {
    OrphanageSummary {
        id,
        name: format!("Orfanato {}", id),
        latitude: 41.0,
        longitude: -8.6,
    }
}

/// The first call blocks until released; later calls answer immediately.
/// `None` makes the corresponding call fail.
struct GatedDirectory {
    calls: AtomicUsize,
    gate: Arc<Notify>,
    first: Option<Vec<OrphanageSummary>>,
    later: Option<Vec<OrphanageSummary>>,
}

fn unavailable() -> MapError {
    MapError::UnexpectedStatus {
        status: 502,
        url: "http://localhost/orphanages".to_string(),
    }
}

impl GatedDirectory {
    fn new(
        first: Option<Vec<OrphanageSummary>>,
        later: Option<Vec<OrphanageSummary>>,
    ) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: Arc::new(Notify::new()),
            first,
            later,
        }
    }
}

#[async_trait]
impl OrphanageDirectory for GatedDirectory {
    async fn list_orphanages(&self) -> Result<Vec<OrphanageSummary>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
            return self.first.clone().ok_or_else(unavailable);
        }
        self.later.clone().ok_or_else(unavailable)
    }
}

#[tokio::test]
async fn test_older_response_does_not_overwrite_newer() {
    let directory = GatedDirectory::new(
        Some(vec![orphanage(1)]),
        Some(vec![orphanage(1), orphanage(2)]),
    );
    let gate = directory.gate.clone();
    let presenter = MapPresenter::new(
        directory,
        SimulatedLocation::denied(),
        LoggingNavigator::new(),
        SilentAlerts,
    );

    let slow = presenter.on_focus();
    let fast = async {
        let outcome = presenter.on_focus().await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast.unwrap(), FetchOutcome::Applied(2));
    assert_eq!(slow.unwrap(), FetchOutcome::Superseded);

    let ids: Vec<i64> = presenter.render().await.markers.iter().map(|m| m.key).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_older_failure_does_not_mark_newer_data_as_failed() {
    let directory = GatedDirectory::new(None, Some(vec![orphanage(3)]));
    let gate = directory.gate.clone();
    let presenter = MapPresenter::new(
        directory,
        SimulatedLocation::denied(),
        LoggingNavigator::new(),
        SilentAlerts,
    );

    let slow = presenter.on_focus();
    let fast = async {
        let outcome = presenter.on_focus().await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(slow.is_err());
    assert_eq!(fast.unwrap(), FetchOutcome::Applied(1));

    let snapshot = presenter.snapshot().await;
    assert_eq!(snapshot.orphanages, vec![orphanage(3)]);
    assert!(snapshot.last_error.is_none());
}

#[tokio::test]
async fn test_newer_failure_survives_older_success() {
    let directory = GatedDirectory::new(Some(vec![orphanage(4)]), None);
    let gate = directory.gate.clone();
    let presenter = MapPresenter::new(
        directory,
        SimulatedLocation::denied(),
        LoggingNavigator::new(),
        SilentAlerts,
    );

    let slow = presenter.on_focus();
    let fast = async {
        let outcome = presenter.on_focus().await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(fast.is_err());
    assert_eq!(slow.unwrap(), FetchOutcome::Applied(1));

    let snapshot = presenter.snapshot().await;
    assert_eq!(snapshot.orphanages, vec![orphanage(4)]);
    assert!(snapshot.last_error.is_some());
}

#[tokio::test]
async fn test_fetch_from_previous_mount_is_dropped() {
    let directory = GatedDirectory::new(Some(vec![orphanage(1)]), Some(vec![orphanage(2)]));
    let gate = directory.gate.clone();
    let presenter = MapPresenter::new(
        directory,
        SimulatedLocation::denied(),
        LoggingNavigator::new(),
        SilentAlerts,
    );
    presenter.mount().await;

    let in_flight = presenter.on_focus();
    let remount = async {
        presenter.unmount().await;
        presenter.mount().await;
        gate.notify_one();
    };
    let (in_flight, _) = tokio::join!(in_flight, remount);

    assert_eq!(in_flight.unwrap(), FetchOutcome::Superseded);
    let snapshot = presenter.snapshot().await;
    assert_eq!(snapshot.phase, ScreenPhase::NoData);
    assert!(snapshot.orphanages.is_empty());

    assert_eq!(presenter.on_focus().await.unwrap(), FetchOutcome::Applied(1));
    assert_eq!(presenter.snapshot().await.orphanages, vec![orphanage(2)]);
}

/// Grants permission; the first reading blocks until released.
struct GatedLocation {
    reads: AtomicUsize,
    gate: Arc<Notify>,
    first: DeviceCoordinate,
    later: DeviceCoordinate,
}

#[async_trait]
impl LocationProvider for GatedLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<PositionReading> {
        let coords = if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
            self.first
        } else {
            self.later
        };
        Ok(PositionReading {
            coords,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[tokio::test]
async fn test_location_from_previous_mount_is_dropped() {
    let gate = Arc::new(Notify::new());
    let presenter = MapPresenter::new(
        GatedDirectory::new(Some(vec![]), Some(vec![])),
        GatedLocation {
            reads: AtomicUsize::new(0),
            gate: gate.clone(),
            first: DeviceCoordinate::new(10.0, 10.0),
            later: DeviceCoordinate::new(40.0, -8.0),
        },
        LoggingNavigator::new(),
        SilentAlerts,
    );

    let first_mount = presenter.mount();
    let remount = async {
        presenter.unmount().await;
        let outcome = presenter.mount().await;
        gate.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first_mount, remount);

    assert_eq!(
        first,
        Some(LocationOutcome::Acquired(DeviceCoordinate::new(10.0, 10.0)))
    );
    assert_eq!(
        second,
        Some(LocationOutcome::Acquired(DeviceCoordinate::new(40.0, -8.0)))
    );
    assert_eq!(presenter.coordinate().await, DeviceCoordinate::new(40.0, -8.0));
}
