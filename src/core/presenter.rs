use crate::core::location::{LocationAcquirer, LocationOutcome};
use crate::core::{
    AlertSink, DeviceCoordinate, LocationProvider, Navigator, OrphanageDirectory,
    OrphanageSummary,
};
use crate::domain::model::{Footer, MapRegion, MapView, Marker, Route};
use crate::utils::error::{MapError, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct PresenterOptions {
    pub initial_region: MapRegion,
    /// Center the viewport on the device once a reading is available.
    pub follow_device_location: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    NoData,
    Loaded,
    Refreshed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied(usize),
    /// A fetch issued later already landed; this response was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct ScreenSnapshot {
    pub orphanages: Vec<OrphanageSummary>,
    pub coordinate: DeviceCoordinate,
    pub phase: ScreenPhase,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct ScreenState {
    orphanages: Vec<OrphanageSummary>,
    coordinate: DeviceCoordinate,
    location_acquired: bool,
    mount_generation: u64,
    applied_epoch: u64,
    error_epoch: u64,
    applied_fetches: u64,
    last_error: Option<String>,
}

impl ScreenState {
    fn phase(&self) -> ScreenPhase {
        match self.applied_fetches {
            0 => ScreenPhase::NoData,
            1 => ScreenPhase::Loaded,
            _ => ScreenPhase::Refreshed,
        }
    }
}

/// Owns the map screen state and turns it into a [`MapView`].
///
/// `mount` acquires the device location once; `on_focus` refreshes the
/// orphanage list every time the screen becomes visible. Both may run
/// concurrently against the same instance.
pub struct MapPresenter<D, L, N, A>
where
    D: OrphanageDirectory,
    L: LocationProvider,
    N: Navigator,
    A: AlertSink,
{
    directory: D,
    acquirer: LocationAcquirer<L>,
    navigator: N,
    alerts: A,
    options: PresenterOptions,
    mounted: AtomicBool,
    issued_epoch: AtomicU64,
    state: RwLock<ScreenState>,
}

impl<D, L, N, A> MapPresenter<D, L, N, A>
where
    D: OrphanageDirectory,
    L: LocationProvider,
    N: Navigator,
    A: AlertSink,
{
    pub fn new(directory: D, location: L, navigator: N, alerts: A) -> Self {
        Self::with_options(
            directory,
            location,
            navigator,
            alerts,
            PresenterOptions::default(),
        )
    }

    pub fn with_options(
        directory: D,
        location: L,
        navigator: N,
        alerts: A,
        options: PresenterOptions,
    ) -> Self {
        Self {
            directory,
            acquirer: LocationAcquirer::new(location),
            navigator,
            alerts,
            options,
            mounted: AtomicBool::new(false),
            issued_epoch: AtomicU64::new(0),
            state: RwLock::new(ScreenState::default()),
        }
    }

    /// Runs location acquisition for this mount. Returns `None` when the
    /// screen is already mounted.
    pub async fn mount(&self) -> Option<LocationOutcome> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("Map screen already mounted, skipping location request");
            return None;
        }

        let generation = self.state.read().await.mount_generation;
        let outcome = self.acquirer.acquire(&self.alerts).await;

        if let Some(coordinate) = outcome.coordinate() {
            let mut state = self.state.write().await;
            if state.mount_generation != generation {
                tracing::debug!("Screen was unmounted during location request, dropping reading");
            } else if !state.location_acquired {
                state.coordinate = coordinate;
                state.location_acquired = true;
            }
        }

        Some(outcome)
    }

    /// Drops all screen state; the next `mount` starts from scratch.
    /// Fetches and location reads still in flight are ignored when they land.
    pub async fn unmount(&self) {
        let mut state = self.state.write().await;
        let mount_generation = state.mount_generation + 1;
        *state = ScreenState {
            mount_generation,
            applied_epoch: self.issued_epoch.load(Ordering::SeqCst),
            ..ScreenState::default()
        };
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Refreshes the listing. A failed fetch keeps the current list.
    pub async fn on_focus(&self) -> Result<FetchOutcome> {
        let epoch = self.issued_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Focus gained, fetching orphanages (epoch {})", epoch);

        let result = self.directory.list_orphanages().await;

        let mut state = self.state.write().await;
        match result {
            Ok(orphanages) => {
                if epoch <= state.applied_epoch {
                    tracing::debug!(
                        "Discarding response for epoch {}, epoch {} already applied",
                        epoch,
                        state.applied_epoch
                    );
                    return Ok(FetchOutcome::Superseded);
                }

                let count = orphanages.len();
                state.orphanages = orphanages;
                state.applied_epoch = epoch;
                state.applied_fetches += 1;
                // A later fetch that already failed keeps its error.
                if epoch > state.error_epoch {
                    state.last_error = None;
                }
                tracing::info!("Loaded {} orphanages", count);
                Ok(FetchOutcome::Applied(count))
            }
            Err(e) => {
                tracing::warn!("Failed to refresh orphanages: {}", e);
                if epoch > state.applied_epoch && epoch > state.error_epoch {
                    state.last_error = Some(e.to_string());
                    state.error_epoch = epoch;
                }
                Err(e)
            }
        }
    }

    pub async fn render(&self) -> MapView {
        let state = self.state.read().await;

        let region = if self.options.follow_device_location && state.location_acquired {
            self.options.initial_region.centered_on(state.coordinate)
        } else {
            self.options.initial_region
        };

        MapView {
            region,
            markers: state.orphanages.iter().map(Marker::from).collect(),
            footer: Footer::for_count(state.orphanages.len()),
        }
    }

    pub async fn snapshot(&self) -> ScreenSnapshot {
        let state = self.state.read().await;
        ScreenSnapshot {
            orphanages: state.orphanages.clone(),
            coordinate: state.coordinate,
            phase: state.phase(),
            last_error: state.last_error.clone(),
        }
    }

    pub async fn coordinate(&self) -> DeviceCoordinate {
        self.state.read().await.coordinate
    }

    /// Callout tap on the marker for `id`.
    pub async fn press_callout(&self, id: i64) -> Result<()> {
        let shown = self
            .state
            .read()
            .await
            .orphanages
            .iter()
            .any(|orphanage| orphanage.id == id);

        if !shown {
            return Err(MapError::UnknownOrphanage { id });
        }

        self.navigator.navigate(Route::OrphanageDetails { id })
    }

    pub fn press_create_button(&self) -> Result<()> {
        self.navigator.navigate(Route::SelectMapPosition)
    }
}
