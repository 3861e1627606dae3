pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConsoleAlerts, LoggingNavigator, SimulatedLocation};
pub use config::toml_config::TomlConfig;
pub use core::{
    directory::OrphanageDirectoryFetcher, location::LocationAcquirer, presenter::MapPresenter,
};
pub use domain::model::{
    DeviceCoordinate, MapRegion, MapView, Marker, OrphanageSummary, PermissionStatus,
    PositionReading, Route,
};
pub use utils::error::{MapError, Result};
