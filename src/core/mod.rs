pub mod directory;
pub mod location;
pub mod presenter;

pub use crate::domain::model::{DeviceCoordinate, OrphanageSummary};
pub use crate::domain::ports::{AlertSink, LocationProvider, Navigator, OrphanageDirectory};
pub use crate::utils::error::Result;
