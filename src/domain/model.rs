use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FOOTER_SUFFIX: &str = "orfanatos encontrados";
pub const CALLOUT_ANCHOR: (f64, f64) = (2.8, 0.8);

/// One entry of the `/orphanages` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanageSummary {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl DeviceCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// A single reading from the platform geolocation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionReading {
    pub coords: DeviceCoordinate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    fn default() -> Self {
        Self {
            latitude: 40.994851,
            longitude: -8.6447948,
            latitude_delta: 0.008,
            longitude_delta: 0.008,
        }
    }
}

impl MapRegion {
    /// Same zoom level, centered on `coordinate`.
    pub fn centered_on(&self, coordinate: DeviceCoordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            ..*self
        }
    }
}

/// Navigation targets reachable from the map screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params")]
pub enum Route {
    OrphanageDetails { id: i64 },
    SelectMapPosition,
}

impl Route {
    pub fn screen_name(&self) -> &'static str {
        match self {
            Route::OrphanageDetails { .. } => "OrphanageDetails",
            Route::SelectMapPosition => "SelectMapPosition",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: i64,
    pub coordinate: DeviceCoordinate,
    pub title: String,
    pub callout_anchor: (f64, f64),
}

impl From<&OrphanageSummary> for Marker {
    fn from(orphanage: &OrphanageSummary) -> Self {
        Self {
            key: orphanage.id,
            coordinate: DeviceCoordinate::new(orphanage.latitude, orphanage.longitude),
            title: orphanage.name.clone(),
            callout_anchor: CALLOUT_ANCHOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub count: usize,
    pub text: String,
}

impl Footer {
    pub fn for_count(count: usize) -> Self {
        Self {
            count,
            text: format!("{} {}", count, FOOTER_SUFFIX),
        }
    }
}

/// Everything the UI layer needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub region: MapRegion,
    pub markers: Vec<Marker>,
    pub footer: Footer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphanage_deserializes_from_listing_entry() {
        let json = r#"{"id": 3, "name": "Lar Feliz", "latitude": 41.15, "longitude": -8.61}"#;
        let orphanage: OrphanageSummary = serde_json::from_str(json).unwrap();

        assert_eq!(orphanage.id, 3);
        assert_eq!(orphanage.name, "Lar Feliz");
        assert_eq!(orphanage.latitude, 41.15);
    }

    #[test]
    fn test_route_serialization() {
        let details = serde_json::to_value(Route::OrphanageDetails { id: 7 }).unwrap();
        assert_eq!(
            details,
            serde_json::json!({"screen": "OrphanageDetails", "params": {"id": 7}})
        );

        let select = serde_json::to_value(Route::SelectMapPosition).unwrap();
        assert_eq!(select, serde_json::json!({"screen": "SelectMapPosition"}));
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(Footer::for_count(0).text, "0 orfanatos encontrados");
        assert_eq!(Footer::for_count(12).text, "12 orfanatos encontrados");
    }

    #[test]
    fn test_region_centered_on_keeps_deltas() {
        let region = MapRegion::default().centered_on(DeviceCoordinate::new(40.0, -8.0));

        assert_eq!(region.latitude, 40.0);
        assert_eq!(region.longitude, -8.0);
        assert_eq!(region.latitude_delta, 0.008);
    }
}
