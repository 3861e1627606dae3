use crate::adapters::SimulatedLocation;
use crate::core::directory::{OrphanageDirectoryFetcher, DEFAULT_ORPHANAGES_PATH};
use crate::core::presenter::PresenterOptions;
use crate::domain::model::{DeviceCoordinate, MapRegion, PermissionStatus};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub map: Option<MapConfig>,
    pub location: Option<LocationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub orphanages_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            orphanages_path: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub initial_region: Option<MapRegion>,
    pub follow_device_location: Option<bool>,
}

/// Simulated device used by the CLI in place of a real GPS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    pub permission: Option<PermissionStatus>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn orphanages_path(&self) -> &str {
        self.api
            .orphanages_path
            .as_deref()
            .unwrap_or(DEFAULT_ORPHANAGES_PATH)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn initial_region(&self) -> MapRegion {
        self.map
            .as_ref()
            .and_then(|m| m.initial_region)
            .unwrap_or_default()
    }

    pub fn follow_device_location(&self) -> bool {
        self.map
            .as_ref()
            .and_then(|m| m.follow_device_location)
            .unwrap_or(false)
    }

    pub fn presenter_options(&self) -> PresenterOptions {
        PresenterOptions {
            initial_region: self.initial_region(),
            follow_device_location: self.follow_device_location(),
        }
    }

    pub fn directory(&self) -> Result<OrphanageDirectoryFetcher> {
        OrphanageDirectoryFetcher::with_options(
            &self.api.base_url,
            self.orphanages_path(),
            self.request_timeout(),
        )
    }

    /// Without a `[location]` section the simulated device grants permission
    /// but has no fix, so the coordinate stays at its default.
    pub fn simulated_location(&self) -> SimulatedLocation {
        let location = self.location.clone().unwrap_or_default();
        let position = match (location.latitude, location.longitude) {
            (Some(latitude), Some(longitude)) => Some(DeviceCoordinate::new(latitude, longitude)),
            _ => None,
        };

        SimulatedLocation::new(
            location.permission.unwrap_or(PermissionStatus::Granted),
            position,
        )
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_path_segment("api.orphanages_path", self.orphanages_path())?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        let region = self.initial_region();
        validation::validate_latitude("map.initial_region.latitude", region.latitude)?;
        validation::validate_longitude("map.initial_region.longitude", region.longitude)?;
        validation::validate_positive("map.initial_region.latitude_delta", region.latitude_delta)?;
        validation::validate_positive(
            "map.initial_region.longitude_delta",
            region.longitude_delta,
        )?;

        if let Some(location) = &self.location {
            match (location.latitude, location.longitude) {
                (Some(latitude), Some(longitude)) => {
                    validation::validate_latitude("location.latitude", latitude)?;
                    validation::validate_longitude("location.longitude", longitude)?;
                }
                (None, None) => {}
                (Some(_), None) => {
                    return Err(MapError::MissingConfigError {
                        field: "location.longitude".to_string(),
                    })
                }
                (None, Some(_)) => {
                    return Err(MapError::MissingConfigError {
                        field: "location.latitude".to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
