pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::{LocationConfig, MapConfig, TomlConfig};
    use crate::domain::model::PermissionStatus;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "orphanage-map")]
    #[command(about = "Load the orphanage map screen against a backend and print what it shows")]
    pub struct CliConfig {
        #[arg(long, help = "TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Backend base URL (overrides api.base_url)")]
        pub api_url: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Simulated device latitude")]
        pub latitude: Option<f64>,

        #[arg(long, allow_hyphen_values = true, help = "Simulated device longitude")]
        pub longitude: Option<f64>,

        #[arg(long, help = "Simulate a denied location permission")]
        pub deny_location: bool,

        #[arg(long, help = "Center the map on the device location once acquired")]
        pub follow_location: bool,

        #[arg(long, default_value = "1", help = "Number of focus-gain refreshes to run")]
        pub refreshes: usize,

        #[arg(long, help = "Tap the callout of the orphanage with this id")]
        pub open: Option<i64>,

        #[arg(long, help = "Tap the create-orphanage button")]
        pub create: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the TOML file (if any), applies command-line overrides and validates.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(api_url) = &self.api_url {
                config.api.base_url = api_url.clone();
            }

            if self.follow_location {
                config
                    .map
                    .get_or_insert_with(MapConfig::default)
                    .follow_device_location = Some(true);
            }

            if self.latitude.is_some() || self.longitude.is_some() || self.deny_location {
                let location = config.location.get_or_insert_with(LocationConfig::default);
                if self.latitude.is_some() {
                    location.latitude = self.latitude;
                }
                if self.longitude.is_some() {
                    location.longitude = self.longitude;
                }
                if self.deny_location {
                    location.permission = Some(PermissionStatus::Denied);
                }
            }

            config.validate()?;
            Ok(config)
        }
    }

}
