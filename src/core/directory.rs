use crate::core::{OrphanageDirectory, OrphanageSummary};
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ORPHANAGES_PATH: &str = "/orphanages";

/// Reads the orphanage listing from the backend over HTTP.
#[derive(Debug, Clone)]
pub struct OrphanageDirectoryFetcher {
    client: Client,
    endpoint: String,
}

impl OrphanageDirectoryFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_ORPHANAGES_PATH, None)
    }

    pub fn with_options(base_url: &str, path: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), path),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrphanageDirectory for OrphanageDirectoryFetcher {
    async fn list_orphanages(&self) -> Result<Vec<OrphanageSummary>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(MapError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        let orphanages: Vec<OrphanageSummary> = serde_json::from_slice(&body)?;

        tracing::debug!("Fetched {} orphanages", orphanages.len());
        Ok(orphanages)
    }
}
