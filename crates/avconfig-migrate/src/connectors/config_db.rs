//! Reader for the legacy configuration-database microservice.
//!
//! The service exposes every collection as a JSON array under a fixed path
//! and a nested full-room view under `/buildings/{building}/rooms/{room}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::connectors::common::{
    create_http_client, handle_http_error, join_segments, truncate_body,
};
use crate::connectors::LegacySource;
use crate::error::{Error, Result};
use crate::model::legacy::{
    Building, DeviceClass, DeviceTypePort, Endpoint, Microservice, Port, RawCommand, Room,
    RoomConfiguration,
};

/// Configuration for the legacy configuration-database microservice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDbConfig {
    /// Base URL (e.g., http://localhost:8006).
    pub url: String,
    /// Optional request timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Legacy configuration-database reader.
pub struct ConfigDbSource {
    config: ConfigDbConfig,
    client: Client,
}

impl ConfigDbSource {
    /// Creates a new reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid HTTP URL.
    pub fn new(config: ConfigDbConfig) -> Result<Self> {
        crate::connectors::common::validate_url(&config.url)?;
        let client = create_http_client(config.timeout_secs.map(Duration::from_secs));
        Ok(Self { config, client })
    }

    /// Builds the URL for a path below the base URL.
    fn build_url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        join_segments(&self.config.url, segments)
            .map_err(|e| Error::SourceConnection(e.to_string()))
    }

    /// Fetches and decodes one JSON document.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.build_url(segments)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::SourceConnection(format!("config-db request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(handle_http_error(status, &truncate_body(&body), "config-db"));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to parse {}: {}", url.path(), e)))
    }
}

#[async_trait]
impl LegacySource for ConfigDbSource {
    fn source_type(&self) -> &'static str {
        "config_db"
    }

    async fn buildings(&self) -> Result<Vec<Building>> {
        self.get_json(&["buildings"]).await
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        self.get_json(&["rooms"]).await
    }

    async fn room_configurations(&self) -> Result<Vec<RoomConfiguration>> {
        self.get_json(&["configurations"]).await
    }

    async fn device_classes(&self) -> Result<Vec<DeviceClass>> {
        self.get_json(&["classes"]).await
    }

    async fn raw_commands(&self) -> Result<Vec<RawCommand>> {
        self.get_json(&["commands"]).await
    }

    async fn ports(&self) -> Result<Vec<Port>> {
        self.get_json(&["ports"]).await
    }

    async fn ports_by_class(&self, class: &str) -> Result<Vec<DeviceTypePort>> {
        self.get_json(&["classes", class, "ports"]).await
    }

    async fn microservices(&self) -> Result<Vec<Microservice>> {
        self.get_json(&["microservices"]).await
    }

    async fn endpoints(&self) -> Result<Vec<Endpoint>> {
        self.get_json(&["endpoints"]).await
    }

    async fn full_room(&self, building: &str, room: &str) -> Result<Room> {
        self.get_json(&["buildings", building, "rooms", room]).await
    }
}

#[cfg(test)]
#[path = "config_db_tests.rs"]
mod tests;
