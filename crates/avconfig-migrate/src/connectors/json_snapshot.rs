//! Reader for a JSON export of the legacy store.
//!
//! The file holds one [`LegacySnapshot`] whose rooms carry their embedded
//! devices, as written by `avconfig-migrate export`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::connectors::LegacySource;
use crate::error::{Error, Result};
use crate::model::legacy::{
    Building, DeviceClass, DeviceTypePort, Endpoint, Microservice, Port, RawCommand, Room,
    RoomConfiguration,
};
use crate::snapshot::LegacySnapshot;

/// Configuration for a JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSnapshotConfig {
    /// Path to the JSON file.
    pub path: PathBuf,
}

/// Legacy store served from a JSON export.
pub struct JsonSnapshotSource {
    data: LegacySnapshot,
}

impl JsonSnapshotSource {
    /// Reads and parses the export file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid export.
    pub fn open(config: &JsonSnapshotConfig) -> Result<Self> {
        let file = File::open(&config.path).map_err(|e| {
            Error::SourceConnection(format!(
                "Failed to open JSON file '{}': {}",
                config.path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let data: LegacySnapshot = serde_json::from_reader(reader)
            .map_err(|e| Error::Extraction(format!("Failed to parse JSON: {}", e)))?;

        Ok(Self::from_snapshot(data))
    }

    /// Serves an in-memory snapshot.
    #[must_use]
    pub fn from_snapshot(data: LegacySnapshot) -> Self {
        Self { data }
    }

    /// Shortname of a room's building, falling back to the building list
    /// when the nested building only carries its ID.
    fn building_shortname<'a>(&'a self, room: &'a Room) -> &'a str {
        if !room.building.shortname.is_empty() {
            return &room.building.shortname;
        }
        self.data
            .buildings
            .iter()
            .find(|b| b.id == room.building.id)
            .map_or("", |b| b.shortname.as_str())
    }
}

#[async_trait]
impl LegacySource for JsonSnapshotSource {
    fn source_type(&self) -> &'static str {
        "json_file"
    }

    async fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.data.buildings.clone())
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        // The bulk listing never carries devices or the resolved configuration.
        Ok(self
            .data
            .rooms
            .iter()
            .map(|r| Room {
                devices: Vec::new(),
                configuration: RoomConfiguration::default(),
                ..r.clone()
            })
            .collect())
    }

    async fn room_configurations(&self) -> Result<Vec<RoomConfiguration>> {
        Ok(self.data.configurations.clone())
    }

    async fn device_classes(&self) -> Result<Vec<DeviceClass>> {
        Ok(self.data.device_classes.clone())
    }

    async fn raw_commands(&self) -> Result<Vec<RawCommand>> {
        Ok(self.data.raw_commands.clone())
    }

    async fn ports(&self) -> Result<Vec<Port>> {
        Ok(self.data.ports.clone())
    }

    async fn ports_by_class(&self, class: &str) -> Result<Vec<DeviceTypePort>> {
        Ok(self.data.class_ports.get(class).cloned().unwrap_or_default())
    }

    async fn microservices(&self) -> Result<Vec<Microservice>> {
        Ok(self.data.microservices.clone())
    }

    async fn endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.data.endpoints.clone())
    }

    async fn full_room(&self, building: &str, room: &str) -> Result<Room> {
        let found = self
            .data
            .rooms
            .iter()
            .find(|r| r.name == room && self.building_shortname(r) == building)
            .ok_or_else(|| {
                Error::Extraction(format!("Room '{}-{}' not found in export", building, room))
            })?;

        let mut full = found.clone();
        full.building.shortname = building.to_string();
        if full.configuration.name.is_empty() {
            if let Some(config) = self
                .data
                .configurations
                .iter()
                .find(|c| c.id == full.configuration_id)
            {
                full.configuration = config.clone();
            }
        }
        Ok(full)
    }
}

#[cfg(test)]
#[path = "json_snapshot_tests.rs"]
mod tests;
