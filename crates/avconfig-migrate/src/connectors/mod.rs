//! Readers for the legacy configuration store.

pub mod common;
pub mod config_db;
pub mod json_snapshot;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::legacy::{
    Building, DeviceClass, DeviceTypePort, Endpoint, Microservice, Port, RawCommand, Room,
    RoomConfiguration,
};

/// Read-only access to the legacy store.
///
/// Every call may fail; callers decide whether a failure is fatal. The
/// migration treats all of them as recoverable (see
/// [`LegacySnapshot::fetch`](crate::snapshot::LegacySnapshot::fetch)).
#[async_trait]
pub trait LegacySource: Send + Sync {
    /// Get the source type name.
    fn source_type(&self) -> &'static str;

    /// All buildings.
    async fn buildings(&self) -> Result<Vec<Building>>;

    /// All rooms, without embedded devices.
    async fn rooms(&self) -> Result<Vec<Room>>;

    /// All room configurations, without evaluators.
    async fn room_configurations(&self) -> Result<Vec<RoomConfiguration>>;

    /// All device classes.
    async fn device_classes(&self) -> Result<Vec<DeviceClass>>;

    /// All raw command definitions.
    async fn raw_commands(&self) -> Result<Vec<RawCommand>>;

    /// All port definitions.
    async fn ports(&self) -> Result<Vec<Port>>;

    /// Ports declared by one device class.
    async fn ports_by_class(&self, class: &str) -> Result<Vec<DeviceTypePort>>;

    /// All microservices.
    async fn microservices(&self) -> Result<Vec<Microservice>>;

    /// All endpoints.
    async fn endpoints(&self) -> Result<Vec<Endpoint>>;

    /// One room with its devices and resolved configuration.
    async fn full_room(&self, building: &str, room: &str) -> Result<Room>;
}

/// Create a legacy source from configuration.
pub fn create_source(config: &crate::config::SourceConfig) -> Result<Box<dyn LegacySource>> {
    match config {
        crate::config::SourceConfig::ConfigDb(cfg) => {
            Ok(Box::new(config_db::ConfigDbSource::new(cfg.clone())?))
        }
        crate::config::SourceConfig::JsonFile(cfg) => {
            Ok(Box::new(json_snapshot::JsonSnapshotSource::open(cfg)?))
        }
    }
}
