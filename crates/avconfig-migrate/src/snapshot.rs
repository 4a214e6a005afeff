//! Bulk fetch of the legacy store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{info, warn};

use crate::connectors::LegacySource;
use crate::error::Result;
use crate::model::legacy::{
    Building, DeviceClass, DeviceTypePort, Endpoint, Microservice, Port, RawCommand, Room,
    RoomConfiguration,
};

/// Every legacy collection, fully materialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacySnapshot {
    /// Buildings.
    pub buildings: Vec<Building>,
    /// Rooms. Bulk listings carry no devices; exports carry full rooms.
    pub rooms: Vec<Room>,
    /// Room configurations.
    pub configurations: Vec<RoomConfiguration>,
    /// Device classes.
    #[serde(rename = "classes")]
    pub device_classes: Vec<DeviceClass>,
    /// Raw command definitions.
    #[serde(rename = "commands")]
    pub raw_commands: Vec<RawCommand>,
    /// Port definitions.
    pub ports: Vec<Port>,
    /// Microservices.
    pub microservices: Vec<Microservice>,
    /// Endpoints.
    pub endpoints: Vec<Endpoint>,
    /// Ports declared by each device class.
    pub class_ports: BTreeMap<String, Vec<DeviceTypePort>>,
}

impl LegacySnapshot {
    /// Reads every collection from the source.
    ///
    /// Read failures never abort: each one is logged and the collection is
    /// left empty, so a partial snapshot is still returned.
    pub async fn fetch(source: &dyn LegacySource) -> Self {
        info!("Fetching legacy data from {}", source.source_type());

        let mut snapshot = Self {
            buildings: or_empty("buildings", source.buildings().await),
            rooms: or_empty("rooms", source.rooms().await),
            configurations: or_empty("room configurations", source.room_configurations().await),
            device_classes: or_empty("device classes", source.device_classes().await),
            raw_commands: or_empty("commands", source.raw_commands().await),
            ports: or_empty("ports", source.ports().await),
            microservices: or_empty("microservices", source.microservices().await),
            endpoints: or_empty("endpoints", source.endpoints().await),
            class_ports: BTreeMap::new(),
        };

        for class in &snapshot.device_classes {
            let ports = or_empty(
                &format!("ports of class {}", class.name),
                source.ports_by_class(&class.name).await,
            );
            snapshot.class_ports.insert(class.name.clone(), ports);
        }

        info!(
            "Fetched {} buildings, {} rooms, {} configurations, {} device classes, {} commands",
            snapshot.buildings.len(),
            snapshot.rooms.len(),
            snapshot.configurations.len(),
            snapshot.device_classes.len(),
            snapshot.raw_commands.len()
        );

        snapshot
    }

    /// Replaces every room with its full record, as needed for an export.
    ///
    /// Rooms whose full record cannot be read are kept as listed.
    pub async fn expand_rooms(&mut self, source: &dyn LegacySource) {
        let shortnames = crate::index::building_shortnames(&self.buildings);
        for room in &mut self.rooms {
            let building = shortnames.get_or_default(&room.building.id);
            match source.full_room(&building, &room.name).await {
                Ok(full) => *room = full,
                Err(e) => warn!(
                    "Failed to get room {}-{} from old config db : {}",
                    building, room.name, e
                ),
            }
        }
    }
}

/// Fetches one full room, logging and falling back to an empty room.
pub async fn fetch_full_room(source: &dyn LegacySource, building: &str, room: &str) -> Room {
    or_default(
        &format!("room {}-{}", building, room),
        source.full_room(building, room).await,
    )
}

fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Vec<T> {
    or_default(what, result)
}

fn or_default<T: Default, E: Display>(what: &str, result: std::result::Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to get {} from old config db : {}", what, e);
            T::default()
        }
    }
}
