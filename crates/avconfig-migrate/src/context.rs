//! Lookup state shared by the transform stages.

use std::collections::BTreeMap;

use crate::index::{building_shortnames, configuration_names, FirstMatchIndex};
use crate::model::legacy::{
    DeviceClass, DeviceTypePort, Endpoint, Microservice, Port, RawCommand, Room,
};
use crate::snapshot::LegacySnapshot;

/// A room located by its natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomKey {
    /// Building shortname, empty when the building is unknown.
    pub building: String,
    /// Room name.
    pub room: String,
}

/// The fetched legacy data plus every join index the transforms need.
///
/// Built once by the pipeline after the bulk fetch and passed by reference
/// into each stage.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    /// The fetched legacy data.
    pub snapshot: LegacySnapshot,
    /// Building ID → shortname.
    pub building_shortnames: FirstMatchIndex<i64, String>,
    /// Configuration ID → configuration name.
    pub configuration_names: FirstMatchIndex<i64, String>,
    /// Configuration ID → first room using it.
    pub configuration_rooms: FirstMatchIndex<i64, RoomKey>,
    /// Port name → port definition.
    pub ports: FirstMatchIndex<String, Port>,
    /// Microservice address → microservice.
    pub microservices: FirstMatchIndex<String, Microservice>,
    /// Endpoint path → endpoint.
    pub endpoints: FirstMatchIndex<String, Endpoint>,
    /// Class name → device class.
    pub device_classes: FirstMatchIndex<String, DeviceClass>,
    /// Command name → raw command.
    pub commands: FirstMatchIndex<String, RawCommand>,
    /// Class name → declared ports.
    pub class_ports: BTreeMap<String, Vec<DeviceTypePort>>,
}

impl MigrationContext {
    /// Builds every index over `snapshot`.
    #[must_use]
    pub fn new(snapshot: LegacySnapshot) -> Self {
        let building_shortnames = building_shortnames(&snapshot.buildings);
        let configuration_names = configuration_names(&snapshot.configurations);
        let configuration_rooms = snapshot
            .rooms
            .iter()
            .map(|r| {
                (
                    r.configuration_id,
                    RoomKey {
                        building: building_shortnames.get_or_default(&r.building.id),
                        room: r.name.clone(),
                    },
                )
            })
            .collect();

        Self {
            building_shortnames,
            configuration_names,
            configuration_rooms,
            ports: FirstMatchIndex::by_key(&snapshot.ports, |p| p.name.clone()),
            microservices: FirstMatchIndex::by_key(&snapshot.microservices, |m| m.address.clone()),
            endpoints: FirstMatchIndex::by_key(&snapshot.endpoints, |e| e.path.clone()),
            device_classes: FirstMatchIndex::by_key(&snapshot.device_classes, |c| c.name.clone()),
            commands: FirstMatchIndex::by_key(&snapshot.raw_commands, |c| c.name.clone()),
            class_ports: snapshot.class_ports.clone(),
            snapshot,
        }
    }

    /// Natural key of a listed room.
    #[must_use]
    pub fn room_key(&self, room: &Room) -> RoomKey {
        RoomKey {
            building: self.building_shortnames.get_or_default(&room.building.id),
            room: room.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::legacy::{Building, RoomConfiguration};

    fn snapshot() -> LegacySnapshot {
        LegacySnapshot {
            buildings: vec![Building {
                id: 1,
                shortname: "ITB".to_string(),
                ..Default::default()
            }],
            rooms: vec![
                Room {
                    name: "1101".to_string(),
                    building: Building {
                        id: 1,
                        ..Default::default()
                    },
                    configuration_id: 4,
                    ..Default::default()
                },
                Room {
                    name: "1102".to_string(),
                    building: Building {
                        id: 1,
                        ..Default::default()
                    },
                    configuration_id: 4,
                    ..Default::default()
                },
                Room {
                    name: "B001".to_string(),
                    building: Building {
                        id: 77,
                        ..Default::default()
                    },
                    configuration_id: 5,
                    ..Default::default()
                },
            ],
            configurations: vec![RoomConfiguration {
                id: 4,
                name: "Default".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_configuration_rooms_keep_first_room() {
        let ctx = MigrationContext::new(snapshot());

        let key = ctx.configuration_rooms.get(&4).unwrap();
        assert_eq!(key.building, "ITB");
        assert_eq!(key.room, "1101");
    }

    #[test]
    fn test_room_key_with_unknown_building() {
        let ctx = MigrationContext::new(snapshot());

        let key = ctx.room_key(&ctx.snapshot.rooms[2]);
        assert_eq!(key.building, "");
        assert_eq!(key.room, "B001");
        assert_eq!(ctx.configuration_rooms.get(&5), Some(&key));
    }
}
