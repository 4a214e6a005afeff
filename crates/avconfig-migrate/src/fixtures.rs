//! Sample legacy data shared by unit tests.

use std::collections::BTreeMap;

use crate::model::legacy::{
    Building, Device, DeviceClass, DeviceCommand, DevicePort, DeviceTypePort, Endpoint, Evaluator,
    Microservice, Port, RawCommand, Room, RoomConfiguration,
};
use crate::snapshot::LegacySnapshot;

pub fn building(id: i64, shortname: &str) -> Building {
    Building {
        id,
        name: format!("{} building", shortname),
        shortname: shortname.to_string(),
        description: format!("{} description", shortname),
    }
}

pub fn default_configuration() -> RoomConfiguration {
    RoomConfiguration {
        id: 4,
        name: "Default".to_string(),
        room_init_key: "DefaultInit".to_string(),
        description: String::new(),
        evaluators: vec![
            Evaluator {
                id: 1,
                evaluator_key: "PowerOnDefault".to_string(),
                priority: 1,
            },
            Evaluator {
                id: 2,
                evaluator_key: "StandbyDefault".to_string(),
                priority: 9,
            },
        ],
    }
}

pub fn projector() -> Device {
    Device {
        id: 100,
        name: "D1".to_string(),
        address: "d1.av.local".to_string(),
        input: false,
        output: true,
        class: "Projector".to_string(),
        roles: vec!["VideoOut".to_string(), "AudioOut".to_string()],
        ports: vec![DevicePort {
            name: "HDMI1".to_string(),
            source: "PC1".to_string(),
            destination: "D1".to_string(),
            host: "D1".to_string(),
        }],
        commands: vec![
            DeviceCommand {
                name: "PowerOn".to_string(),
                endpoint: Endpoint {
                    name: "power-on".to_string(),
                    path: "/:address/power/on".to_string(),
                    ..Default::default()
                },
                microservice: "http://sony:8007".to_string(),
                priority: 0,
            },
            DeviceCommand {
                name: "PowerOff".to_string(),
                endpoint: Endpoint {
                    path: "/:address/power/standby".to_string(),
                    ..Default::default()
                },
                microservice: "http://unknown:9999".to_string(),
                priority: 0,
            },
        ],
        display_name: "Front Projector".to_string(),
    }
}

pub fn computer() -> Device {
    Device {
        id: 101,
        name: "PC1".to_string(),
        address: "pc1.av.local".to_string(),
        input: true,
        output: false,
        class: "Computer".to_string(),
        ports: vec![DevicePort {
            name: "HDMI2".to_string(),
            source: "PC1".to_string(),
            destination: "D1".to_string(),
            host: "PC1".to_string(),
        }],
        display_name: "Podium PC".to_string(),
        ..Default::default()
    }
}

pub fn mystery_device() -> Device {
    Device {
        id: 102,
        name: "X1".to_string(),
        class: "Mystery".to_string(),
        ..Default::default()
    }
}

fn listed_room(name: &str, building_id: i64, configuration_id: i64) -> Room {
    Room {
        id: 0,
        name: name.to_string(),
        description: format!("Room {}", name),
        building: Building {
            id: building_id,
            ..Default::default()
        },
        configuration_id,
        room_designation: "production".to_string(),
        ..Default::default()
    }
}

/// A legacy store as an export: rooms carry their devices.
pub fn export() -> LegacySnapshot {
    let mut main_room = listed_room("1101", 1, 4);
    main_room.devices = vec![projector(), computer(), mystery_device()];

    let mut class_ports = BTreeMap::new();
    class_ports.insert(
        "Projector".to_string(),
        vec![DeviceTypePort {
            id: 1,
            port: Port {
                id: 3,
                name: "VGA1".to_string(),
                description: "VGA input 1".to_string(),
            },
        }],
    );

    LegacySnapshot {
        buildings: vec![building(1, "ITB"), building(2, "LIB"), building(1, "DUP")],
        rooms: vec![
            main_room,
            listed_room("1102", 1, 4),
            listed_room("B001", 77, 99),
        ],
        configurations: vec![
            default_configuration(),
            RoomConfiguration {
                id: 5,
                name: "Unused".to_string(),
                room_init_key: "UnusedInit".to_string(),
                ..Default::default()
            },
        ],
        device_classes: vec![
            DeviceClass {
                id: 1,
                name: "Projector".to_string(),
                description: "Projector class".to_string(),
                input: false,
                output: true,
            },
            DeviceClass {
                id: 2,
                name: "Computer".to_string(),
                description: "Computer class".to_string(),
                input: true,
                output: false,
            },
        ],
        raw_commands: vec![
            RawCommand {
                id: 1,
                name: "PowerOn".to_string(),
                description: "Power on".to_string(),
                priority: 1,
            },
            RawCommand {
                id: 2,
                name: "PowerOff".to_string(),
                description: "Power off".to_string(),
                priority: 2,
            },
        ],
        ports: vec![
            Port {
                id: 1,
                name: "HDMI1".to_string(),
                description: "HDMI input 1".to_string(),
            },
            Port {
                id: 2,
                name: "HDMI2".to_string(),
                description: "HDMI input 2".to_string(),
            },
        ],
        microservices: vec![Microservice {
            id: 1,
            name: "sony-control".to_string(),
            address: "http://sony:8007".to_string(),
            description: "Sony projectors".to_string(),
        }],
        endpoints: vec![Endpoint {
            id: 1,
            name: "power-on".to_string(),
            path: "/:address/power/on".to_string(),
            description: "Power on a device".to_string(),
        }],
        class_ports,
    }
}

/// The export as the bulk fetch would see it: rooms without devices.
pub fn listing() -> LegacySnapshot {
    let mut snapshot = export();
    for room in &mut snapshot.rooms {
        room.devices.clear();
    }
    snapshot
}
