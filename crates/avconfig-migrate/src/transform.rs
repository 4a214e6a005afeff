//! Legacy record → destination document mapping.
//!
//! All functions are pure. Cross-references are resolved through the
//! indices in [`MigrationContext`]; a reference that resolves to nothing
//! leaves the target field at its zero value.

use crate::context::{MigrationContext, RoomKey};
use crate::model::{device_id, document, legacy, room_id};

/// Maps a building. The shortname becomes the ID.
#[must_use]
pub fn building(building: &legacy::Building) -> document::Building {
    document::Building {
        id: building.shortname.clone(),
        name: building.name.clone(),
        description: building.description.clone(),
    }
}

/// Maps a listed room, resolving its building shortname and configuration
/// name.
#[must_use]
pub fn room(room: &legacy::Room, ctx: &MigrationContext) -> document::Room {
    let key = ctx.room_key(room);
    document::Room {
        id: room_id(&key.building, &key.room),
        description: room.description.clone(),
        configuration: document::RoomConfiguration {
            id: ctx.configuration_names.get_or_default(&room.configuration_id),
            ..Default::default()
        },
        designation: room.room_designation.clone(),
    }
}

/// Maps an evaluator. The legacy record only has a key, which fills the
/// ID, the code key and the description alike.
#[must_use]
pub fn evaluator(evaluator: &legacy::Evaluator) -> document::Evaluator {
    document::Evaluator {
        id: evaluator.evaluator_key.clone(),
        code_key: evaluator.evaluator_key.clone(),
        description: evaluator.evaluator_key.clone(),
        priority: evaluator.priority,
    }
}

/// Maps a room configuration. `evaluators` come from a full room using the
/// configuration, since the bulk listing carries none.
#[must_use]
pub fn room_configuration(
    config: &legacy::RoomConfiguration,
    evaluators: &[legacy::Evaluator],
) -> document::RoomConfiguration {
    document::RoomConfiguration {
        id: config.name.clone(),
        evaluators: evaluators.iter().map(evaluator).collect(),
        description: config.room_init_key.clone(),
    }
}

/// Maps a device of the room identified by `key`.
#[must_use]
pub fn device(device: &legacy::Device, key: &RoomKey, ctx: &MigrationContext) -> document::Device {
    document::Device {
        id: device_id(&key.building, &key.room, &device.name),
        name: device.name.clone(),
        address: device.address.clone(),
        description: device.display_name.clone(),
        display_name: device.display_name.clone(),
        device_type: document::DeviceType {
            id: device.class.clone(),
            ..Default::default()
        },
        roles: device.roles.iter().map(|r| role(r)).collect(),
        ports: device
            .ports
            .iter()
            .map(|p| device_port(p, key, ctx))
            .collect(),
    }
}

/// Maps a role name.
#[must_use]
pub fn role(name: &str) -> document::Role {
    document::Role {
        id: name.to_string(),
        description: name.to_string(),
    }
}

/// Maps a wired device port. Name and description come from the global
/// port list; the endpoints are qualified with the room's prefix.
#[must_use]
pub fn device_port(port: &legacy::DevicePort, key: &RoomKey, ctx: &MigrationContext) -> document::Port {
    let definition = ctx.ports.get(&port.name);
    document::Port {
        id: definition.map(|p| p.name.clone()).unwrap_or_default(),
        friendly_name: definition.map(|p| p.description.clone()).unwrap_or_default(),
        source_device: device_id(&key.building, &key.room, &port.source),
        destination_device: device_id(&key.building, &key.room, &port.destination),
        description: definition.map(|p| p.description.clone()).unwrap_or_default(),
    }
}

/// Maps a port declared by a device class.
#[must_use]
pub fn declared_port(port: &legacy::DeviceTypePort) -> document::Port {
    document::Port {
        id: port.port.name.clone(),
        friendly_name: port.port.description.clone(),
        description: port.port.description.clone(),
        ..Default::default()
    }
}

/// Builds the device type of a device.
///
/// The type is keyed by the device's class. Ports come from the class
/// declaration, commands and the input/output flags from the device.
/// Returns `None` when the class is unknown.
#[must_use]
pub fn device_type(device: &legacy::Device, ctx: &MigrationContext) -> Option<document::DeviceType> {
    let class = ctx.device_classes.get(&device.class)?;

    Some(document::DeviceType {
        id: class.name.clone(),
        description: class.description.clone(),
        input: device.input,
        output: device.output,
        ports: ctx
            .class_ports
            .get(&class.name)
            .map(|ports| ports.iter().map(declared_port).collect())
            .unwrap_or_default(),
        commands: device.commands.iter().map(|c| command(c, ctx)).collect(),
    })
}

/// Maps a device command, resolving its priority by name, its microservice
/// by address and its endpoint by path.
#[must_use]
pub fn command(command: &legacy::DeviceCommand, ctx: &MigrationContext) -> document::Command {
    document::Command {
        id: command.name.clone(),
        description: command.name.clone(),
        microservice: ctx
            .microservices
            .get(&command.microservice)
            .map(|m| document::Microservice {
                id: m.name.clone(),
                description: m.description.clone(),
                address: m.address.clone(),
            })
            .unwrap_or_default(),
        endpoint: ctx
            .endpoints
            .get(&command.endpoint.path)
            .map(|e| document::Endpoint {
                id: e.name.clone(),
                description: e.description.clone(),
                path: e.path.clone(),
            })
            .unwrap_or_default(),
        priority: ctx.commands.get(&command.name).map_or(0, |c| c.priority),
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
