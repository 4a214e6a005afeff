//! Records as served by the legacy configuration database.
//!
//! Field names follow the legacy JSON payloads. Every field falls back to
//! its zero value so partially populated records still decode.

use serde::{Deserialize, Serialize};

/// A building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Building {
    /// Internal ID.
    pub id: i64,
    /// Human readable name.
    pub name: String,
    /// Short code, the natural key in the new schema.
    pub shortname: String,
    /// Free text description.
    pub description: String,
}

/// A room. The bulk listing omits `devices` and `configuration`; the
/// full-room lookup fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Room {
    /// Internal ID.
    pub id: i64,
    /// Room name, unique within its building.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Owning building. Only `id` and `shortname` are relied upon.
    pub building: Building,
    /// Internal ID of the room configuration.
    #[serde(rename = "configurationID")]
    pub configuration_id: i64,
    /// Resolved configuration, present on full rooms.
    pub configuration: RoomConfiguration,
    /// Designation (production, stage, ...).
    #[serde(rename = "roomDesignation")]
    pub room_designation: String,
    /// Embedded devices, present on full rooms.
    pub devices: Vec<Device>,
}

/// A room configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfiguration {
    /// Internal ID.
    pub id: i64,
    /// Name, the natural key in the new schema.
    pub name: String,
    /// Init key, published as the description.
    #[serde(rename = "roomInitKey")]
    pub room_init_key: String,
    /// Free text description (unused by the new schema).
    pub description: String,
    /// Evaluators, present on full rooms.
    pub evaluators: Vec<Evaluator>,
}

/// An evaluator attached to a room configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evaluator {
    /// Internal ID.
    pub id: i64,
    /// Evaluator code key.
    #[serde(rename = "evaluatorKey")]
    pub evaluator_key: String,
    /// Evaluation priority.
    pub priority: i64,
}

/// A device class, the legacy counterpart of a device type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceClass {
    /// Internal ID.
    pub id: i64,
    /// Class name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Whether devices of this class act as inputs.
    pub input: bool,
    /// Whether devices of this class act as outputs.
    pub output: bool,
}

/// A port bound to a device class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTypePort {
    /// Internal ID.
    pub id: i64,
    /// The port definition.
    pub port: Port,
}

/// A port definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    /// Internal ID.
    pub id: i64,
    /// Port name.
    pub name: String,
    /// Free text description.
    pub description: String,
}

/// A device embedded in a full room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Internal ID.
    pub id: i64,
    /// Device name, unique within its room.
    pub name: String,
    /// Network address.
    pub address: String,
    /// Acts as an input.
    pub input: bool,
    /// Acts as an output.
    pub output: bool,
    /// Device class name.
    pub class: String,
    /// Role names.
    pub roles: Vec<String>,
    /// Port wiring.
    pub ports: Vec<DevicePort>,
    /// Supported commands.
    pub commands: Vec<DeviceCommand>,
    /// Display name.
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// One wired port of a device. `source` and `destination` name devices in
/// the same room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePort {
    /// Port name.
    pub name: String,
    /// Source device name.
    pub source: String,
    /// Destination device name.
    pub destination: String,
    /// Host device name.
    pub host: String,
}

/// A command as attached to a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCommand {
    /// Command name.
    pub name: String,
    /// Endpoint invoked by the command.
    pub endpoint: Endpoint,
    /// Address of the microservice handling the command.
    pub microservice: String,
    /// Priority as stored on the device (unused, the raw command wins).
    pub priority: i64,
}

/// A command definition before its references are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommand {
    /// Internal ID.
    pub id: i64,
    /// Command name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Priority.
    pub priority: i64,
}

/// A microservice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Microservice {
    /// Internal ID.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Address, the join key for commands.
    pub address: String,
    /// Free text description.
    pub description: String,
}

/// A microservice endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Internal ID.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Path, the join key for commands.
    pub path: String,
    /// Free text description.
    pub description: String,
}
