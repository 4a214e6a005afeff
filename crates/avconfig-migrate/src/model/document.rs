//! Documents written to the destination store.
//!
//! Every top-level document carries its natural key in `_id`. Nested
//! references (a room's configuration, a device's type) reuse the same
//! structs with only `_id` set; empty fields are left out of the JSON so
//! such references serialize as `{"_id": "..."}`.

use serde::{Deserialize, Serialize};

/// A building, keyed by shortname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Building shortname.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Free text description.
    pub description: String,
}

/// A room, keyed by `{building}-{room}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// `{buildingShortname}-{roomName}`.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    pub description: String,
    /// Reference to the room configuration by ID.
    pub configuration: RoomConfiguration,
    /// Room designation.
    pub designation: String,
}

/// A room configuration, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfiguration {
    /// Configuration name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Evaluators run for rooms with this configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluators: Vec<Evaluator>,
    /// Description (legacy init key).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A configuration evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    /// Evaluator ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Code key used to look up the evaluator implementation.
    #[serde(rename = "codekey")]
    pub code_key: String,
    /// Free text description.
    pub description: String,
    /// Evaluation priority.
    pub priority: i64,
}

/// A device, keyed by `{building}-{room}-{device}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// `{buildingShortname}-{roomName}-{deviceName}`.
    #[serde(rename = "_id")]
    pub id: String,
    /// Device name.
    pub name: String,
    /// Network address.
    pub address: String,
    /// Description (legacy display name).
    pub description: String,
    /// Display name.
    pub display_name: String,
    /// Reference to the device type by ID.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Roles.
    pub roles: Vec<Role>,
    /// Wired ports with room-qualified endpoints.
    pub ports: Vec<Port>,
}

/// A device role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    pub description: String,
}

/// A port, either on a device (wired) or on a device type (declared).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Friendly name.
    pub friendly_name: String,
    /// Fully qualified source device ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_device: String,
    /// Fully qualified destination device ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_device: String,
    /// Free text description.
    pub description: String,
}

/// A device type, keyed by the legacy class name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    /// Class name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Acts as an input.
    #[serde(default, skip_serializing_if = "is_false")]
    pub input: bool,
    /// Acts as an output.
    #[serde(default, skip_serializing_if = "is_false")]
    pub output: bool,
    /// Ports declared by the class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    /// Commands understood by the type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
}

/// A command with its microservice and endpoint resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    pub description: String,
    /// Microservice that handles the command.
    pub microservice: Microservice,
    /// Endpoint invoked on the microservice.
    pub endpoint: Endpoint,
    /// Priority.
    pub priority: i64,
}

/// A microservice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microservice {
    /// Name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    pub description: String,
    /// Base address.
    pub address: String,
}

/// A microservice endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Name.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free text description.
    pub description: String,
    /// Path template.
    pub path: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
