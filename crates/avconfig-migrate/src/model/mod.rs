//! Legacy and destination data models.

pub mod document;
pub mod legacy;

/// Destination collections, in the order the migration writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    /// `buildings`
    Buildings,
    /// `rooms`
    Rooms,
    /// `room_configurations`
    RoomConfigurations,
    /// `devices`
    Devices,
    /// `device_types`
    DeviceTypes,
}

impl Collection {
    /// All collections in write order.
    pub const ALL: [Collection; 5] = [
        Collection::Buildings,
        Collection::Rooms,
        Collection::RoomConfigurations,
        Collection::Devices,
        Collection::DeviceTypes,
    ];

    /// Path segment used in destination URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buildings => "buildings",
            Self::Rooms => "rooms",
            Self::RoomConfigurations => "room_configurations",
            Self::Devices => "devices",
            Self::DeviceTypes => "device_types",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room ID: `{buildingShortname}-{roomName}`.
#[must_use]
pub fn room_id(building: &str, room: &str) -> String {
    format!("{}-{}", building, room)
}

/// Device ID: `{buildingShortname}-{roomName}-{deviceName}`.
#[must_use]
pub fn device_id(building: &str, room: &str, device: &str) -> String {
    format!("{}-{}-{}", building, room, device)
}
