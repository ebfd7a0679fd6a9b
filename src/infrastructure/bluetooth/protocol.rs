//! Rover Serial Protocol
//!
//! The rover side is an HC-05/HC-06 module exposing the Serial Port Profile
//! over RFCOMM. Each command is a single ASCII character terminated by `\n`
//! (see [`RoverCommand::wire_bytes`](crate::domain::commands::RoverCommand::wire_bytes)).
//! No response frame exists, so nothing is ever read back.

use uuid::Uuid;

/// Serial Port Profile service class UUID
pub const SPP_UUID: &str = "00001101-0000-1000-8000-00805F9B34FB";

/// Parse a service UUID from settings
pub fn parse_service_uuid(uuid_str: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(uuid_str.trim())
}

/// Service UUID from settings, falling back to SPP when the stored value is garbage
pub fn service_uuid_or_spp(uuid_str: &str) -> Uuid {
    parse_service_uuid(uuid_str).unwrap_or_else(|e| {
        tracing::warn!("Invalid service UUID {:?} ({}), using SPP", uuid_str, e);
        spp_uuid()
    })
}

pub fn spp_uuid() -> Uuid {
    Uuid::from_u128(0x00001101_0000_1000_8000_00805F9B34FB)
}
