pub mod checksum;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod link;
pub mod message;
pub mod stream;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use checksum::{Checksum, ChecksumKind};
pub use command::{CommandType, FlightMode};
pub use config::LinkConfig;
pub use error::{LinkError, Result};
pub use frame::{CommandFrame, FrameCodec};
pub use link::DroneLink;
pub use message::Command;
pub use telemetry::{ByteOrder, TelemetryCodec, TelemetryRecord};

use constants::{COMMAND_FRAME_SIZE, PAYLOAD_SIZE, TELEMETRY_RECORD_SIZE};

/// Encode a command frame with the default checksum.
pub fn encode_command(message_type: u8, drone_id: u8, payload: [u8; PAYLOAD_SIZE]) -> Result<[u8; COMMAND_FRAME_SIZE]> {
    FrameCodec::<ChecksumKind>::default().encode_raw(message_type, drone_id, payload)
}

/// Decode a command frame with the default checksum.
pub fn decode_command(bytes: &[u8]) -> Result<CommandFrame> {
    FrameCodec::<ChecksumKind>::default().decode(bytes)
}

/// Encode a telemetry record in network byte order.
pub fn encode_telemetry(
    altitude: f32,
    battery: f32,
    gps_status: u8,
    current_mode: u8,
    arm_status: u8,
    satellites: u8,
) -> [u8; TELEMETRY_RECORD_SIZE] {
    let record = TelemetryRecord::new(altitude, battery, gps_status, current_mode, arm_status, satellites);
    TelemetryCodec::default().encode(&record)
}

/// Decode a telemetry record in network byte order.
pub fn decode_telemetry(bytes: &[u8]) -> Result<TelemetryRecord> {
    TelemetryCodec::default().decode(bytes)
}
