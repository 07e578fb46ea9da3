//! Common test utilities and shared imports

// Shared across several test files; not every item is used in each one
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use dronelink_lib::checksum::{Checksum, ChecksumKind, Crc8, Sum8, Xor8};
#[allow(unused_imports)]
pub use dronelink_lib::command::{CommandType, FlightMode};
#[allow(unused_imports)]
pub use dronelink_lib::constants::*;
#[allow(unused_imports)]
pub use dronelink_lib::error::LinkError;
#[allow(unused_imports)]
pub use dronelink_lib::frame::{CommandFrame, FrameCodec};
#[allow(unused_imports)]
pub use dronelink_lib::message::Command;
#[allow(unused_imports)]
pub use dronelink_lib::telemetry::{ByteOrder, TelemetryCodec, TelemetryRecord};

/// Route `tracing` output through the test harness; set RUST_LOG to see it
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Vec<u8> {
    hex::decode(hex_data).expect("Failed to decode hex")
}

/// ARM addressed to drone 5, XOR checksum
#[allow(dead_code)]
pub const ARM_DRONE_5: &str = "010500000000000004";

/// MODE_CHANGE to LOITER addressed to drone 1, XOR checksum
#[allow(dead_code)]
pub const MODE_LOITER_DRONE_1: &str = "060103000000000004";

/// 12.5 m, 87 %, gps 3, LOITER, armed, 9 satellites, big-endian
#[allow(dead_code)]
pub const TELEMETRY_LOITER: &str = "4148000042ae000003030109";

/// Payloads exercising every bit position and the extremes
#[allow(dead_code)]
pub const SAMPLE_PAYLOADS: &[[u8; 6]] = &[
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x20],
    [0x40, 0x80, 0xaa, 0x55, 0xde, 0xad],
    [0x07, 0x00, 0x00, 0x00, 0x00, 0x01],
];
