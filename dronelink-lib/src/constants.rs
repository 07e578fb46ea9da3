// Wire layout constants for the command frame and telemetry record

/// Size of a command frame on the wire (9 bytes)
pub const COMMAND_FRAME_SIZE: usize = 9;

/// Size of the opaque command payload (6 bytes)
pub const PAYLOAD_SIZE: usize = 6;

/// Number of leading frame bytes covered by the checksum
pub const CHECKSUM_COVERAGE: usize = COMMAND_FRAME_SIZE - 1;

/// Offset of the message type byte
pub const OFFSET_MESSAGE_TYPE: usize = 0;

/// Offset of the drone id byte
pub const OFFSET_DRONE_ID: usize = 1;

/// Offset of the first payload byte
pub const OFFSET_PAYLOAD: usize = 2;

/// Offset of the trailing checksum byte
pub const OFFSET_CHECKSUM: usize = 8;

/// Size of a telemetry record on the wire (12 bytes)
pub const TELEMETRY_RECORD_SIZE: usize = 12;

/// Offset of the altitude float
pub const OFFSET_ALTITUDE: usize = 0;

/// Offset of the battery float
pub const OFFSET_BATTERY: usize = 4;

/// Offset of the GPS status byte
pub const OFFSET_GPS_STATUS: usize = 8;

/// Offset of the flight mode byte
pub const OFFSET_CURRENT_MODE: usize = 9;

/// Offset of the arm status byte
pub const OFFSET_ARM_STATUS: usize = 10;

/// Offset of the satellite count byte
pub const OFFSET_SATELLITES: usize = 11;

/// Default serial baud rate of the ground station link
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default time to wait for a telemetry reply (milliseconds)
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 1_000;

/// Default drone id used when none is configured
pub const DEFAULT_DRONE_ID: u8 = 1;
