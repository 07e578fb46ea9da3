//! # Telemetry Record
//!
//! Fixed 12-byte snapshot sent by the drone:
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 4    | altitude, f32 meters |
//! | 4      | 4    | battery, f32 percent |
//! | 8      | 1    | gps status    |
//! | 9      | 1    | flight mode   |
//! | 10     | 1    | arm status    |
//! | 11     | 1    | satellites    |
//!
//! Floats are IEEE-754 single precision in network byte order unless the
//! codec is configured for little-endian. There is no integrity field.

use crate::command::FlightMode;
use crate::constants::TELEMETRY_RECORD_SIZE;
use crate::error::{LinkError, Result};
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

/// Byte order of the two float fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub altitude: f32,          // meters
    pub battery: f32,           // percent, 0-100 expected
    pub gps_status: u8,         // fix quality, drone defined
    pub current_mode: u8,       // FlightMode code, passed through as is
    pub arm_status: u8,         // non-zero when armed
    pub satellites: u8,
}

impl TelemetryRecord {
    pub fn new(altitude: f32, battery: f32, gps_status: u8, current_mode: u8, arm_status: u8, satellites: u8) -> Self {
        Self {
            altitude,
            battery,
            gps_status,
            current_mode,
            arm_status,
            satellites,
        }
    }

    pub fn flight_mode(&self) -> Result<FlightMode> {
        FlightMode::from_code(self.current_mode)
    }

    pub fn is_armed(&self) -> bool {
        self.arm_status != 0
    }

    /// Field-wise equality that compares the floats by bit pattern, so NaN
    /// payloads and signed zeros count.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.altitude.to_bits() == other.altitude.to_bits()
            && self.battery.to_bits() == other.battery.to_bits()
            && self.gps_status == other.gps_status
            && self.current_mode == other.current_mode
            && self.arm_status == other.arm_status
            && self.satellites == other.satellites
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.flight_mode() {
            Ok(mode) => mode.to_string(),
            Err(_) => format!("UNKNOWN(0x{:02x})", self.current_mode),
        };
        write!(
            f,
            "Alt: {:.2} m, Battery: {:.1} %, GPS: {}, Sats: {}, Mode: {}, {}",
            self.altitude,
            self.battery,
            self.gps_status,
            self.satellites,
            mode,
            if self.is_armed() { "ARMED" } else { "DISARMED" }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryCodec {
    byte_order: ByteOrder,
    reject_unknown_mode: bool,
}

impl TelemetryCodec {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            reject_unknown_mode: false,
        }
    }

    /// Make `decode` fail on mode codes outside the defined set instead of
    /// passing them through.
    pub fn with_reject_unknown_mode(mut self, reject: bool) -> Self {
        self.reject_unknown_mode = reject;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn encode(&self, record: &TelemetryRecord) -> [u8; TELEMETRY_RECORD_SIZE] {
        let mut out = [0u8; TELEMETRY_RECORD_SIZE];
        let mut dst = &mut out[..];
        match self.byte_order {
            ByteOrder::Big => {
                dst.put_f32(record.altitude);
                dst.put_f32(record.battery);
            }
            ByteOrder::Little => {
                dst.put_f32_le(record.altitude);
                dst.put_f32_le(record.battery);
            }
        }
        dst.put_u8(record.gps_status);
        dst.put_u8(record.current_mode);
        dst.put_u8(record.arm_status);
        dst.put_u8(record.satellites);
        out
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<TelemetryRecord> {
        if bytes.len() != TELEMETRY_RECORD_SIZE {
            return Err(LinkError::InvalidLength {
                expected: TELEMETRY_RECORD_SIZE,
                actual: bytes.len(),
            });
        }

        let mut src = bytes;
        let (altitude, battery) = match self.byte_order {
            ByteOrder::Big => (src.get_f32(), src.get_f32()),
            ByteOrder::Little => (src.get_f32_le(), src.get_f32_le()),
        };
        let record = TelemetryRecord {
            altitude,
            battery,
            gps_status: src.get_u8(),
            current_mode: src.get_u8(),
            arm_status: src.get_u8(),
            satellites: src.get_u8(),
        };

        if self.reject_unknown_mode {
            record.flight_mode()?;
        }
        Ok(record)
    }
}
