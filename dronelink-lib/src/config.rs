use crate::checksum::ChecksumKind;
use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_DRONE_ID, DEFAULT_RESPONSE_TIMEOUT_MS};
use crate::error::Result;
use crate::frame::FrameCodec;
use crate::telemetry::{ByteOrder, TelemetryCodec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings shared by both ends of a link. Missing keys in a config file
/// fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub drone_id: u8,
    pub checksum: ChecksumKind,
    pub byte_order: ByteOrder,
    pub reject_unknown_mode: bool,
    pub response_timeout_ms: u64,
    pub baud_rate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            drone_id: DEFAULT_DRONE_ID,
            checksum: ChecksumKind::default(),
            byte_order: ByteOrder::default(),
            reject_unknown_mode: false,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl LinkConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn frame_codec(&self) -> FrameCodec<ChecksumKind> {
        FrameCodec::new(self.checksum)
    }

    pub fn telemetry_codec(&self) -> TelemetryCodec {
        TelemetryCodec::new(self.byte_order).with_reject_unknown_mode(self.reject_unknown_mode)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}
