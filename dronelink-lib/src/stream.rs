//! Splitting a raw byte stream (serial capture, socket) into frames and
//! records.
//!
//! Command frames have no sync marker, so [`FrameDecoder`] aligns by trial:
//! when the nine buffered head bytes do not form a valid frame it drops one
//! byte and tries again. Telemetry records carry neither a marker nor a
//! checksum, so [`TelemetryDecoder`] can only cut fixed 12-byte chunks.

use crate::checksum::{Checksum, ChecksumKind};
use crate::constants::{COMMAND_FRAME_SIZE, TELEMETRY_RECORD_SIZE};
use crate::error::Result;
use crate::frame::{CommandFrame, FrameCodec};
use crate::telemetry::{TelemetryCodec, TelemetryRecord};
use bytes::{Buf, BytesMut};
use tracing::{debug, warn};

/// Counters kept by [`FrameDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub frames: u64,
    pub discarded_bytes: u64,
}

#[derive(Debug)]
pub struct FrameDecoder<C = ChecksumKind> {
    codec: FrameCodec<C>,
    buffer: BytesMut,
    stats: DecoderStats,
}

impl<C: Checksum> FrameDecoder<C> {
    pub fn new(codec: FrameCodec<C>) -> Self {
        Self {
            codec,
            buffer: BytesMut::with_capacity(COMMAND_FRAME_SIZE * 4),
            stats: DecoderStats::default(),
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes waiting for more input.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Return the next valid frame, skipping over bytes that cannot start
    /// one. `None` means more input is needed.
    pub fn decode_next(&mut self) -> Option<CommandFrame> {
        while self.buffer.len() >= COMMAND_FRAME_SIZE {
            match self.codec.decode(&self.buffer[..COMMAND_FRAME_SIZE]) {
                Ok(frame) => {
                    self.buffer.advance(COMMAND_FRAME_SIZE);
                    self.stats.frames += 1;
                    debug!(%frame, "decoded command frame");
                    return Some(frame);
                }
                Err(e) => {
                    warn!(byte = self.buffer[0], error = %e, "discarding byte to resync");
                    self.buffer.advance(1);
                    self.stats.discarded_bytes += 1;
                }
            }
        }
        None
    }

    /// Drain every complete frame currently buffered.
    pub fn decode_all(&mut self) -> Vec<CommandFrame> {
        std::iter::from_fn(|| self.decode_next()).collect()
    }
}

#[derive(Debug, Default)]
pub struct TelemetryDecoder {
    codec: TelemetryCodec,
    buffer: BytesMut,
}

impl TelemetryDecoder {
    pub fn new(codec: TelemetryCodec) -> Self {
        Self {
            codec,
            buffer: BytesMut::with_capacity(TELEMETRY_RECORD_SIZE * 4),
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Forget any partial record.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Cut the next 12-byte record. The chunk is consumed even when the
    /// codec rejects it.
    pub fn decode_next(&mut self) -> Option<Result<TelemetryRecord>> {
        if self.buffer.len() < TELEMETRY_RECORD_SIZE {
            return None;
        }
        let chunk = self.buffer.split_to(TELEMETRY_RECORD_SIZE);
        Some(self.codec.decode(&chunk))
    }
}
