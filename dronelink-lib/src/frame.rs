//! # Command Frame
//!
//! A command frame is exactly nine bytes, with no padding:
//!
//! ```text
//! ┌──────────┬──────────┬────────────────────┬──────────┐
//! │ Type(1B) │ Drone(1B)│ Payload (6B)       │ Check(1B)│
//! │ byte 0   │ byte 1   │ bytes 2..=7        │ byte 8   │
//! └──────────┴──────────┴────────────────────┴──────────┘
//! ```
//!
//! The checksum covers bytes 0..8 and is produced by whichever [`Checksum`]
//! the codec was built with.

use crate::checksum::{Checksum, ChecksumKind};
use crate::command::CommandType;
use crate::constants::{CHECKSUM_COVERAGE, COMMAND_FRAME_SIZE, OFFSET_CHECKSUM, PAYLOAD_SIZE};
use crate::error::{LinkError, Result};
use bytes::{Buf, BufMut};
use std::fmt;
use tracing::trace;

/// A decoded command frame. The checksum is not stored; it is derived on
/// encode and verified on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    pub command: CommandType,
    pub drone_id: u8,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl CommandFrame {
    pub fn new(command: CommandType, drone_id: u8, payload: [u8; PAYLOAD_SIZE]) -> Self {
        Self {
            command,
            drone_id,
            payload,
        }
    }

    /// A frame with an all-zero payload.
    pub fn empty(command: CommandType, drone_id: u8) -> Self {
        Self::new(command, drone_id, [0; PAYLOAD_SIZE])
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (0x{:02x}) -> drone {} payload [{}]",
            self.command,
            self.command.code(),
            self.drone_id,
            hex::encode(self.payload)
        )
    }
}

/// Encoder/decoder for [`CommandFrame`], parameterised by checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCodec<C = ChecksumKind> {
    checksum: C,
}

impl<C: Checksum> FrameCodec<C> {
    pub fn new(checksum: C) -> Self {
        Self { checksum }
    }

    pub fn checksum(&self) -> &C {
        &self.checksum
    }

    pub fn encode(&self, frame: &CommandFrame) -> [u8; COMMAND_FRAME_SIZE] {
        self.encode_parts(frame.command.code(), frame.drone_id, &frame.payload)
    }

    /// Encode from an untyped message type, rejecting codes outside the
    /// defined command set.
    pub fn encode_raw(
        &self,
        message_type: u8,
        drone_id: u8,
        payload: [u8; PAYLOAD_SIZE],
    ) -> Result<[u8; COMMAND_FRAME_SIZE]> {
        CommandType::from_code(message_type)?;
        Ok(self.encode_parts(message_type, drone_id, &payload))
    }

    fn encode_parts(&self, message_type: u8, drone_id: u8, payload: &[u8; PAYLOAD_SIZE]) -> [u8; COMMAND_FRAME_SIZE] {
        let mut out = [0u8; COMMAND_FRAME_SIZE];
        {
            let mut dst = &mut out[..CHECKSUM_COVERAGE];
            dst.put_u8(message_type);
            dst.put_u8(drone_id);
            dst.put_slice(payload);
        }
        out[OFFSET_CHECKSUM] = self.checksum.compute(&out[..CHECKSUM_COVERAGE]);
        trace!(frame = %hex::encode(out), "encoded command frame");
        out
    }

    /// Decode exactly one frame.
    ///
    /// The message type is validated before the checksum, so an undefined
    /// type is always reported as [`LinkError::InvalidCommand`].
    pub fn decode(&self, bytes: &[u8]) -> Result<CommandFrame> {
        if bytes.len() != COMMAND_FRAME_SIZE {
            return Err(LinkError::InvalidLength {
                expected: COMMAND_FRAME_SIZE,
                actual: bytes.len(),
            });
        }

        let mut src = bytes;
        let command = CommandType::from_code(src.get_u8())?;
        let drone_id = src.get_u8();
        let mut payload = [0u8; PAYLOAD_SIZE];
        src.copy_to_slice(&mut payload);
        let actual = src.get_u8();

        self.checksum
            .verify(&bytes[..CHECKSUM_COVERAGE], actual)
            .map_err(|expected| LinkError::ChecksumMismatch { expected, actual })?;

        Ok(CommandFrame {
            command,
            drone_id,
            payload,
        })
    }
}
