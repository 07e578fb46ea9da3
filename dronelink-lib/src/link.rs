use crate::config::LinkConfig;
use crate::error::{LinkError, Result};
use crate::frame::{CommandFrame, FrameCodec};
use crate::message::Command;
use crate::stream::TelemetryDecoder;
use crate::telemetry::TelemetryRecord;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const READ_CHUNK: usize = 64;

/// Ground station end of a link, bound to one transport.
///
/// The transport is anything byte oriented: a serial port, a TCP stream, or
/// an in-memory duplex in tests. Commands go out as 9-byte frames; the drone
/// answers TELEMETRY_REQUEST with one 12-byte record.
pub struct DroneLink<T> {
    io: T,
    config: LinkConfig,
    frame_codec: FrameCodec,
    telemetry: TelemetryDecoder,
}

impl<T: AsyncRead + AsyncWrite + Unpin> DroneLink<T> {
    pub fn new(io: T, config: LinkConfig) -> Self {
        Self {
            io,
            frame_codec: config.frame_codec(),
            telemetry: TelemetryDecoder::new(config.telemetry_codec()),
            config,
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Send a typed command to the configured drone.
    pub async fn send(&mut self, command: Command) -> Result<()> {
        let frame = command.to_frame(self.config.drone_id);
        self.send_frame(&frame).await
    }

    pub async fn send_frame(&mut self, frame: &CommandFrame) -> Result<()> {
        let bytes = self.frame_codec.encode(frame);
        self.io.write_all(&bytes).await?;
        self.io.flush().await?;
        info!("Sent {} to drone {}", frame.command, frame.drone_id);
        Ok(())
    }

    /// Wait for one telemetry record, bounded by the configured response
    /// timeout.
    ///
    /// A partial record left over from a timed out wait is dropped, since
    /// records carry no sync field to realign on.
    pub async fn receive_telemetry(&mut self) -> Result<TelemetryRecord> {
        let result = timeout(self.config.response_timeout(), self.read_record()).await;
        if result.is_err() && self.telemetry.buffered() > 0 {
            warn!("Dropping {} bytes of incomplete telemetry", self.telemetry.buffered());
            self.telemetry.clear();
        }
        result?
    }

    /// Send TELEMETRY_REQUEST and wait for the reply.
    ///
    /// Anything received before the request goes out (late replies, line
    /// noise) is discarded so the reply starts on a record boundary.
    pub async fn request_telemetry(&mut self) -> Result<TelemetryRecord> {
        self.discard_pending().await?;
        self.send(Command::TelemetryRequest).await?;
        self.receive_telemetry().await
    }

    /// Drop buffered telemetry and whatever the transport can hand over
    /// without waiting.
    async fn discard_pending(&mut self) -> Result<()> {
        let mut discarded = self.telemetry.buffered();
        self.telemetry.clear();

        let mut chunk = [0u8; READ_CHUNK];
        // A zero timeout still polls the read once before giving up
        while let Ok(read) = timeout(Duration::ZERO, self.io.read(&mut chunk)).await {
            match read? {
                0 => break,
                n => discarded += n,
            }
        }
        if discarded > 0 {
            warn!("Discarded {} stale bytes before telemetry request", discarded);
        }
        Ok(())
    }

    async fn read_record(&mut self) -> Result<TelemetryRecord> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(record) = self.telemetry.decode_next() {
                return record;
            }
            let n = self.io.read(&mut chunk).await?;
            if n == 0 {
                return Err(LinkError::ConnectionClosed);
            }
            debug!("Received {} bytes", n);
            self.telemetry.extend(&chunk[..n]);
        }
    }

    pub fn into_inner(self) -> T {
        self.io
    }
}
