use crate::command::{CommandType, FlightMode};
use crate::constants::PAYLOAD_SIZE;
use crate::error::LinkError;
use crate::frame::CommandFrame;
use std::fmt;

/// A typed command as issued by the ground station.
///
/// Only POSHOLD and MODE_CHANGE carry an argument, in payload byte 0. Every
/// other payload byte is written as zero and ignored when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Arm,
    Disarm,
    Takeoff,
    Land,
    /// `true` engages position hold, `false` releases it
    PosHold(bool),
    ModeChange(FlightMode),
    Heartbeat,
    TelemetryRequest,
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Arm => CommandType::Arm,
            Command::Disarm => CommandType::Disarm,
            Command::Takeoff => CommandType::Takeoff,
            Command::Land => CommandType::Land,
            Command::PosHold(_) => CommandType::PosHold,
            Command::ModeChange(_) => CommandType::ModeChange,
            Command::Heartbeat => CommandType::Heartbeat,
            Command::TelemetryRequest => CommandType::TelemetryRequest,
        }
    }

    /// Build the frame addressed to `drone_id`.
    pub fn to_frame(self, drone_id: u8) -> CommandFrame {
        let mut payload = [0u8; PAYLOAD_SIZE];
        match self {
            Command::PosHold(engage) => payload[0] = engage as u8,
            Command::ModeChange(mode) => payload[0] = mode.code(),
            _ => {}
        }
        CommandFrame::new(self.command_type(), drone_id, payload)
    }
}

impl TryFrom<&CommandFrame> for Command {
    type Error = LinkError;

    fn try_from(frame: &CommandFrame) -> Result<Self, Self::Error> {
        let arg = frame.payload[0];
        Ok(match frame.command {
            CommandType::Arm => Command::Arm,
            CommandType::Disarm => Command::Disarm,
            CommandType::Takeoff => Command::Takeoff,
            CommandType::Land => Command::Land,
            CommandType::PosHold => Command::PosHold(arg != 0),
            CommandType::ModeChange => Command::ModeChange(FlightMode::from_code(arg)?),
            CommandType::Heartbeat => Command::Heartbeat,
            CommandType::TelemetryRequest => Command::TelemetryRequest,
        })
    }
}

impl TryFrom<CommandFrame> for Command {
    type Error = LinkError;

    fn try_from(frame: CommandFrame) -> Result<Self, Self::Error> {
        Command::try_from(&frame)
    }
}

impl From<CommandType> for Command {
    /// Commands without an argument map directly; POSHOLD defaults to engage
    /// and MODE_CHANGE to STABILIZE.
    fn from(command: CommandType) -> Self {
        match command {
            CommandType::Arm => Command::Arm,
            CommandType::Disarm => Command::Disarm,
            CommandType::Takeoff => Command::Takeoff,
            CommandType::Land => Command::Land,
            CommandType::PosHold => Command::PosHold(true),
            CommandType::ModeChange => Command::ModeChange(FlightMode::Stabilize),
            CommandType::Heartbeat => Command::Heartbeat,
            CommandType::TelemetryRequest => Command::TelemetryRequest,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PosHold(true) => write!(f, "POSHOLD_ON"),
            Command::PosHold(false) => write!(f, "POSHOLD_OFF"),
            Command::ModeChange(mode) => write!(f, "MODE_CHANGE {}", mode),
            other => write!(f, "{}", other.command_type()),
        }
    }
}
