use crate::error::LinkError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumString};

/// Command codes carried in byte 0 of a command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, TryFromPrimitive, IntoPrimitive)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum CommandType {
    #[strum(to_string = "ARM")]
    Arm = 0x01,
    #[strum(to_string = "DISARM")]
    Disarm = 0x02,
    // The ground station UI labels this button "LAUNCH"
    #[strum(to_string = "TAKEOFF", serialize = "LAUNCH")]
    Takeoff = 0x03,
    #[strum(to_string = "LAND")]
    Land = 0x04,
    #[strum(to_string = "POSHOLD")]
    PosHold = 0x05,
    #[strum(to_string = "MODE_CHANGE")]
    ModeChange = 0x06,
    #[strum(to_string = "HEARTBEAT")]
    Heartbeat = 0x07,
    #[strum(to_string = "TELEMETRY_REQUEST")]
    TelemetryRequest = 0x08,
}

impl CommandType {
    /// Every defined command, in code order.
    pub const ALL: [CommandType; 8] = [
        CommandType::Arm,
        CommandType::Disarm,
        CommandType::Takeoff,
        CommandType::Land,
        CommandType::PosHold,
        CommandType::ModeChange,
        CommandType::Heartbeat,
        CommandType::TelemetryRequest,
    ];

    /// Look up a command by its wire code.
    pub fn from_code(code: u8) -> Result<Self, LinkError> {
        Self::try_from(code).map_err(|_| LinkError::InvalidCommand(code))
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

/// Flight modes reported in telemetry and requested by MODE_CHANGE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, TryFromPrimitive, IntoPrimitive)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum FlightMode {
    #[strum(to_string = "STABILIZE")]
    Stabilize = 0x01,
    #[strum(to_string = "ALTHOLD")]
    AltHold = 0x02,
    #[strum(to_string = "LOITER")]
    Loiter = 0x03,
    #[strum(to_string = "RTL")]
    Rtl = 0x04,
    #[strum(to_string = "AUTO")]
    Auto = 0x05,
}

impl FlightMode {
    pub const ALL: [FlightMode; 5] = [
        FlightMode::Stabilize,
        FlightMode::AltHold,
        FlightMode::Loiter,
        FlightMode::Rtl,
        FlightMode::Auto,
    ];

    /// Look up a flight mode by its wire code.
    pub fn from_code(code: u8) -> Result<Self, LinkError> {
        Self::try_from(code).map_err(|_| LinkError::InvalidFlightMode(code))
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}
