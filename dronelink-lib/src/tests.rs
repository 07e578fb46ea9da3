use crate::checksum::{Checksum, ChecksumKind, Crc8, Sum8, Xor8};
use crate::command::{CommandType, FlightMode};
use crate::error::LinkError;
use crate::frame::{CommandFrame, FrameCodec};
use crate::message::Command;
use crate::telemetry::{ByteOrder, TelemetryCodec, TelemetryRecord};
use std::str::FromStr;

#[test]
fn test_encode_arm_frame_xor() {
    let frame = CommandFrame::empty(CommandType::Arm, 0x05);
    let bytes = FrameCodec::new(Xor8).encode(&frame);
    assert_eq!(hex::encode(bytes), "010500000000000004");
}

#[test]
fn test_encode_arm_frame_sum_and_crc() {
    let frame = CommandFrame::empty(CommandType::Arm, 0x05);
    assert_eq!(FrameCodec::new(Sum8).encode(&frame)[8], 0x06);
    assert_eq!(FrameCodec::new(Crc8).encode(&frame)[8], 0xb9);
}

#[test]
fn test_crc8_check_value() {
    // CRC-8/SMBUS catalogue check value
    assert_eq!(Crc8.compute(b"123456789"), 0xf4);
}

#[test]
fn test_checksum_kind_dispatch() {
    let data = [0x06, 0x01, 0x03, 0, 0, 0, 0, 0];
    assert_eq!(ChecksumKind::Xor.compute(&data), Xor8.compute(&data));
    assert_eq!(ChecksumKind::Sum.compute(&data), Sum8.compute(&data));
    assert_eq!(ChecksumKind::Crc8.compute(&data), 0xce);
}

#[test]
fn test_sum8_wraps() {
    assert_eq!(Sum8.compute(&[0xff, 0x02]), 0x01);
}

#[test]
fn test_decode_mode_change_frame() {
    let bytes = hex::decode("060103000000000004").unwrap();
    let frame = FrameCodec::<ChecksumKind>::default().decode(&bytes).unwrap();
    assert_eq!(frame.command, CommandType::ModeChange);
    assert_eq!(frame.drone_id, 1);
    assert_eq!(Command::try_from(&frame).unwrap(), Command::ModeChange(FlightMode::Loiter));
}

#[test]
fn test_decode_checksum_mismatch_reports_both_values() {
    let bytes = hex::decode("010500000000000099").unwrap();
    match FrameCodec::new(Xor8).decode(&bytes) {
        Err(LinkError::ChecksumMismatch { expected, actual }) => {
            assert_eq!(expected, 0x04);
            assert_eq!(actual, 0x99);
        }
        other => panic!("Expected ChecksumMismatch, got {:?}", other),
    }
}

#[test]
fn test_command_type_codes() {
    for (i, command) in CommandType::ALL.iter().enumerate() {
        assert_eq!(command.code(), i as u8 + 1);
        assert_eq!(CommandType::from_code(i as u8 + 1).unwrap(), *command);
    }
    assert!(matches!(CommandType::from_code(0), Err(LinkError::InvalidCommand(0))));
    assert!(matches!(CommandType::from_code(9), Err(LinkError::InvalidCommand(9))));
}

#[test]
fn test_command_type_names() {
    assert_eq!(CommandType::TelemetryRequest.to_string(), "TELEMETRY_REQUEST");
    assert_eq!(CommandType::PosHold.to_string(), "POSHOLD");
    assert_eq!(CommandType::from_str("arm").unwrap(), CommandType::Arm);
    assert_eq!(CommandType::from_str("LAUNCH").unwrap(), CommandType::Takeoff);
    assert_eq!(CommandType::from_str("mode_change").unwrap(), CommandType::ModeChange);
    assert!(CommandType::from_str("FLIP").is_err());
}

#[test]
fn test_flight_mode_names_and_codes() {
    assert_eq!(FlightMode::from_str("althold").unwrap(), FlightMode::AltHold);
    assert_eq!(FlightMode::Rtl.to_string(), "RTL");
    assert_eq!(FlightMode::Auto.code(), 0x05);
    assert!(matches!(FlightMode::from_code(0x06), Err(LinkError::InvalidFlightMode(0x06))));
}

#[test]
fn test_command_payload_convention() {
    let frame = Command::PosHold(true).to_frame(2);
    assert_eq!(frame.payload, [1, 0, 0, 0, 0, 0]);
    let frame = Command::PosHold(false).to_frame(2);
    assert_eq!(frame.payload, [0; 6]);
    let frame = Command::ModeChange(FlightMode::Rtl).to_frame(2);
    assert_eq!(frame.payload, [4, 0, 0, 0, 0, 0]);
    let frame = Command::Takeoff.to_frame(2);
    assert_eq!(frame.command, CommandType::Takeoff);
    assert_eq!(frame.payload, [0; 6]);
}

#[test]
fn test_command_from_frame_invalid_mode() {
    let frame = CommandFrame::new(CommandType::ModeChange, 1, [0x09, 0, 0, 0, 0, 0]);
    assert!(matches!(Command::try_from(frame), Err(LinkError::InvalidFlightMode(0x09))));
}

#[test]
fn test_command_display() {
    assert_eq!(Command::PosHold(true).to_string(), "POSHOLD_ON");
    assert_eq!(Command::ModeChange(FlightMode::Loiter).to_string(), "MODE_CHANGE LOITER");
    assert_eq!(Command::Heartbeat.to_string(), "HEARTBEAT");
}

#[test]
fn test_telemetry_encode_big_endian() {
    let record = TelemetryRecord::new(12.5, 87.0, 3, 0x03, 1, 9);
    let bytes = TelemetryCodec::default().encode(&record);
    assert_eq!(hex::encode(bytes), "4148000042ae000003030109");
}

#[test]
fn test_telemetry_encode_little_endian() {
    let record = TelemetryRecord::new(12.5, 87.0, 3, 0x03, 1, 9);
    let bytes = TelemetryCodec::new(ByteOrder::Little).encode(&record);
    assert_eq!(hex::encode(bytes), "000048410000ae4203030109");
}

#[test]
fn test_telemetry_accessors() {
    let record = TelemetryRecord::new(0.0, 50.0, 0, 0x02, 0, 0);
    assert_eq!(record.flight_mode().unwrap(), FlightMode::AltHold);
    assert!(!record.is_armed());
    let record = TelemetryRecord::new(0.0, 50.0, 0, 0x42, 7, 0);
    assert!(record.flight_mode().is_err());
    assert!(record.is_armed());
}

#[test]
fn test_telemetry_display() {
    let record = TelemetryRecord::new(12.5, 87.0, 3, 0x03, 1, 9);
    assert_eq!(
        record.to_string(),
        "Alt: 12.50 m, Battery: 87.0 %, GPS: 3, Sats: 9, Mode: LOITER, ARMED"
    );
    let record = TelemetryRecord::new(0.0, 0.0, 0, 0x7f, 0, 0);
    assert!(record.to_string().contains("UNKNOWN(0x7f)"));
    assert!(record.to_string().ends_with("DISARMED"));
}
