use anyhow::{Context, Result, bail};
use serde::Serialize;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dronelink_lib::constants::PAYLOAD_SIZE;
use dronelink_lib::stream::{FrameDecoder, TelemetryDecoder};
use dronelink_lib::{
    ByteOrder, ChecksumKind, Command, CommandFrame, CommandType, DroneLink, FlightMode, LinkConfig, TelemetryRecord,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::signal;
use tracing::{error, info, warn};

mod logging;
mod serial;

/// Ground station tool for the drone command-and-telemetry link.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON link configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Drone id to address, overriding the config file.
    #[arg(short, long, global = true)]
    drone_id: Option<u8>,
    /// Frame checksum (xor, sum, crc8), overriding the config file.
    #[arg(long, global = true)]
    checksum: Option<ChecksumKind>,
    /// Telemetry float byte order (big, little), overriding the config file.
    #[arg(long, global = true)]
    byte_order: Option<ByteOrder>,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List serial ports available on this host.
    Ports,
    /// Print the hex encoding of a command frame.
    Encode(CommandArgs),
    /// Decode a hex command frame.
    Decode { hex: String },
    /// Encode or decode telemetry records.
    Telemetry {
        #[command(subcommand)]
        action: TelemetryAction,
    },
    /// Send a command over a serial port. TELEMETRY_REQUEST waits for the reply.
    Send {
        /// Serial port, e.g. /dev/ttyUSB0 or COM3.
        port: String,
        #[command(flatten)]
        args: CommandArgs,
    },
    /// Decode a raw byte stream from a file, stdin (`-`) or a serial port.
    Monitor {
        source: String,
        /// What the stream carries.
        #[arg(short, long, value_enum, default_value_t = StreamKind::Commands)]
        kind: StreamKind,
        /// Treat SOURCE as a serial port instead of a file.
        #[arg(short, long)]
        serial: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TelemetryAction {
    /// Print the hex encoding of a telemetry record.
    Encode(TelemetryArgs),
    /// Decode a hex telemetry record.
    Decode {
        hex: String,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StreamKind {
    Commands,
    Telemetry,
}

#[derive(Args, Debug)]
struct CommandArgs {
    /// ARM, DISARM, TAKEOFF (or LAUNCH), LAND, POSHOLD, MODE_CHANGE, HEARTBEAT, TELEMETRY_REQUEST
    command: CommandType,
    /// Target flight mode for MODE_CHANGE.
    #[arg(short, long)]
    mode: Option<FlightMode>,
    /// Release position hold instead of engaging it (POSHOLD only).
    #[arg(long)]
    release: bool,
    /// Raw 6-byte payload in hex, sent verbatim instead of the typed argument.
    #[arg(short, long, value_parser = parse_payload)]
    payload: Option<[u8; PAYLOAD_SIZE]>,
}

impl CommandArgs {
    fn to_frame(&self, drone_id: u8) -> Result<CommandFrame> {
        if let Some(payload) = self.payload {
            return Ok(CommandFrame::new(self.command, drone_id, payload));
        }
        let command = match self.command {
            CommandType::ModeChange => Command::ModeChange(self.mode.context("MODE_CHANGE requires --mode")?),
            CommandType::PosHold => Command::PosHold(!self.release),
            other => Command::from(other),
        };
        Ok(command.to_frame(drone_id))
    }
}

#[derive(Args, Debug)]
struct TelemetryArgs {
    /// Altitude in meters.
    #[arg(long, allow_negative_numbers = true)]
    altitude: f32,
    /// Battery percentage.
    #[arg(long)]
    battery: f32,
    #[arg(long, default_value = "0", value_parser = parse_byte)]
    gps_status: u8,
    /// Flight mode name or raw code.
    #[arg(long, default_value = "STABILIZE", value_parser = parse_mode_code)]
    mode: u8,
    #[arg(long, default_value = "0", value_parser = parse_byte)]
    arm_status: u8,
    #[arg(long, default_value = "0", value_parser = parse_byte)]
    satellites: u8,
}

fn parse_payload(s: &str) -> Result<[u8; PAYLOAD_SIZE], String> {
    let bytes = hex::decode(s.trim_start_matches("0x")).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("payload must be {} bytes, got {}", PAYLOAD_SIZE, b.len()))
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| e.to_string())
}

fn parse_mode_code(s: &str) -> Result<u8, String> {
    match FlightMode::from_str(s) {
        Ok(mode) => Ok(mode.code()),
        Err(_) => parse_byte(s),
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(cleaned.trim_start_matches("0x")).with_context(|| format!("Invalid hex: {}", s))
}

fn load_config(cli: &Cli) -> Result<LinkConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            LinkConfig::from_json_file(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => LinkConfig::default(),
    };
    if let Some(drone_id) = cli.drone_id {
        config.drone_id = drone_id;
    }
    if let Some(checksum) = cli.checksum {
        config.checksum = checksum;
    }
    if let Some(byte_order) = cli.byte_order {
        config.byte_order = byte_order;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref(), &cli.verbose)?;

    let status = tokio::select! {
        res = run(cli) => exit_status(res),
        _ = signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down.");
            ExitCode::SUCCESS
        }
    };
    Ok(status)
}

/// Report a failed run. Returning instead of exiting lets the log guard
/// flush the file layer on the way out.
fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Commands::Ports => serial::list_ports(),
        Commands::Encode(args) => {
            let frame = args.to_frame(config.drone_id)?;
            println!("{}", hex::encode(config.frame_codec().encode(&frame)));
            Ok(())
        }
        Commands::Decode { hex } => {
            let frame = config.frame_codec().decode(&parse_hex(&hex)?)?;
            println!("{}", frame);
            match Command::try_from(&frame) {
                Ok(command) => println!("Command: {}", command),
                Err(e) => warn!("Payload does not match the typed command: {}", e),
            }
            Ok(())
        }
        Commands::Telemetry { action } => run_telemetry(action, &config),
        Commands::Send { port, args } => run_send(&port, &args, config).await,
        Commands::Monitor { source, kind, serial } => run_monitor(&source, kind, serial, &config).await,
    }
}

fn run_telemetry(action: TelemetryAction, config: &LinkConfig) -> Result<()> {
    let codec = config.telemetry_codec();
    match action {
        TelemetryAction::Encode(args) => {
            let record = TelemetryRecord::new(
                args.altitude,
                args.battery,
                args.gps_status,
                args.mode,
                args.arm_status,
                args.satellites,
            );
            println!("{}", hex::encode(codec.encode(&record)));
        }
        TelemetryAction::Decode { hex, json } => {
            let record = codec.decode(&parse_hex(&hex)?)?;
            if json {
                println!("{}", telemetry_json(&record)?);
            } else {
                println!("{}", record);
            }
        }
    }
    Ok(())
}

/// JSON shape of a decoded record: the raw fields plus their readable forms.
#[derive(Serialize)]
struct TelemetryView<'a> {
    #[serde(flatten)]
    record: &'a TelemetryRecord,
    mode: Option<String>,
    armed: bool,
}

fn telemetry_json(record: &TelemetryRecord) -> Result<String> {
    let view = TelemetryView {
        record,
        mode: record.flight_mode().ok().map(|m| m.to_string()),
        armed: record.is_armed(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

async fn run_send(port: &str, args: &CommandArgs, config: LinkConfig) -> Result<()> {
    let frame = args.to_frame(config.drone_id)?;
    let stream = serial::open(port, config.baud_rate)?;
    let mut link = DroneLink::new(stream, config);

    link.send_frame(&frame).await?;
    if frame.command == CommandType::TelemetryRequest {
        let record = link
            .receive_telemetry()
            .await
            .context("No telemetry reply from drone")?;
        println!("{}", record);
    }
    Ok(())
}

async fn run_monitor(source: &str, kind: StreamKind, serial: bool, config: &LinkConfig) -> Result<()> {
    let mut reader: Box<dyn AsyncRead + Unpin + Send> = if serial {
        Box::new(serial::open(source, config.baud_rate)?)
    } else if source == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(
            tokio::fs::File::open(source)
                .await
                .with_context(|| format!("Failed to open {}", source))?,
        )
    };

    info!(%source, ?kind, "Monitoring stream");
    let mut frames = FrameDecoder::new(config.frame_codec());
    let mut records = TelemetryDecoder::new(config.telemetry_codec());
    let mut chunk = [0u8; 256];
    let mut count = 0u64;

    loop {
        let n = reader.read(&mut chunk).await.context("Read from stream failed")?;
        if n == 0 {
            break;
        }
        match kind {
            StreamKind::Commands => {
                frames.extend(&chunk[..n]);
                while let Some(frame) = frames.decode_next() {
                    count += 1;
                    info!("[Frame {}] {}", count, frame);
                }
            }
            StreamKind::Telemetry => {
                records.extend(&chunk[..n]);
                while let Some(result) = records.decode_next() {
                    count += 1;
                    match result {
                        Ok(record) => info!("[Record {}] {}", count, record),
                        Err(e) => warn!("[Record {}] rejected: {}", count, e),
                    }
                }
            }
        }
    }

    let leftover = match kind {
        StreamKind::Commands => {
            let stats = frames.stats();
            info!(frames = stats.frames, discarded = stats.discarded_bytes, "End of stream");
            frames.buffered()
        }
        StreamKind::Telemetry => {
            info!(records = count, "End of stream");
            records.buffered()
        }
    };
    if leftover > 0 {
        warn!("{} trailing bytes did not form a complete item", leftover);
    }
    if count == 0 {
        bail!("No {:?} decoded from {}", kind, source);
    }
    Ok(())
}
