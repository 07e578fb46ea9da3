use anyhow::{Context, Result};
use tokio_serial::{SerialPortBuilderExt, SerialPortType, SerialStream};
use tracing::info;

pub fn open(port: &str, baud_rate: u32) -> Result<SerialStream> {
    let stream = tokio_serial::new(port, baud_rate)
        .open_native_async()
        .with_context(|| format!("Failed to open serial port {}", port))?;
    info!(port, baud_rate, "Serial port opened");
    Ok(stream)
}

/// Print every serial port the OS reports, unfiltered.
pub fn list_ports() -> Result<()> {
    let ports = tokio_serial::available_ports().context("Failed to list serial ports")?;
    if ports.is_empty() {
        info!("No serial ports found.");
        return Ok(());
    }
    for port in ports {
        println!("{:<24} {}", port.port_name, describe(&port.port_type));
    }
    Ok(())
}

fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => format!(
            "USB {:04x}:{:04x} {} {}",
            usb.vid,
            usb.pid,
            usb.manufacturer.as_deref().unwrap_or("<unknown manufacturer>"),
            usb.product.as_deref().unwrap_or("<unknown product>")
        ),
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "Unknown".to_string(),
    }
}
