use serialport::{SerialPortInfo, SerialPortType};
use tracing::debug;

use crate::{Error, Result};

/// A serial port a programming cable may be attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePort {
    pub path: String,
    pub manufacturer: Option<String>,
    pub product_id: Option<u16>,
}

impl DevicePort {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            manufacturer: None,
            product_id: None,
        }
    }

    pub fn from_info(info: &SerialPortInfo) -> Self {
        match &info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                path: info.port_name.clone(),
                manufacturer: usb.manufacturer.clone(),
                product_id: Some(usb.pid),
            },
            _ => Self::new(info.port_name.clone()),
        }
    }

    /// Menu label, e.g. `/dev/ttyUSB0 - Prolific - 2303`.
    pub fn label(&self) -> String {
        let mut name = self.path.clone();
        if let Some(manufacturer) = &self.manufacturer {
            name.push_str(" - ");
            name.push_str(manufacturer);
        }
        if let Some(pid) = self.product_id {
            name.push_str(&format!(" - {:04x}", pid));
        }
        name
    }
}

/// Convert macOS /dev/tty.* ports to /dev/cu.* ports
///
/// On macOS, /dev/tty.* ports block on open until carrier detect, so the
/// /dev/cu.* callout device is used instead. Other platforms pass through.
pub fn normalize_port_name(port_name: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        if port_name.starts_with("/dev/tty.") {
            return port_name.replace("/dev/tty.", "/dev/cu.");
        }
    }
    port_name.to_string()
}

/// Programming cables show up with "USB" in their device path, e.g.
/// `/dev/ttyUSB0`. The match is case-sensitive.
pub fn is_usb_path(path: &str) -> bool {
    path.contains("USB")
}

/// Keeps USB ports only, normalising names and dropping duplicates while
/// preserving discovery order.
pub fn select_usb_ports(ports: impl IntoIterator<Item = DevicePort>) -> Vec<DevicePort> {
    let mut selected: Vec<DevicePort> = Vec::new();
    for mut port in ports {
        port.path = normalize_port_name(&port.path);
        if !is_usb_path(&port.path) {
            continue;
        }
        if selected.iter().any(|p| p.path == port.path) {
            continue;
        }
        selected.push(port);
    }
    selected
}

/// Lists USB serial ports currently attached.
///
/// Returns [`Error::NoDeviceFound`] when none are present.
pub fn discover_usb_ports() -> Result<Vec<DevicePort>> {
    let ports = serialport::available_ports()?;
    debug!(count = ports.len(), "serial ports enumerated");

    let ports = select_usb_ports(ports.iter().map(DevicePort::from_info));
    if ports.is_empty() {
        return Err(Error::NoDeviceFound);
    }
    Ok(ports)
}

/// Check if the specified serial port is among the discovered ones
pub fn find_port<'a>(ports: &'a [DevicePort], port_name: &str) -> Result<&'a DevicePort> {
    let port_name = normalize_port_name(port_name);
    ports.iter().find(|p| p.path == port_name).ok_or_else(|| {
        let available: Vec<&str> = ports.iter().map(|p| p.path.as_str()).collect();
        Error::invalid_input(format!(
            "The specified port '{}' does not exist. Available ports: {}",
            port_name,
            if available.is_empty() {
                "No available ports".to_string()
            } else {
                available.join(", ")
            }
        ))
    })
}
