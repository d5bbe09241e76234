//! Terminal output utilities.
//!
//! Provides formatting helpers for the network interface listing.

use crate::models::NetworkInterface;
use colored::Colorize;

/// Width of the label column, including the trailing colon.
const LABEL_WIDTH: usize = 29;

/// Format a `label: value` line with the value column aligned.
///
/// # Arguments
/// * `label` - The field name, without colon
/// * `value` - The value to show
///
/// # Returns
/// A tab indented line without trailing newline
pub fn format_field<T: ToString>(label: &str, value: T) -> String {
    let label = format!("{label}:");
    format!("\t{label:<LABEL_WIDTH$}{}", value.to_string())
}

/// Basic info about a network interface, one field per line.
pub fn format_nic(nic: &NetworkInterface) -> String {
    let none = || "none".to_string();
    let config = nic.first_ip_configuration().map(|c| &c.properties);

    let lines = [
        format!("Network interface '{}'", nic.name().bold()),
        format_field("Location", &nic.location),
        format_field("IP forwarding enabled", nic.ip_forwarding()),
        format_field(
            "MAC address",
            nic.properties.mac_address.clone().unwrap_or_else(none),
        ),
        format_field(
            "Private IP",
            config
                .and_then(|c| c.private_ip_address.clone())
                .unwrap_or_else(none),
        ),
        format_field(
            "Private allocation method",
            config
                .and_then(|c| c.private_ip_allocation_method.clone())
                .unwrap_or_else(none),
        ),
        format_field(
            "Primary virtual network ID",
            config
                .and_then(|c| c.subnet.as_ref())
                .and_then(|s| s.id.clone())
                .unwrap_or_else(none),
        ),
    ];
    lines.join("\n")
}

pub fn print_nic(nic: &NetworkInterface) {
    println!("{}\n", format_nic(nic));
}
