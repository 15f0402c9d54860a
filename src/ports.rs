//! Serial port discovery.

use tracing::debug;

/// Names of the serial ports currently known to the OS, sorted. An OS
/// query failure is indistinguishable from "no ports".
pub fn list_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => {
            let mut names: Vec<String> = ports.into_iter().map(|p| p.port_name).collect();
            names.sort();
            names
        }
        Err(err) => {
            debug!(%err, "port enumeration failed");
            Vec::new()
        }
    }
}

/// Index to select after a wholesale list refresh: keep the previously
/// selected port if it survived, otherwise fall back to the first entry.
pub fn reselect(previous: Option<&str>, ports: &[String]) -> usize {
    previous
        .and_then(|name| ports.iter().position(|p| p == name))
        .unwrap_or(0)
}
