//! Core data types shared by the sampler, the transport, and the UI.

use std::fmt;

/// One utilization snapshot. All values are integer percentages 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub cpu: u8,
    pub ram: u8,
    pub gpu: u8,
}

impl Sample {
    /// Body of the serial record: fixed key order, single spaces, no
    /// padding. The transport appends the line terminator.
    pub fn wire_format(&self) -> String {
        format!("CPU:{} RAM:{} GPU:{}", self.cpu, self.ram, self.gpu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}
