//! statline: sample host CPU/RAM/GPU utilization and stream it as text
//! lines over a serial port, with a small terminal dashboard for port
//! selection and connection control.

pub mod app;
pub mod gpu;
pub mod metrics;
pub mod monitor;
pub mod ports;
pub mod profiles;
pub mod session;
pub mod transport;
pub mod types;
pub mod ui;
