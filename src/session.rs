//! Connection lifecycle. The `Session` is the single owner of the
//! transport handle and the streaming flag; the monitor task only ever
//! borrows them through the shared link it was spawned with.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::info;

use crate::metrics::Sampler;
use crate::monitor::{self, MonitorCtx};
use crate::transport::{SerialTransport, Transport, TransportError};
use crate::types::{ConnectionState, Sample};

pub const DEFAULT_BAUD: u32 = 115_200;
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);
pub const SERIAL_TIMEOUT: Duration = Duration::from_secs(1);

/// The transport slot a monitor task writes through. Emptied on
/// disconnect; the task exits when it finds the slot empty.
pub type SharedTransport = Arc<Mutex<Option<Box<dyn Transport>>>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("serial port unavailable: {0}")]
    PortUnavailable(#[source] TransportError),
}

// Everything a single connection attempt owns. Each connect creates a
// fresh bundle, so a still-draining old task can never write through a
// newer connection's transport.
struct Link {
    slot: SharedTransport,
    streaming: Arc<AtomicBool>,
    stop: Arc<Notify>,
    task: JoinHandle<()>,
}

pub struct Session {
    baud: u32,
    port: Option<String>,
    state: Arc<RwLock<ConnectionState>>,
    latest: Arc<RwLock<Option<Sample>>>,
    link: Option<Link>,
}

impl Session {
    pub fn new(baud: u32) -> Self {
        Self {
            baud,
            port: None,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            latest: Arc::new(RwLock::new(None)),
            link: None,
        }
    }

    /// Open `port` and start streaming. A no-op while a monitor task is
    /// still live, so back-to-back connects never stack two loops. On
    /// failure the state stays `Disconnected`.
    pub async fn connect(&mut self, port: &str) -> Result<(), SessionError> {
        if self.streaming_live() {
            return Ok(());
        }
        let transport = SerialTransport::open(port, self.baud, SERIAL_TIMEOUT)
            .map_err(SessionError::PortUnavailable)?;
        self.attach(Box::new(transport)).await;
        self.port = Some(port.to_string());
        info!(port, baud = self.baud, "connected");
        Ok(())
    }

    /// Stop streaming and release the port. Idempotent; safe to call at
    /// any time, including after the loop already tore itself down.
    pub async fn disconnect(&mut self) {
        *self.state.write().await = ConnectionState::Disconnected;
        if let Some(link) = self.link.take() {
            link.streaming.store(false, Ordering::Relaxed);
            // Dropping the handle releases the OS port.
            link.slot.lock().await.take();
            link.stop.notify_waiters();
            info!("disconnected");
        }
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Latest published reading, if any iteration has completed yet.
    pub async fn latest(&self) -> Option<Sample> {
        *self.latest.read().await
    }

    /// Target of the most recent successful connect.
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    fn streaming_live(&self) -> bool {
        self.link.as_ref().is_some_and(|l| !l.task.is_finished())
    }

    // Install a transport and spawn the monitor task for it. Returns false
    // (without touching anything) while a previous task is still live.
    async fn attach(&mut self, transport: Box<dyn Transport>) -> bool {
        if self.streaming_live() {
            return false;
        }
        let slot: SharedTransport = Arc::new(Mutex::new(Some(transport)));
        let streaming = Arc::new(AtomicBool::new(true));
        let stop = Arc::new(Notify::new());
        *self.state.write().await = ConnectionState::Connected;

        let ctx = MonitorCtx {
            slot: slot.clone(),
            streaming: streaming.clone(),
            stop: stop.clone(),
            state: self.state.clone(),
            latest: self.latest.clone(),
        };
        let task = monitor::spawn(ctx, Sampler::new(), SAMPLE_PERIOD);

        self.link = Some(Link {
            slot,
            streaming,
            stop,
            task,
        });
        true
    }
}
