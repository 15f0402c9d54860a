//! Background monitor loop: once per tick, sample the host, publish the
//! reading for the UI, and write one wire-format line to the transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::metrics::Sampler;
use crate::session::SharedTransport;
use crate::types::{ConnectionState, Sample};

pub struct MonitorCtx {
    pub slot: SharedTransport,
    pub streaming: Arc<AtomicBool>,
    pub stop: Arc<Notify>,
    pub state: Arc<RwLock<ConnectionState>>,
    pub latest: Arc<RwLock<Option<Sample>>>,
}

pub fn spawn(ctx: MonitorCtx, mut sampler: Sampler, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first CPU refresh only establishes the measurement baseline;
        // its reading is a zero-interval artifact and is never sent.
        ticker.tick().await;
        sampler.prime();

        loop {
            tokio::select! {
                _ = ctx.stop.notified() => break,
                _ = ticker.tick() => {}
            }
            if !ctx.streaming.load(Ordering::Relaxed) {
                break;
            }

            let sample = sampler.sample();
            *ctx.latest.write().await = Some(sample);

            let mut slot = ctx.slot.lock().await;
            let Some(transport) = slot.as_mut() else {
                break;
            };
            if let Err(err) = transport.write_line(&sample.wire_format()) {
                warn!(%err, "serial write failed, dropping connection");
                drop(slot);
                teardown(&ctx).await;
                break;
            }
        }
        debug!("monitor loop stopped");
    })
}

// Failure path: the loop performs the same teardown the session would, so
// the UI sees a plain disconnect rather than an error.
async fn teardown(ctx: &MonitorCtx) {
    ctx.streaming.store(false, Ordering::Relaxed);
    ctx.slot.lock().await.take();
    *ctx.state.write().await = ConnectionState::Disconnected;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Transport, TransportError};
    use std::io;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;
    use tokio::time::sleep;

    // Records delivered lines (terminator included) and fails every write
    // after the first `fail_after`.
    struct ScriptedTransport {
        written: Arc<StdMutex<Vec<String>>>,
        fail_after: usize,
    }

    impl Transport for ScriptedTransport {
        fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
            let mut written = self.written.lock().unwrap();
            if written.len() >= self.fail_after {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "device unplugged",
                )));
            }
            written.push(format!("{line}\n"));
            Ok(())
        }
    }

    fn ctx_with(fail_after: usize) -> (MonitorCtx, Arc<StdMutex<Vec<String>>>) {
        let written = Arc::new(StdMutex::new(Vec::new()));
        let transport = ScriptedTransport {
            written: written.clone(),
            fail_after,
        };
        let ctx = MonitorCtx {
            slot: Arc::new(Mutex::new(Some(
                Box::new(transport) as Box<dyn Transport>
            ))),
            streaming: Arc::new(AtomicBool::new(true)),
            stop: Arc::new(Notify::new()),
            state: Arc::new(RwLock::new(ConnectionState::Connected)),
            latest: Arc::new(RwLock::new(None)),
        };
        (ctx, written)
    }

    #[tokio::test(start_paused = true)]
    async fn failing_write_stops_after_prior_successes() {
        let (ctx, written) = ctx_with(3);
        let slot = ctx.slot.clone();
        let streaming = ctx.streaming.clone();
        let state = ctx.state.clone();

        // Fails on the 4th write: exactly 3 lines must go out.
        let task = spawn(ctx, Sampler::new(), Duration::from_secs(1));
        task.await.unwrap();

        let lines = written.lock().unwrap().clone();
        assert_eq!(lines.len(), 3);
        assert!(!streaming.load(Ordering::Relaxed));
        assert!(slot.lock().await.is_none());
        assert_eq!(*state.read().await, ConnectionState::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn lines_match_the_wire_format() {
        let (ctx, written) = ctx_with(1);
        let task = spawn(ctx, Sampler::new(), Duration::from_secs(1));
        task.await.unwrap();

        let lines = written.lock().unwrap().clone();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.starts_with("CPU:"), "bad line: {line}");
        assert!(line.contains(" RAM:"), "bad line: {line}");
        assert!(line.contains(" GPU:"), "bad line: {line}");
        assert!(line.ends_with('\n'), "bad line: {line}");
        assert!(!line.contains("  "), "padded line: {line}");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_notify_ends_the_loop() {
        let (ctx, written) = ctx_with(usize::MAX);
        let streaming = ctx.streaming.clone();
        let stop = ctx.stop.clone();

        let task = spawn(ctx, Sampler::new(), Duration::from_secs(1));
        sleep(Duration::from_millis(3500)).await;

        streaming.store(false, Ordering::Relaxed);
        stop.notify_waiters();
        task.await.unwrap();

        let n = written.lock().unwrap().len();
        assert!(n >= 1);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(written.lock().unwrap().len(), n);
    }

    #[tokio::test(start_paused = true)]
    async fn emptied_slot_ends_the_loop() {
        let (ctx, written) = ctx_with(usize::MAX);
        let slot = ctx.slot.clone();
        let latest = ctx.latest.clone();

        let task = spawn(ctx, Sampler::new(), Duration::from_secs(1));
        sleep(Duration::from_millis(1500)).await;
        assert!(latest.read().await.is_some());

        slot.lock().await.take();
        task.await.unwrap();

        assert!(!written.lock().unwrap().is_empty());
    }
}
