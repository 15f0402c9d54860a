//! Sample collection using sysinfo, with the GPU read delegated to gpu.rs.

use once_cell::sync::OnceCell;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::{debug, warn};

use crate::gpu;
use crate::types::Sample;

// Runtime toggle (read once). Disable with STATLINE_GPU=0 on hosts where
// probing the adapter is slow or noisy.
fn gpu_enabled() -> bool {
    static ON: OnceCell<bool> = OnceCell::new();
    *ON.get_or_init(|| {
        std::env::var("STATLINE_GPU")
            .map(|v| v != "0")
            .unwrap_or(true)
    })
}

pub struct Sampler {
    sys: System,
}

impl Sampler {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        if gpu_enabled() {
            if let Err(err) = gpu::core_load() {
                warn!(%err, "gpu probe failed, will report 0");
            }
        }
        Self { sys }
    }

    /// Establish the CPU usage baseline. The first reading after
    /// construction is a zero-interval artifact; callers prime once and
    /// discard it. Memory and GPU reads need no baseline and are not
    /// primed.
    pub fn prime(&mut self) {
        self.sys.refresh_cpu_usage();
    }

    pub fn sample(&mut self) -> Sample {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();

        let cpu = self.sys.global_cpu_usage().clamp(0.0, 100.0).round() as u8;

        let total = self.sys.total_memory();
        let ram = if total > 0 {
            (self.sys.used_memory() as f64 / total as f64 * 100.0)
                .clamp(0.0, 100.0)
                .round() as u8
        } else {
            0
        };

        let gpu = if gpu_enabled() {
            gpu::core_load().unwrap_or_else(|err| {
                debug!(%err, "gpu read failed");
                0
            })
        } else {
            0
        };

        Sample { cpu, ram, gpu }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
