// gpu.rs
use gfxinfo::active_gpu;

/// Core load of the active GPU as a percentage. Errors when no supported
/// adapter is present; callers treat that as a plain 0 reading.
pub fn core_load() -> Result<u8, Box<dyn std::error::Error>> {
    let gpu = active_gpu()?;
    let info = gpu.info();
    Ok((info.load_pct() as u32).min(100) as u8)
}
