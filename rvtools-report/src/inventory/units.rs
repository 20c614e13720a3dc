//! Unit normalization heuristics
//!
//! VM disk figures are checked against the header text and a size threshold;
//! host memory only against a (lower) size threshold. Keep them separate.

/// Disk values above this are taken to be MiB regardless of the header
pub const DISK_MIB_THRESHOLD: f64 = 10_000.0;

/// Host memory values above this are taken to be MiB
pub const HOST_MEMORY_MIB_THRESHOLD: f64 = 1_000.0;

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Convert a VM disk figure to GB
///
/// Divides by 1024 when the header names MiB/MB or the value is too large to
/// plausibly be GB. Without a resolved header the value is returned as-is.
pub fn disk_to_gb(value: f64, header: Option<&str>) -> f64 {
    let Some(header) = header else {
        return value;
    };
    let header = header.to_lowercase();
    if header.contains("mib") || header.contains("mb") || value > DISK_MIB_THRESHOLD {
        value / 1024.0
    } else {
        value
    }
}

/// Convert a host sheet memory figure to GB (value threshold only)
pub fn host_memory_to_gb(value: f64) -> f64 {
    if value > HOST_MEMORY_MIB_THRESHOLD {
        value / 1024.0
    } else {
        value
    }
}
