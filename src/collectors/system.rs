use crate::snapshot::{round2, DiskSample, MemorySample, ProbeResult};
use std::path::Path;
use sysinfo::{DiskExt, System, SystemExt};

const GIB: f64 = (1u64 << 30) as f64;

/// Capacity sample for the filesystem mounted at `mount`.
pub fn collect_disk(system: &mut System, mount: &str) -> ProbeResult<DiskSample> {
    system.refresh_disks_list();
    system.refresh_disks();

    let Some(disk) = system
        .disks()
        .iter()
        .find(|d| d.mount_point() == Path::new(mount))
    else {
        return ProbeResult::failed(format!("no filesystem mounted at {mount}"));
    };

    let total = disk.total_space();
    if total == 0 {
        return ProbeResult::failed(format!("filesystem at {mount} reports zero capacity"));
    }

    ProbeResult::Ok(disk_sample(total, disk.available_space()))
}

/// Instantaneous host memory sample. Single read, no smoothing.
pub fn collect_memory(system: &mut System) -> ProbeResult<MemorySample> {
    system.refresh_memory();

    let total = system.total_memory();
    if total == 0 {
        return ProbeResult::failed("host memory accounting unavailable");
    }

    ProbeResult::Ok(memory_sample(
        total,
        system.available_memory(),
        system.used_memory(),
        system.free_memory(),
    ))
}

fn disk_sample(total_bytes: u64, available_bytes: u64) -> DiskSample {
    let used_bytes = total_bytes.saturating_sub(available_bytes);
    DiskSample {
        total_gb: round2(total_bytes as f64 / GIB),
        used_gb: round2(used_bytes as f64 / GIB),
        free_gb: round2(available_bytes as f64 / GIB),
        percent_used: round2(used_bytes as f64 / total_bytes as f64 * 100.0),
    }
}

fn memory_sample(total_bytes: u64, available_bytes: u64, used_bytes: u64, free_bytes: u64) -> MemorySample {
    MemorySample {
        total_gb: round2(total_bytes as f64 / GIB),
        available_gb: round2(available_bytes as f64 / GIB),
        percent_used: round2(used_bytes as f64 / total_bytes as f64 * 100.0),
        used_gb: round2(used_bytes as f64 / GIB),
        free_gb: round2(free_bytes as f64 / GIB),
    }
}
