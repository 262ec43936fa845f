pub mod git;
pub mod system;

use crate::client::OpenClawClient;
use crate::config::Config;
use crate::snapshot::HealthSnapshot;
use chrono::{SecondsFormat, Utc};
use sysinfo::{System, SystemExt};

/// Run the six health-check steps in fixed order and assemble one
/// snapshot. A failed step never skips the ones after it; the numbered
/// progress lines go to stdout and are not part of the snapshot.
pub async fn run_health_check(client: &OpenClawClient, cfg: &Config) -> HealthSnapshot {
    println!("Running system health checks...");

    println!("1. Checking OpenClaw status...");
    let openclaw_status = client.status().await;

    println!("2. Checking gateway...");
    let gateway = client.gateway_status().await;

    println!("3. Checking cron jobs...");
    let cron = client.cron_status().await;

    println!("4. Checking Git servers...");
    let git_servers = git::collect_git_servers(&cfg.git_checks).await;

    let mut sysinfo = System::new();

    println!("5. Checking disk space...");
    let disk = system::collect_disk(&mut sysinfo, &cfg.disk_mount);

    println!("6. Checking memory...");
    let memory = system::collect_memory(&mut sysinfo);

    HealthSnapshot {
        openclaw_status,
        gateway,
        cron,
        git_servers,
        disk,
        memory,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}
