use crate::config::GitCheckConfig;
use crate::snapshot::GitServerStat;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;
use tracing::warn;

/// Probe each configured Git daemon with a plain TCP connect, one target
/// after another. No protocol handshake; reachability only. The socket is
/// dropped immediately after the attempt.
pub async fn collect_git_servers(checks: &[GitCheckConfig]) -> BTreeMap<String, GitServerStat> {
    let mut servers = BTreeMap::new();
    for check in checks {
        let status = probe_tcp(check).await;
        servers.insert(
            check.name.clone(),
            GitServerStat {
                port: check.port,
                status,
            },
        );
    }
    servers
}

async fn probe_tcp(cfg: &GitCheckConfig) -> bool {
    let addr = format!("{}:{}", cfg.host, cfg.port);

    match time::timeout(
        Duration::from_millis(cfg.timeout_ms),
        TcpStream::connect(&addr),
    )
    .await
    {
        Ok(Ok(_stream)) => true,
        Ok(Err(err)) => {
            warn!(check = %cfg.name, address = %addr, error = %err, "git server check failed");
            false
        }
        Err(_elapsed) => {
            warn!(check = %cfg.name, address = %addr, "git server check timeout");
            false
        }
    }
}
