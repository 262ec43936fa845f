use crate::snapshot::{CommandReport, ProbeResult, StatusMap};
use std::collections::BTreeMap;
use tokio::process::Command;
use tracing::warn;

/// Captured result of one OpenClaw CLI invocation.
///
/// Invariant: `succeeded == (exit_code == 0)`.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CommandOutcome {
    /// Best available failure description for a non-zero outcome.
    pub fn error_text(&self) -> String {
        self.stderr
            .clone()
            .unwrap_or_else(|| format!("command exited with code {}", self.exit_code))
    }
}

/// Client for the OpenClaw platform, driven through its CLI binary.
#[derive(Debug, Clone)]
pub struct OpenClawClient {
    path: String,
}

impl OpenClawClient {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Run an OpenClaw subcommand and capture both streams as trimmed text.
    ///
    /// Never fails: a spawn error (missing binary, permission denied) is
    /// folded into a `CommandOutcome` with exit code 1. Everything
    /// downstream assumes a well-formed outcome always exists.
    pub async fn run(&self, args: &[&str]) -> CommandOutcome {
        match Command::new(&self.path).args(args).output().await {
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                CommandOutcome {
                    succeeded: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                    stderr: if stderr.is_empty() { None } else { Some(stderr) },
                    exit_code: output.status.code().unwrap_or(1),
                }
            }
            Err(err) => {
                warn!(binary = %self.path, error = %err, "failed to spawn openclaw");
                CommandOutcome {
                    succeeded: false,
                    stdout: String::new(),
                    stderr: Some(err.to_string()),
                    exit_code: 1,
                }
            }
        }
    }

    /// `openclaw status`, parsed into a key/value map.
    pub async fn status(&self) -> ProbeResult<StatusMap> {
        let outcome = self.run(&["status"]).await;
        if !outcome.succeeded {
            return ProbeResult::failed(outcome.error_text());
        }
        ProbeResult::Ok(parse_status_output(&outcome.stdout))
    }

    /// `openclaw gateway status`, raw output.
    pub async fn gateway_status(&self) -> ProbeResult<CommandReport> {
        self.raw_report(&["gateway", "status"]).await
    }

    /// `openclaw cron status`, raw output.
    pub async fn cron_status(&self) -> ProbeResult<CommandReport> {
        self.raw_report(&["cron", "status"]).await
    }

    /// `openclaw health`, raw output.
    pub async fn health(&self) -> ProbeResult<CommandReport> {
        self.raw_report(&["health"]).await
    }

    /// `openclaw sessions list`, one entry per non-empty output line.
    pub async fn sessions_list(&self) -> ProbeResult<Vec<String>> {
        let outcome = self.run(&["sessions", "list"]).await;
        if !outcome.succeeded {
            return ProbeResult::failed(outcome.error_text());
        }
        ProbeResult::Ok(
            outcome
                .stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    async fn raw_report(&self, args: &[&str]) -> ProbeResult<CommandReport> {
        let outcome = self.run(args).await;
        if !outcome.succeeded {
            return ProbeResult::failed(outcome.error_text());
        }
        ProbeResult::Ok(CommandReport {
            output: outcome.stdout,
        })
    }
}

/// Parse line-oriented `key: value` status output. Splits on the first
/// colon only; later duplicate keys overwrite earlier ones; lines without
/// a colon are dropped. The tool guarantees no machine-readable format,
/// so any text shape is accepted.
pub fn parse_status_output(raw: &str) -> StatusMap {
    let mut status = BTreeMap::new();
    for line in raw.lines() {
        if let Some((key, value)) = line.split_once(':') {
            status.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_captures_stdout_and_exit_code() {
        let client = OpenClawClient::new("echo");
        let outcome = client.run(&["hello"]).await;
        assert!(outcome.succeeded);
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.stdout, "hello");
        assert_eq!(outcome.stderr, None);
    }

    #[tokio::test]
    async fn run_reports_nonzero_exit() {
        let client = OpenClawClient::new("sh");
        let outcome = client.run(&["-c", "echo oops 1>&2; exit 3"]).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.stderr.as_deref(), Some("oops"));
        assert_eq!(outcome.succeeded, outcome.exit_code == 0);
    }

    #[tokio::test]
    async fn spawn_failure_is_contained() {
        let client = OpenClawClient::new("definitely-not-a-real-binary-4717");
        let outcome = client.run(&["status"]).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.stdout, "");
        assert!(outcome.stderr.is_some());
    }

    #[tokio::test]
    async fn status_of_missing_binary_is_failed() {
        let client = OpenClawClient::new("definitely-not-a-real-binary-4717");
        assert!(client.status().await.is_failed());
        assert!(client.gateway_status().await.is_failed());
        assert!(client.sessions_list().await.is_failed());
    }

    #[cfg(unix)]
    fn fake_openclaw(name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("clawcheck-fake-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn status_parses_fake_cli_output() {
        let script = fake_openclaw(
            "openclaw-status",
            "printf 'Status: running\\nVersion: 2.1.0\\n'",
        );
        let client = OpenClawClient::new(script.to_string_lossy());

        match client.status().await {
            ProbeResult::Ok(status) => {
                assert_eq!(status.get("Status").map(String::as_str), Some("running"));
                assert_eq!(status.get("Version").map(String::as_str), Some("2.1.0"));
            }
            ProbeResult::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sessions_list_splits_nonempty_lines() {
        let script = fake_openclaw("openclaw-sessions", "printf 'one\\n\\n two \\n'");
        let client = OpenClawClient::new(script.to_string_lossy());

        match client.sessions_list().await {
            ProbeResult::Ok(lines) => assert_eq!(lines, vec!["one", "two"]),
            ProbeResult::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_subcommand_reports_stderr() {
        let script = fake_openclaw("openclaw-down", "echo 'gateway daemon not running' 1>&2; exit 2");
        let client = OpenClawClient::new(script.to_string_lossy());

        match client.gateway_status().await {
            ProbeResult::Failed { error } => {
                assert_eq!(error, "gateway daemon not running");
            }
            ProbeResult::Ok(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn parse_status_basic() {
        let map = parse_status_output("state: ok\nport: 9\n");
        assert_eq!(map.get("state").map(String::as_str), Some("ok"));
        assert_eq!(map.get("port").map(String::as_str), Some("9"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn parse_status_drops_lines_without_colon() {
        let map = parse_status_output("no colon here\nkey: value");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn parse_status_splits_on_first_colon_only() {
        let map = parse_status_output("url: http://localhost:3000");
        assert_eq!(
            map.get("url").map(String::as_str),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn parse_status_later_duplicates_win() {
        let map = parse_status_output("key: first\nkey: second");
        assert_eq!(map.get("key").map(String::as_str), Some("second"));
    }
}
