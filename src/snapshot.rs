use serde::Serialize;
use std::collections::BTreeMap;

/// Parsed `key: value` output of `openclaw status`.
pub type StatusMap = BTreeMap<String, String>;

/// Outcome of a single probe. `Ok` carries the probe's payload, `Failed`
/// the reason it could not be collected. Serialized untagged so `Ok`
/// flattens to the payload and `Failed` to `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProbeResult<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> ProbeResult<T> {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Raw output of an OpenClaw subcommand that has no line-oriented schema.
#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitServerStat {
    pub port: u16,
    pub status: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskSample {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemorySample {
    pub total_gb: f64,
    pub available_gb: f64,
    pub percent_used: f64,
    pub used_gb: f64,
    pub free_gb: f64,
}

/// One aggregated health record. Built fresh per invocation; every probe
/// field fails independently without blocking the others.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub openclaw_status: ProbeResult<StatusMap>,
    pub gateway: ProbeResult<CommandReport>,
    pub cron: ProbeResult<CommandReport>,
    pub git_servers: BTreeMap<String, GitServerStat>,
    pub disk: ProbeResult<DiskSample>,
    pub memory: ProbeResult<MemorySample>,
    pub timestamp: String,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
