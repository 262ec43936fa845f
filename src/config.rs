use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_openclaw_path")]
    pub openclaw_path: String,
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
    #[serde(default = "default_git_checks")]
    pub git_checks: Vec<GitCheckConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitCheckConfig {
    pub name: String,
    #[serde(default = "default_git_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_git_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openclaw_path: default_openclaw_path(),
            disk_mount: default_disk_mount(),
            git_checks: default_git_checks(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("config validation error: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openclaw_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "openclaw_path must not be empty".to_string(),
            ));
        }
        if self.disk_mount.trim().is_empty() {
            return Err(ConfigError::Validation(
                "disk_mount must not be empty".to_string(),
            ));
        }

        validate_git_checks(&self.git_checks)?;

        Ok(())
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_git_checks(checks: &[GitCheckConfig]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for check in checks {
        if check.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "git_checks[*].name must not be empty".to_string(),
            ));
        }
        if !names.insert(check.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "git check name '{}' must be unique",
                check.name
            )));
        }
        if check.host.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "git_checks '{}' host must not be empty",
                check.name
            )));
        }
        if check.port == 0 {
            return Err(ConfigError::Validation(format!(
                "git_checks '{}' port must be in range 1..65535",
                check.name
            )));
        }
        if check.timeout_ms == 0 {
            return Err(ConfigError::Validation(format!(
                "git_checks '{}' timeout_ms must be > 0",
                check.name
            )));
        }
    }
    Ok(())
}

fn default_openclaw_path() -> String {
    "openclaw".to_string()
}

fn default_disk_mount() -> String {
    "/".to_string()
}

fn default_git_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_git_timeout_ms() -> u64 {
    2000
}

fn default_git_checks() -> Vec<GitCheckConfig> {
    vec![
        GitCheckConfig {
            name: "forgejo".to_string(),
            host: default_git_host(),
            port: 3001,
            timeout_ms: default_git_timeout_ms(),
        },
        GitCheckConfig {
            name: "gitea".to_string(),
            host: default_git_host(),
            port: 3000,
            timeout_ms: default_git_timeout_ms(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let cfg = Config::default();
        cfg.validate().expect("built-in defaults must be valid");
        assert_eq!(cfg.git_checks.len(), 2);
        assert_eq!(cfg.git_checks[0].name, "forgejo");
        assert_eq!(cfg.git_checks[0].port, 3001);
        assert_eq!(cfg.git_checks[1].name, "gitea");
        assert_eq!(cfg.git_checks[1].port, 3000);
    }

    #[test]
    fn example_yaml_matches_defaults() {
        let cfg: Config =
            serde_yaml::from_str(Config::example_yaml()).expect("example must parse");
        cfg.validate().expect("example must be valid");
        assert_eq!(cfg.openclaw_path, Config::default().openclaw_path);
        assert_eq!(cfg.disk_mount, Config::default().disk_mount);
        assert_eq!(cfg.git_checks.len(), Config::default().git_checks.len());
    }

    #[test]
    fn empty_openclaw_path_is_rejected() {
        let cfg = Config {
            openclaw_path: "  ".to_string(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicate_git_check_names_are_rejected() {
        let mut cfg = Config::default();
        cfg.git_checks.push(GitCheckConfig {
            name: "forgejo".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3002,
            timeout_ms: 2000,
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = Config::default();
        cfg.git_checks[0].port = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = Config::default();
        cfg.git_checks[1].timeout_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("git_checks:\n  - name: forge\n    port: 3001\n")
            .expect("minimal config must parse");
        assert_eq!(cfg.openclaw_path, "openclaw");
        assert_eq!(cfg.git_checks[0].host, "127.0.0.1");
        assert_eq!(cfg.git_checks[0].timeout_ms, 2000);
    }
}
