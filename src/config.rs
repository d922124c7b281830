//! Application configuration.
//!
//! Precedence: CLI > env > config files > defaults. CLI overrides are applied by the
//! binary on top of what [`load_config`] returns.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog file to use instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// log4rs YAML config; takes precedence over `log_dir`.
    pub log_config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
    /// Output mode: human|plain|json
    pub output: Option<String>,
}

impl AppConfig {
    /// Fills every unset field from `other`.
    fn merge_missing(&mut self, other: AppConfig) {
        if self.catalog_path.is_none() { self.catalog_path = other.catalog_path; }
        if self.log_config.is_none() { self.log_config = other.log_config; }
        if self.log_dir.is_none() { self.log_dir = other.log_dir; }
        if self.log_level.is_none() { self.log_level = other.log_level; }
        if self.log_retention.is_none() { self.log_retention = other.log_retention; }
        if self.output.is_none() { self.output = other.output; }
    }

    fn from_env_with(env: &dyn Fn(&str) -> Option<String>) -> AppConfig {
        AppConfig {
            catalog_path: env("QUERYCAT_CATALOG").map(PathBuf::from),
            log_config: env("QUERYCAT_LOG_CONFIG").map(PathBuf::from),
            log_dir: env("QUERYCAT_LOG_DIR").map(PathBuf::from),
            log_level: env("QUERYCAT_LOG_LEVEL"),
            log_retention: env("QUERYCAT_LOG_RETENTION").and_then(|s| s.parse::<usize>().ok()),
            output: env("QUERYCAT_OUTPUT"),
        }
    }
}

/// Candidate config files, highest priority first.
pub fn find_config_paths(cli_cfg: Option<&PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.clone()); }
    if let Ok(p) = std::env::var("QUERYCAT_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Ok(home) = std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME")) {
        let home_pb = PathBuf::from(home);
        paths.push(home_pb.join(".querycatrc"));
        paths.push(home_pb.join(".config").join("querycat.toml"));
    }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join("querycat.toml")); }
    paths
}

/// Resolved configuration plus the problems met while reading config files.
///
/// Files are read before logging is configured, so skipped files are reported
/// here for the caller to surface once a logger is installed.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warnings: Vec<String>,
}

/// Loads configuration from the process environment and the standard file locations.
pub fn load_config(cli_cfg: Option<&PathBuf>) -> LoadedConfig {
    let paths = find_config_paths(cli_cfg);
    load_config_from(&paths, &|k| std::env::var(k).ok())
}

/// Resolves configuration from an explicit environment lookup and file list.
/// For each key the environment wins, then the first file that sets it.
/// Missing files are ignored; unreadable or malformed ones are skipped with a warning.
pub fn load_config_from(paths: &[PathBuf], env: &dyn Fn(&str) -> Option<String>) -> LoadedConfig {
    let mut cfg = AppConfig::from_env_with(env);
    let mut warnings = Vec::new();
    for p in paths {
        if !p.exists() { continue; }
        match std::fs::read_to_string(p) {
            Ok(s) => match toml::from_str::<AppConfig>(&s) {
                Ok(file_cfg) => {
                    log::debug!("config: merged {}", p.display());
                    cfg.merge_missing(file_cfg);
                }
                Err(e) => warnings.push(format!("config: skipping {} ({e})", p.display())),
            },
            Err(e) => warnings.push(format!("config: cannot read {} ({e})", p.display())),
        }
    }
    LoadedConfig { config: cfg, warnings }
}
