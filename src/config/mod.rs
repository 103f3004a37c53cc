use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "./censistas.log";
pub const DEFAULT_THEME: &str = "dark";

pub const API_URL_ENV: &str = "CENSISTAS_API_URL";
pub const LOG_LEVEL_ENV: &str = "CENSISTAS_LOG";
pub const CONFIG_PATH_ENV: &str = "CENSISTAS_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the lookup service; `/censistas` is appended by the client.
    pub api_url: String,
    pub theme: String,
    pub mask_passwords: bool,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme: DEFAULT_THEME.to_string(),
            mask_passwords: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub theme: Option<String>,
    pub mask_passwords: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_empty(API_URL_ENV),
            log_level: non_empty(LOG_LEVEL_ENV),
        }
    }
}

impl AppConfig {
    /// Resolves the config before logging exists; the returned [`FileLoad`]
    /// must be reported once the subscriber is installed.
    pub fn from_cli(cli: crate::Cli) -> (Self, FileLoad) {
        let mut load = load_file_config();
        let file_cfg = std::mem::take(&mut load.config);
        (Self::resolve(cli, EnvOverrides::from_env(), file_cfg), load)
    }

    /// Priority: CLI flag, then environment, then config file, then default.
    pub fn resolve(cli: crate::Cli, env: EnvOverrides, file_cfg: FileConfig) -> Self {
        let defaults = Self::default();

        let api_url = cli
            .api_url
            .or(env.api_url)
            .or(file_cfg.api_url)
            .unwrap_or(defaults.api_url);
        let theme = cli
            .theme
            .or(file_cfg.theme)
            .unwrap_or(defaults.theme);
        let log_level = cli
            .log_level
            .or(env.log_level)
            .or(file_cfg.log_level)
            .unwrap_or(defaults.log_level);
        let log_file = cli
            .log_file
            .or(file_cfg.log_file)
            .unwrap_or(defaults.log_file);
        let mask_passwords = cli.mask_passwords || file_cfg.mask_passwords.unwrap_or(false);

        Self {
            api_url,
            theme,
            mask_passwords,
            log_level,
            log_file,
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = env::var(CONFIG_PATH_ENV) {
        v.push(PathBuf::from(p));
    }
    if let Ok(xdg_home) = env::var("XDG_CONFIG_HOME") {
        v.push(Path::new(&xdg_home).join("censistas/config.toml"));
    } else if let Some(home) = dirs::home_dir() {
        v.push(home.join(".config/censistas/config.toml"));
    }
    if let Ok(config_dirs) = env::var("XDG_CONFIG_DIRS") {
        for d in config_dirs.split(':') {
            if !d.is_empty() {
                v.push(Path::new(d).join("censistas/config.toml"));
            }
        }
    }
    v
}

/// Outcome of the config file search.
#[derive(Debug, Default)]
pub struct FileLoad {
    pub config: FileConfig,
    pub loaded_from: Option<PathBuf>,
    pub skipped: Vec<(PathBuf, anyhow::Error)>,
}

impl FileLoad {
    pub fn report(&self) {
        for (path, e) in &self.skipped {
            warn!(path=%path.display(), error=%format!("{e:#}"), "skipping unreadable config file");
        }
        match &self.loaded_from {
            Some(path) => info!(path=%path.display(), "loaded config file"),
            None => info!("no config file found, using defaults"),
        }
    }
}

pub fn load_file_config() -> FileLoad {
    let mut load = FileLoad::default();
    for p in candidate_paths() {
        if !p.exists() {
            continue;
        }
        match load_config_from(&p) {
            Ok(cfg) => {
                load.config = cfg;
                load.loaded_from = Some(p);
                break;
            }
            Err(e) => load.skipped.push((p, e)),
        }
    }
    load
}

pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    toml::from_str::<FileConfig>(&s)
        .with_context(|| format!("parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests;
