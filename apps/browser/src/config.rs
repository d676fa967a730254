use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const CONFIG_FILE: &str = "region_browser.toml";
const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "region_browser";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub settings_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            request_timeout_secs: 30,
            settings_path: default_settings_path(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn default_settings_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR).join(SETTINGS_FILE),
        None => PathBuf::from(format!(".{APP_DIR}")).join(SETTINGS_FILE),
    }
}

/// Defaults, then the config file, then the environment.
pub fn load_config(config_path: Option<&Path>) -> AppConfig {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE));
    load_config_from(path, |name| std::env::var(name).ok())
}

pub(crate) fn load_config_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> AppConfig {
    let mut config = AppConfig::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    config.server_url = v.clone();
                }
                if let Some(v) = file_cfg.get("request_timeout_secs") {
                    apply_timeout(&mut config, v);
                }
                if let Some(v) = file_cfg.get("settings_path") {
                    config.settings_path = PathBuf::from(v);
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config file");
            }
        }
    }

    if let Some(v) = env("REGION_BROWSER_SERVER_URL") {
        config.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        config.server_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        apply_timeout(&mut config, &v);
    }

    if let Some(v) = env("APP__SETTINGS_PATH") {
        config.settings_path = PathBuf::from(v);
    }

    config
}

fn apply_timeout(config: &mut AppConfig, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => config.request_timeout_secs = parsed,
        _ => tracing::warn!(value = raw, "ignoring invalid request timeout"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
