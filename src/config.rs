use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub cache: CacheConfig,
    pub notifications: NotificationConfig,
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub zoom_step: f32,
    /// Device pixels per PDF point at 100% zoom.
    pub pixel_ratio: f32,
    pub render_workers: usize,
    pub input_poll_timeout_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.1,
            pixel_ratio: 1.5,
            render_workers: 2,
            input_poll_timeout_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub memory_budget_mb: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 32,
            memory_budget_mb: 256,
        }
    }
}

impl CacheConfig {
    const MEBIBYTE: usize = 1024 * 1024;

    pub fn memory_budget_bytes(&self) -> usize {
        self.memory_budget_mb.saturating_mul(Self::MEBIBYTE).max(1)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding saved documents. Falls back to the data directory.
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| default_data_dir().map(|dir| dir.join("documents.json")))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| default_data_dir().map(|dir| dir.join("pdfx.log")))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = ViewerConfig::default();
        if !self.viewer.zoom_step.is_finite() || self.viewer.zoom_step <= 0.0 {
            self.viewer.zoom_step = defaults.zoom_step;
        }
        if !self.viewer.pixel_ratio.is_finite() || self.viewer.pixel_ratio <= 0.0 {
            self.viewer.pixel_ratio = defaults.pixel_ratio;
        }
        self.viewer.pixel_ratio = self.viewer.pixel_ratio.clamp(0.5, 4.0);
        self.viewer.render_workers = self.viewer.render_workers.max(1);
        self.viewer.input_poll_timeout_ms = self.viewer.input_poll_timeout_ms.max(1);
        self.cache.max_entries = self.cache.max_entries.max(1);
        self.cache.memory_budget_mb = self.cache.memory_budget_mb.max(1);
        self.notifications.dismiss_after_ms = self.notifications.dismiss_after_ms.max(1);
        if self.log.level.trim().is_empty() {
            self.log.level = LogConfig::default().level;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("PDFX_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("pdfx").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("pdfx")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("pdfx").join("config.toml"));
    }
    None
}

pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("pdfx"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("pdfx"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("pdfx"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{Config, StoreConfig};

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let missing = dir.path().join("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
            [viewer]
            zoom_step = -1.0
            pixel_ratio = 9.0
            render_workers = 0

            [notifications]
            dismiss_after_ms = 0

            [store]
            path = "/tmp/pdfx-docs.json"

            [log]
            level = ""
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.viewer.zoom_step, 0.1);
        assert_eq!(config.viewer.pixel_ratio, 4.0);
        assert_eq!(config.viewer.render_workers, 1);
        assert_eq!(config.notifications.dismiss_after_ms, 1);
        assert_eq!(
            config.store.path,
            Some(PathBuf::from("/tmp/pdfx-docs.json"))
        );
        assert_eq!(config.log.level, "info");
        assert_eq!(config.cache.max_entries, 32);
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn load_from_path_rejects_directories_and_bad_toml() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert!(Config::load_from_path(dir.path()).is_err());

        let path = dir.path().join("broken.toml");
        fs::write(&path, "[viewer\nzoom_step = ").expect("config file should be written");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn explicit_store_path_wins_over_data_dir() {
        let store = StoreConfig {
            path: Some(PathBuf::from("docs.json")),
        };
        assert_eq!(store.resolved_path(), Some(PathBuf::from("docs.json")));
    }
}
