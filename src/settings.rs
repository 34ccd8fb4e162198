use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// When a keyword search runs.
#[derive(
    clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Search on every keystroke.
    #[default]
    Realtime,
    /// Search only on the action button or Enter.
    Confirm,
}

impl RenderMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Realtime => Self::Confirm,
            Self::Confirm => Self::Realtime,
        }
    }
}

/// User settings. Every field is required when decoding, so a damaged
/// record is rejected as a whole instead of being patched with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub render_mode: RenderMode,
    pub highlight_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Realtime,
            highlight_enabled: true,
        }
    }
}

/// Persistence for [`Settings`].
///
/// `persist` is fire-and-forget: failures are the store's concern and are
/// never retried by the caller.
pub trait SettingsStore {
    fn load_persisted(&self) -> Option<Settings>;
    fn persist(&mut self, settings: &Settings);
}

/// Load settings, installing and persisting the defaults when nothing
/// usable is stored.
pub fn load_settings<S: SettingsStore + ?Sized>(store: &mut S) -> Settings {
    if let Some(settings) = store.load_persisted() {
        return settings;
    }
    let defaults = Settings::default();
    tracing::info!("no stored settings, installing defaults");
    store.persist(&defaults);
    defaults
}

/// Settings held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    persisted: Option<Settings>,
    writes: usize,
}

impl MemorySettingsStore {
    pub const fn with(settings: Settings) -> Self {
        Self {
            persisted: Some(settings),
            writes: 0,
        }
    }

    pub const fn persisted(&self) -> Option<Settings> {
        self.persisted
    }

    /// Number of `persist` calls seen.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_persisted(&self) -> Option<Settings> {
        self.persisted
    }

    fn persist(&mut self, settings: &Settings) {
        self.persisted = Some(*settings);
        self.writes += 1;
    }
}

pub fn global_settings_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("msgseek").join("settings.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("msgseek")
                .join("settings.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("msgseek").join("settings.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("msgseek")
                .join("settings.json");
        }
    }

    PathBuf::from(".msgseek.json")
}

/// Read settings from `path`. A missing file is `Ok(None)`.
///
/// # Errors
/// Returns an error if the file exists but can't be read or decoded.
pub fn read_settings(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    let settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(Some(settings))
}

/// Write the full settings record to `path`.
///
/// # Errors
/// Returns an error if the directory or file can't be written.
pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create settings dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write settings {}", path.display()))
}

/// Settings stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_persisted(&self) -> Option<Settings> {
        match read_settings(&self.path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("{err:#}; falling back to defaults");
                None
            }
        }
    }

    fn persist(&mut self, settings: &Settings) {
        match write_settings(&self.path, settings) {
            Ok(()) => tracing::info!(path = %self.path.display(), ?settings, "settings saved"),
            Err(err) => tracing::warn!("{err:#}"),
        }
    }
}

/// Coalesces persists so only the last one inside `delay` reaches the
/// wrapped store. Anything still pending is written when the store is
/// dropped.
#[derive(Debug)]
pub struct DebouncedStore<S: SettingsStore> {
    inner: S,
    delay: Duration,
    pending: Option<(Settings, Instant)>,
}

impl<S: SettingsStore> DebouncedStore<S> {
    pub const fn new(inner: S, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            pending: None,
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Write the pending settings once `delay` has passed since the last
    /// persist. Returns whether a write happened.
    pub fn flush_ready(&mut self, now: Instant) -> bool {
        let Some((settings, queued_at)) = self.pending else {
            return false;
        };
        if now.saturating_duration_since(queued_at) < self.delay {
            return false;
        }
        self.pending = None;
        self.inner.persist(&settings);
        true
    }

    /// Write any pending settings immediately.
    pub fn flush(&mut self) {
        if let Some((settings, _)) = self.pending.take() {
            self.inner.persist(&settings);
        }
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SettingsStore> Drop for DebouncedStore<S> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl<S: SettingsStore> SettingsStore for DebouncedStore<S> {
    fn load_persisted(&self) -> Option<Settings> {
        self.pending
            .map(|(settings, _)| settings)
            .or_else(|| self.inner.load_persisted())
    }

    fn persist(&mut self, settings: &Settings) {
        self.pending = Some((*settings, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_realtime_with_highlight() {
        let settings = Settings::default();
        assert_eq!(settings.render_mode, RenderMode::Realtime);
        assert!(settings.highlight_enabled);
    }

    #[test]
    fn test_load_installs_defaults_when_absent() {
        let mut store = MemorySettingsStore::default();
        let settings = load_settings(&mut store);
        assert_eq!(settings, Settings::default());
        assert_eq!(store.persisted(), Some(Settings::default()));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_load_keeps_stored_settings() {
        let stored = Settings {
            render_mode: RenderMode::Confirm,
            highlight_enabled: false,
        };
        let mut store = MemorySettingsStore::with(stored);
        assert_eq!(load_settings(&mut store), stored);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_file_round_trip_uses_lowercase_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            render_mode: RenderMode::Confirm,
            highlight_enabled: false,
        };
        write_settings(&path, &settings).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"confirm\""), "{raw}");
        assert_eq!(read_settings(&path).unwrap(), Some(settings));
    }

    #[test]
    fn test_partial_record_is_replaced_not_merged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"render_mode":"confirm"}"#).unwrap();

        let mut store = FileSettingsStore::new(&path);
        assert_eq!(store.load_persisted(), None);
        let settings = load_settings(&mut store);
        assert_eq!(settings, Settings::default());
        assert_eq!(read_settings(&path).unwrap(), Some(Settings::default()));
    }

    #[test]
    fn test_debounced_store_writes_last_value_after_delay() {
        let mut store = DebouncedStore::new(MemorySettingsStore::default(), Duration::from_millis(300));
        let confirm = Settings {
            render_mode: RenderMode::Confirm,
            highlight_enabled: true,
        };
        store.persist(&Settings::default());
        store.persist(&confirm);
        assert!(store.is_pending());
        assert_eq!(store.load_persisted(), Some(confirm));

        let start = Instant::now();
        assert!(!store.flush_ready(start));
        assert!(store.flush_ready(start + Duration::from_secs(1)));
        assert_eq!(store.inner().persisted(), Some(confirm));
        assert_eq!(store.inner().writes(), 1);
    }

    #[test]
    fn test_debounced_flush_writes_immediately() {
        let mut store = DebouncedStore::new(MemorySettingsStore::default(), Duration::from_secs(60));
        store.persist(&Settings::default());
        store.flush();
        assert!(!store.is_pending());
        assert_eq!(store.inner().writes(), 1);
    }
}
