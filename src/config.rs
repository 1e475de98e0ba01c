// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Window settings with defaults, recursive merging and toml persistence.
//!
//! Settings are typed, but merging happens on toml tables so a partial
//! update such as `[window_modes] hidden = true` only touches that one key.
//! Keys the framework doesn't know are kept in [`Settings::custom`], games
//! can store their own options next to the window ones.

use crate::util::Size;
use bitflags::bitflags;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};

bitflags! {
    /// Window modes, few can be applied at once
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct WindowMode: u32 {
        const FULLSCREEN = 0b0000_0001;
        const BORDERLESS = 0b0000_0010;
        /// only has effect in fullscreen
        const HARDWARE_ACCELERATION = 0b0000_0100;
        const OPENGL = 0b0000_1000;
        const RESIZABLE = 0b0001_0000;
        /// no output at all, used by tests and servers
        const HIDDEN = 0b0010_0000;
        const DOUBLE_BUFFER = 0b0100_0000;
        const SCALED = 0b1000_0000;
    }
}

/// One switch per window mode, all off out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowModes {
    pub fullscreen: bool,
    pub borderless: bool,
    pub hardware_acceleration: bool,
    pub opengl: bool,
    pub resizable: bool,
    pub hidden: bool,
    pub double_buffer: bool,
    pub scaled: bool,
}

impl WindowModes {
    fn switches(&mut self) -> [(WindowMode, &mut bool); 8] {
        [
            (WindowMode::FULLSCREEN, &mut self.fullscreen),
            (WindowMode::BORDERLESS, &mut self.borderless),
            (WindowMode::HARDWARE_ACCELERATION, &mut self.hardware_acceleration),
            (WindowMode::OPENGL, &mut self.opengl),
            (WindowMode::RESIZABLE, &mut self.resizable),
            (WindowMode::HIDDEN, &mut self.hidden),
            (WindowMode::DOUBLE_BUFFER, &mut self.double_buffer),
            (WindowMode::SCALED, &mut self.scaled),
        ]
    }

    /// Turn every mode contained in `mode` on or off
    pub fn set(&mut self, mode: WindowMode, on: bool) {
        for (m, flag) in self.switches() {
            if mode.contains(m) {
                *flag = on;
            }
        }
    }

    /// Compose enabled modes into flags
    pub fn flags(&self) -> WindowMode {
        let mut copy = *self;
        copy.switches()
            .into_iter()
            .filter(|(_, on)| **on)
            .fold(WindowMode::empty(), |acc, (m, _)| acc | m)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub size: Size,
    pub vsync: bool,
    pub window_modes: WindowModes,
    #[serde(flatten)]
    pub custom: toml::Table,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: Size::new(1280, 720),
            vsync: false,
            window_modes: WindowModes::default(),
            custom: toml::Table::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Serialize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Settings IO error: {}", e),
            ConfigError::Parse(s) => write!(f, "Invalid settings: {}", s),
            ConfigError::Serialize(s) => write!(f, "Unable to serialize settings: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Merge two tables recursively, values of `y` win
pub fn rmerge(x: &toml::Table, y: &toml::Table) -> toml::Table {
    let mut new = x.clone();
    for (k, val) in y {
        let merged = match (new.get(k), val) {
            (Some(toml::Value::Table(old)), toml::Value::Table(upd)) => {
                toml::Value::Table(rmerge(old, upd))
            }
            _ => val.clone(),
        };
        new.insert(k.clone(), merged);
    }
    new
}

#[derive(Debug, Default)]
pub struct SettingsManager {
    default: Settings,
    storage: Settings,
}

impl SettingsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &Settings {
        &self.storage
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.storage
    }

    pub fn defaults(&self) -> &Settings {
        &self.default
    }

    /// Reset settings to defaults
    pub fn reset(&mut self) {
        self.storage = self.default.clone();
    }

    /// Replace the fallback values, current settings are untouched
    pub fn set_defaults(&mut self, default: Settings) {
        self.default = default;
    }

    pub fn to_table(&self) -> Result<toml::Table, ConfigError> {
        toml::Table::try_from(&self.storage).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Update settings from a table, nested tables are merged key by key.
    /// On error the current settings stay as they were.
    pub fn merge(&mut self, data: &toml::Table) -> Result<(), ConfigError> {
        let merged = rmerge(&self.to_table()?, data);
        self.storage = merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        Ok(())
    }

    pub fn load_toml<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let text = fs::read_to_string(path)?;
        let data: toml::Table =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.merge(&data)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text =
            toml::to_string(&self.to_table()?).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Update settings from a toml file, failures are only logged
    pub fn from_toml<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        match self.load_toml(path) {
            Ok(()) => debug!("Successfully updated settings to {:?}", self.storage),
            Err(e) => warn!("Unable to update settings from {}: {}", path.display(), e),
        }
    }

    /// Dump current settings to a toml file, failures are only logged
    pub fn to_toml<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        match self.save_toml(path) {
            Ok(()) => debug!("Successfully saved settings to {}", path.display()),
            Err(e) => warn!("Unable to save settings to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let sm = SettingsManager::new();
        assert_eq!(sm.get().size, Size::new(1280, 720));
        assert!(!sm.get().vsync);
        assert_eq!(sm.get().window_modes.flags(), WindowMode::empty());
    }

    #[test]
    fn window_mode_flags() {
        let mut wm = WindowModes::default();
        wm.set(WindowMode::FULLSCREEN | WindowMode::SCALED, true);
        assert!(wm.fullscreen && wm.scaled && !wm.hidden);
        assert_eq!(wm.flags(), WindowMode::FULLSCREEN | WindowMode::SCALED);
        wm.set(WindowMode::SCALED, false);
        assert_eq!(wm.flags(), WindowMode::FULLSCREEN);
    }

    #[test]
    fn merge_keeps_nested_keys() {
        let mut sm = SettingsManager::new();
        sm.get_mut().window_modes.resizable = true;
        let data: toml::Table = toml::from_str("vsync = true\n[window_modes]\nhidden = true\n").unwrap();
        sm.merge(&data).unwrap();
        assert!(sm.get().vsync);
        assert!(sm.get().window_modes.hidden);
        assert!(sm.get().window_modes.resizable);
        assert_eq!(sm.get().size, Size::new(1280, 720));
    }

    #[test]
    fn bad_merge_leaves_settings() {
        let mut sm = SettingsManager::new();
        let data: toml::Table = toml::from_str("vsync = \"maybe\"").unwrap();
        assert!(matches!(sm.merge(&data), Err(ConfigError::Parse(_))));
        assert!(!sm.get().vsync);
    }

    #[test]
    fn toml_file_roundtrip_and_custom_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut sm = SettingsManager::new();
        sm.get_mut().size = Size::new(320, 200);
        sm.get_mut()
            .custom
            .insert("volume".to_string(), toml::Value::Integer(7));
        sm.to_toml(&path);

        let mut other = SettingsManager::new();
        other.from_toml(&path);
        assert_eq!(other.get().size, Size::new(320, 200));
        assert_eq!(other.get().custom.get("volume"), Some(&toml::Value::Integer(7)));

        other.reset();
        assert_eq!(other.get().size, Size::new(1280, 720));
        // missing file only warns
        other.from_toml(dir.path().join("missing.toml"));
        assert_eq!(other.get(), &Settings::default());
    }
}
