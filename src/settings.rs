//! User settings stored as settings.json in the app data directory

use crate::types::ChartKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Chart
    pub chart_kind: ChartKind,

    // Date-time picker: limit selection to the next 30 days
    pub limit_picker_range: bool,
    // Last confirmed date-time, seeds the picker on startup
    pub last_scheduled: Option<NaiveDateTime>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            chart_kind: ChartKind::Bar,
            limit_picker_range: false,
            last_scheduled: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("widget-gallery-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn save_then_load() {
        let dir = scratch_dir("settings-save");
        let settings = Settings {
            window_w: Some(1200.0),
            chart_kind: ChartKind::Pie,
            limit_picker_range: true,
            last_scheduled: chrono::NaiveDate::from_ymd_opt(2025, 3, 4)
                .and_then(|d| d.and_hms_opt(13, 30, 0)),
            ..Settings::default()
        };
        settings.save(&dir);
        assert_eq!(Settings::load(&dir), settings);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_or_broken_file_gives_defaults() {
        let dir = scratch_dir("settings-broken");
        assert_eq!(Settings::load(&dir), Settings::default());

        std::fs::write(dir.join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(&dir), Settings::default());

        std::fs::write(dir.join("settings.json"), r#"{"chart_kind":"line"}"#).unwrap();
        assert_eq!(Settings::load(&dir).chart_kind, ChartKind::Line);
        std::fs::remove_dir_all(&dir).ok();
    }
}
