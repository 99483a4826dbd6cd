//! User preferences persisted in the OS config directory.

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PlanningError, Result};
use crate::model::timeline::DEFAULT_DAY_WIDTH;
use crate::model::{TimelineWindow, ViewMode, VisibleColumns};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub view_mode: ViewMode,
    pub visible_columns: VisibleColumns,
    /// Width of one day column in day mode.
    pub day_width_px: f32,
    pub row_height: f32,
    pub timeline_start: NaiveDate,
    pub timeline_end: NaiveDate,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        let window = TimelineWindow::planning_default();
        Self {
            view_mode: ViewMode::Month,
            visible_columns: VisibleColumns::default(),
            day_width_px: DEFAULT_DAY_WIDTH,
            row_height: 45.0,
            timeline_start: window.start,
            timeline_end: window.end,
        }
    }
}

impl PlannerSettings {
    /// Timeline window from the stored bounds, or the built-in one when the
    /// stored bounds are inverted or sit on the edge of the calendar.
    pub fn window(&self) -> TimelineWindow {
        TimelineWindow::new(self.timeline_start, self.timeline_end).unwrap_or_else(|e| {
            warn!("{}; using the default window", e);
            TimelineWindow::planning_default()
        })
    }

    /// Directory holding the settings file.
    pub fn config_dir() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "planning-gantt", "PlanningGantt")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(PlanningError::NoConfigDir)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    /// Load from the default location; any problem falls back to defaults.
    pub fn load() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}; using default settings", e);
                return Self::default();
            }
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }

    /// Read `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| PlanningError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = serde_json::from_str(&json)?;
        if settings.day_width_px <= 0.0 {
            settings.day_width_px = DEFAULT_DAY_WIDTH;
        }
        if settings.row_height <= 0.0 {
            settings.row_height = Self::default().row_height;
        }
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| PlanningError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }
}
