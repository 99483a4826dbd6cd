//! Error type shared by the planning model and the settings store.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("Timeline window ends ({end}) before it starts ({start})")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Timeline window {start} .. {end} touches the edge of the supported calendar")]
    WindowOutOfRange { start: NaiveDate, end: NaiveDate },

    #[error("End date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Work item title must not be empty")]
    EmptyTitle,

    #[error("Work item {0} not found")]
    UnknownItem(String),

    #[error("Failed to access settings file at {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file is not valid JSON: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, PlanningError>;
