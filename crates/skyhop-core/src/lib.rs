// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airports;
pub mod clock;
pub mod config;
pub mod flights;
pub mod prompt;
pub mod sequence;
pub mod timefmt;

use std::path::PathBuf;
use thiserror::Error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LookupConfig;
pub use flights::lookup::FlightLookupService;
pub use flights::model::{
    Airline, FlightDesignator, FlightEndpoint, FlightRecord, FlightSource, LookupOutcome,
    LookupResult,
};

#[derive(Error, Debug)]
pub enum SkyhopError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-user configuration directory (`~/.config/skyhop` on Linux).
/// Falls back to the working directory when no home directory can be resolved.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "skyhop", "Skyhop")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
