//! Logging initialization for the notifier binary.
//!
//! Logs go to stdout, and also to a file when `LOG_FILE` is set.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_LEVEL").ok().as_deref(),
            std::env::var("LOG_FILE").ok().as_deref(),
        )
    }

    /// Unknown levels fall back to debug.
    pub fn from_values(level: Option<&str>, file: Option<&str>) -> Self {
        let level = level
            .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Debug);
        let file = file
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Self { level, file }
    }
}

pub fn initialize(settings: &LogSettings) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        settings.level,
        config.clone(),
        TerminalMode::Stdout,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.file {
        if let Some(file_logger) = create_file_logger(path, settings.level, config) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::options().create(true).append(true).open(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not open log file at {:?}: {}", path, err);
            None
        }
    }
}
