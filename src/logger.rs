/*
 * This file is part of ipmi-node-exporter.
 *
 * Copyright (C) 2025 ipmi-node-exporter contributors
 *
 * ipmi-node-exporter is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ipmi-node-exporter is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ipmi-node-exporter. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use ine_error::{ExporterError, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Open a log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    let log_file_err = |source| ExporterError::LogFile {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(log_file_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_file_err)
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| ExporterError::invalid_config("log_level", e.to_string()))
}

/// Install the global tracing subscriber.
///
/// Logs go to stdout unless a log file is configured, in which case they are
/// appended there without ANSI colors.
pub fn init_logging(config: &Config) -> Result<()> {
    let filter = env_filter(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter);

    let installed = match (&config.log_file, config.log_json) {
        (Some(path), true) => builder
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        (Some(path), false) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    installed.map_err(|e| ExporterError::invalid_config("logging", e.to_string()))
}
