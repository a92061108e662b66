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

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ine_error::{ExporterError, Result};
use ine_sensors::constants::{DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_SENSORS_DEVICE, IPMITOOL, SENSORS};

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9101";

/// Prometheus exporter for IPMI and lm-sensors temperatures
#[derive(Debug, Clone, Parser)]
#[command(name = "ipmi-node-exporter", version, about)]
pub struct Config {
    /// Address to serve /metrics on
    #[arg(long, env = "IPMI_NODE_EXPORTER_LISTEN", default_value = DEFAULT_LISTEN_ADDRESS)]
    pub listen_address: SocketAddr,

    /// Log filter (trace, debug, info, warn, error or a tracing directive)
    #[arg(long, env = "IPMI_NODE_EXPORTER_LOG", default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stdout
    #[arg(long, env = "IPMI_NODE_EXPORTER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// ipmitool executable
    #[arg(long, env = "IPMI_NODE_EXPORTER_IPMITOOL", default_value = IPMITOOL)]
    pub ipmitool: String,

    /// lm-sensors executable
    #[arg(long, env = "IPMI_NODE_EXPORTER_SENSORS", default_value = SENSORS)]
    pub sensors: String,

    /// lm-sensors chip identifier to export temp1 for (repeatable)
    #[arg(long = "sensors-device", default_values_t = [DEFAULT_SENSORS_DEVICE.to_string()])]
    pub sensors_devices: Vec<String>,

    /// Run ipmitool directly instead of through sudo
    #[arg(long)]
    pub no_sudo: bool,

    /// Per-command timeout in seconds, 0 waits forever
    #[arg(long, env = "IPMI_NODE_EXPORTER_COMMAND_TIMEOUT", default_value_t = DEFAULT_COMMAND_TIMEOUT_SECS)]
    pub command_timeout_secs: u64,

    /// Collect once, print the readings as JSON and exit
    #[arg(long)]
    pub collect_once: bool,
}

impl Config {
    pub fn command_timeout(&self) -> Option<Duration> {
        match self.command_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Whether ipmitool should be wrapped in sudo given the effective uid
    pub fn use_sudo(&self, euid: u32) -> bool {
        !self.no_sudo && euid != 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.ipmitool.trim().is_empty() {
            return Err(ExporterError::invalid_config("ipmitool", "path must not be empty"));
        }
        if self.sensors.trim().is_empty() {
            return Err(ExporterError::invalid_config("sensors", "path must not be empty"));
        }
        if self.sensors_devices.is_empty() {
            return Err(ExporterError::invalid_config(
                "sensors_device",
                "at least one device identifier is required",
            ));
        }
        if let Some(blank) = self.sensors_devices.iter().position(|d| d.trim().is_empty()) {
            return Err(ExporterError::invalid_config(
                "sensors_device",
                format!("identifier #{} is blank", blank + 1),
            ));
        }
        Ok(())
    }
}
