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

//! Per-scrape collection: run both tools, parse, classify, update gauges.
//!
//! The two sources are independent. A failing tool only marks its own
//! [`SourceReport`] as skipped; the other source and the scrape go on.

use std::sync::Arc;

use ine_error::Result;
use ine_sensors::{
    classify, ipmi, lm_sensors, Category, CommandRunner, CommandSpec, SensorReading, Source,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::registry::MetricRegistry;

/// What to run and which lm-sensors stanzas to read
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    pub ipmi_command: CommandSpec,
    pub sensors_command: CommandSpec,
    pub sensors_devices: Vec<String>,
}

impl CollectorSettings {
    pub fn from_config(config: &Config, use_sudo: bool) -> Self {
        Self {
            ipmi_command: ipmi::command(&config.ipmitool, use_sudo),
            sensors_command: lm_sensors::command(&config.sensors),
            sensors_devices: config.sensors_devices.clone(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Collected,
    Skipped,
}

/// A reading that made it into the registry
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PublishedReading {
    pub category: Category,
    pub sensor_name: String,
    pub value: f64,
}

/// Outcome of one source within one scrape
#[derive(Debug, Serialize, Clone)]
pub struct SourceReport {
    pub source: Source,
    pub status: SourceStatus,
    pub published: usize,
    /// Parsed readings that were not published (unclassified names)
    pub dropped: usize,
    pub error: Option<String>,
    pub readings: Vec<PublishedReading>,
}

impl SourceReport {
    fn skipped(source: Source, error: String) -> Self {
        Self {
            source,
            status: SourceStatus::Skipped,
            published: 0,
            dropped: 0,
            error: Some(error),
            readings: Vec::new(),
        }
    }

    fn log_summary(&self) {
        match self.status {
            SourceStatus::Collected => info!(
                source = %self.source,
                published = self.published,
                dropped = self.dropped,
                "Collected {} readings",
                self.source
            ),
            SourceStatus::Skipped => warn!(
                source = %self.source,
                "Skipped {}: {}",
                self.source,
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ScrapeReport {
    pub ipmi: SourceReport,
    pub sensors: SourceReport,
}

impl ScrapeReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct Collector {
    runner: Arc<dyn CommandRunner>,
    registry: Arc<MetricRegistry>,
    settings: CollectorSettings,
}

impl Collector {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        registry: Arc<MetricRegistry>,
        settings: CollectorSettings,
    ) -> Self {
        Self {
            runner,
            registry,
            settings,
        }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Run both sources and update the registry
    pub async fn collect(&self) -> ScrapeReport {
        let (ipmi, sensors) = tokio::join!(self.collect_ipmi(), self.collect_sensors());
        ipmi.log_summary();
        sensors.log_summary();
        ScrapeReport { ipmi, sensors }
    }

    pub async fn collect_ipmi(&self) -> SourceReport {
        let output = match self.runner.run(&self.settings.ipmi_command).await {
            Ok(output) => output,
            Err(e) => return SourceReport::skipped(Source::Ipmi, e.to_string()),
        };

        let readings = ipmi::parse_output(&output)
            .into_iter()
            .map(|reading| (classify(&reading.name), reading));
        self.publish(Source::Ipmi, readings)
    }

    pub async fn collect_sensors(&self) -> SourceReport {
        let output = match self.runner.run(&self.settings.sensors_command).await {
            Ok(output) => output,
            Err(e) => return SourceReport::skipped(Source::Sensors, e.to_string()),
        };

        let readings = lm_sensors::parse_output(&output, &self.settings.sensors_devices)
            .into_iter()
            .map(|reading| (Category::NetworkCard, reading));
        self.publish(Source::Sensors, readings)
    }

    fn publish(
        &self,
        source: Source,
        readings: impl Iterator<Item = (Category, SensorReading)>,
    ) -> SourceReport {
        let mut report = SourceReport {
            source,
            status: SourceStatus::Collected,
            published: 0,
            dropped: 0,
            error: None,
            readings: Vec::new(),
        };

        for (category, reading) in readings {
            if !category.is_published() {
                info!("Unknown sensor {} with value {}", reading.name, reading.value);
                report.dropped += 1;
                continue;
            }

            match self.registry.set(category, &reading.name, reading.value) {
                Ok(()) => {
                    debug!("Setting {} metric for {}: {}", category, reading.name, reading.value);
                    report.published += 1;
                    report.readings.push(PublishedReading {
                        category,
                        sensor_name: reading.name,
                        value: reading.value,
                    });
                }
                Err(e) => {
                    warn!("Failed to set {} metric for {}: {}", category, reading.name, e);
                    report.dropped += 1;
                }
            }
        }

        report
    }
}
