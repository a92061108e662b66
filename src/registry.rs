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

//! Gauge families for every published sensor category.
//!
//! Each category owns one `GaugeVec` labeled by `sensor_name`. Setting a
//! value replaces the previous one; series are never removed, so a sensor
//! that disappears keeps exporting its last value.

use std::collections::HashMap;

use ine_error::{ExporterError, Result};
use ine_sensors::Category;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

pub const SENSOR_NAME_LABEL: &str = "sensor_name";

/// Metric name and help text for a published category
pub fn metric_desc(category: Category) -> Option<(&'static str, &'static str)> {
    match category {
        Category::Dimm => Some(("ipmi_temp_dimm_sensor", "IPMI DIMM sensor values")),
        Category::VrDimm => Some(("ipmi_temp_vrdimm_sensor", "IPMI VR DIMM sensor values")),
        Category::Cpu => Some(("ipmi_temp_cpu_sensor", "IPMI CPU sensor values")),
        Category::Env => Some(("ipmi_temp_env_sensor", "IPMI environment sensor values")),
        Category::Hic => Some(("ipmi_temp_hic_sensor", "IPMI HIC sensor values")),
        Category::NetworkCard => Some(("network_card_temp_sensor", "Network card temp sensor")),
        Category::Unknown => None,
    }
}

/// Owned set of sensor gauges backed by a private prometheus registry
pub struct MetricRegistry {
    registry: Registry,
    gauges: HashMap<Category, GaugeVec>,
}

impl MetricRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut gauges = HashMap::new();

        for category in Category::PUBLISHED {
            let Some((name, help)) = metric_desc(category) else {
                continue;
            };
            let gauge = GaugeVec::new(Opts::new(name, help), &[SENSOR_NAME_LABEL])
                .map_err(ExporterError::metrics)?;
            registry
                .register(Box::new(gauge.clone()))
                .map_err(ExporterError::metrics)?;
            gauges.insert(category, gauge);
        }

        Ok(Self { registry, gauges })
    }

    /// Replace the value of `(category, sensor_name)`
    pub fn set(&self, category: Category, sensor_name: &str, value: f64) -> Result<()> {
        let gauge = self.gauges.get(&category).ok_or_else(|| {
            ExporterError::Metrics(format!("category {} has no gauge", category))
        })?;
        gauge
            .get_metric_with_label_values(&[sensor_name])
            .map_err(ExporterError::metrics)?
            .set(value);
        Ok(())
    }

    /// Render all series in the text exposition format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buf)
            .map_err(ExporterError::metrics)?;
        String::from_utf8(buf).map_err(ExporterError::metrics)
    }

    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
