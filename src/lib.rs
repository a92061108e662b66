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

//! ipmi-node-exporter - Prometheus exporter for IPMI and lm-sensors temperatures
//!
//! Every scrape of `/metrics` runs `ipmitool sensor` and `sensors`, sorts the
//! readings into per-category gauges and renders them in the Prometheus text
//! format.

pub mod collector;
pub mod config;
pub mod logger;
pub mod registry;
pub mod server;

pub use collector::{Collector, CollectorSettings, ScrapeReport, SourceReport, SourceStatus};
pub use config::Config;
pub use registry::MetricRegistry;
