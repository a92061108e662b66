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

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ine_sensors::SystemRunner;
use ipmi_node_exporter::{logger, server, Collector, CollectorSettings, Config, MetricRegistry};
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve once SIGINT or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("SIGNAL: shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;
    logger::init_logging(&config).context("failed to initialise logging")?;

    // SAFETY: geteuid has no preconditions and only returns the effective user ID.
    let euid = unsafe { libc::geteuid() };
    let use_sudo = config.use_sudo(euid);

    info!("STARTUP: ipmi-node-exporter {} starting", VERSION);
    info!(
        "STARTUP: euid={}, ipmitool via sudo: {}, command timeout: {}",
        euid,
        use_sudo,
        config
            .command_timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    info!("STARTUP: watching lm-sensors devices {:?}", config.sensors_devices);

    let registry = Arc::new(MetricRegistry::new().context("failed to create metric registry")?);
    let runner = Arc::new(SystemRunner::new(config.command_timeout()));
    let collector = Arc::new(Collector::new(
        runner,
        registry,
        CollectorSettings::from_config(&config, use_sudo),
    ));

    if config.collect_once {
        let report = collector.collect().await;
        println!("{}", report.to_json()?);
        return Ok(());
    }

    server::serve(config.listen_address, collector, shutdown_signal())
        .await
        .with_context(|| format!("server on {} failed", config.listen_address))?;

    info!("SHUTDOWN: ipmi-node-exporter stopped");
    Ok(())
}
