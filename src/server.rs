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

//! HTTP scrape endpoint
//!
//! `GET /metrics` collects fresh readings from both tools and then renders the
//! whole registry. Nothing is cached between scrapes.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use ine_error::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::collector::Collector;

pub const METRICS_PATH: &str = "/metrics";

pub fn router(collector: Arc<Collector>) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_handler))
        .with_state(collector)
}

async fn metrics_handler(State(collector): State<Arc<Collector>>) -> Response {
    debug!("Handling {} request", METRICS_PATH);
    collector.collect().await;

    let registry = collector.registry();
    match registry.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, registry.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, collector: Arc<Collector>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}{}", listener.local_addr()?, METRICS_PATH);

    axum::serve(listener, router(collector))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
