//! DHCP scope pool utilization.
//!
//! Reads scopes, exclusions, reservations and leases from a DHCP server's
//! management API and reduces them to per-scope usage figures.
//!
//! Module structure:
//! - [`models`] - Address ranges, scopes, leases and results
//! - [`api`] - Management API client
//! - [`processing`] - Pool utilization calculation
//! - [`output`] - Text, JSON and single-metric rendering

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use api::{DhcpApi, HttpDhcpApi};
use config::{OutputMode, RunConfig};
use error::ApiError;
use models::UtilizationResult;
use std::error::Error;

/// Fetch all selected scopes from the configured server and compute their usage.
pub async fn run_report(config: &RunConfig) -> Result<Vec<UtilizationResult>, ApiError> {
    let api = HttpDhcpApi::new(config)?;
    fetch_report(&api, config).await
}

/// Like [`run_report`], against any [`DhcpApi`].
pub async fn fetch_report<A: DhcpApi>(
    api: &A,
    config: &RunConfig,
) -> Result<Vec<UtilizationResult>, ApiError> {
    processing::collect_utilization(api, config).await
}

/// Render results in the configured output mode.
pub fn render(results: &[UtilizationResult], config: &RunConfig) -> Result<String, Box<dyn Error>> {
    match config.output {
        OutputMode::Json => output::render_json(results),
        OutputMode::Text => Ok(output::render_text(
            results,
            &config.server,
            config.verbose,
        )),
    }
}
