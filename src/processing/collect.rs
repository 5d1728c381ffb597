//! Fetch every scope from the server and compute its utilization.

use super::pool::calculate_utilization;
use crate::api::{DhcpApi, LeaseRecord, ScopeSummary};
use crate::config::RunConfig;
use crate::error::ApiError;
use crate::models::{Lease, UtilizationResult};
use colored::Colorize;
use futures::future::join_all;

/// Collect utilization for all scopes (or the one selected in `config`).
///
/// A failing scope list is fatal. Per-scope failures degrade instead:
/// a scope whose detail cannot be read is skipped, a scope whose leases
/// cannot be read is reported with zero leases and a data error.
/// If scopes were listed but none of them could be read the run fails
/// with [`ApiError::NoScopeData`].
/// Results keep the server's scope order.
pub async fn collect_utilization<A: DhcpApi>(
    api: &A,
    config: &RunConfig,
) -> Result<Vec<UtilizationResult>, ApiError> {
    let mut scopes = api.list_scopes().await?;

    if let Some(wanted) = &config.scope {
        scopes.retain(|s| &s.name == wanted);
        if scopes.is_empty() {
            return Err(ApiError::Config(format!(
                "scope '{wanted}' was not found on the server"
            )));
        }
    }
    log::info!("processing {} scope(s)", scopes.len());

    let results = join_all(scopes.iter().map(|s| scope_utilization(api, s, config))).await;
    let results: Vec<UtilizationResult> = results.into_iter().flatten().collect();

    let skipped = scopes.len() - results.len();
    if skipped > 0 {
        log::warn!("{skipped} of {} scope(s) skipped", scopes.len());
    }
    if results.is_empty() && !scopes.is_empty() {
        return Err(ApiError::NoScopeData {
            listed: scopes.len(),
        });
    }
    Ok(results)
}

async fn scope_utilization<A: DhcpApi>(
    api: &A,
    summary: &ScopeSummary,
    config: &RunConfig,
) -> Option<UtilizationResult> {
    let scope = api
        .get_scope(&summary.name)
        .await
        .and_then(|detail| detail.into_scope(summary));
    let scope = match scope {
        Ok(scope) => scope,
        Err(e) => {
            log::warn!(
                "{skipped} scope '{name}': {e}",
                skipped = "skipped".on_red(),
                name = summary.name
            );
            return None;
        }
    };
    log::debug!("scope {scope}");

    let (leases, lease_error) = match api.list_leases(&scope.name).await {
        Ok(records) => (to_leases(&scope.name, &records), None),
        Err(e) => {
            log::warn!(
                "scope '{}': cannot read leases, assuming none: {e}",
                scope.name
            );
            (Vec::new(), Some(format!("lease list unavailable: {e}")))
        }
    };

    let mut result = calculate_utilization(&scope, &leases, &config.thresholds);
    result.data_errors.extend(lease_error);
    Some(result)
}

/// Convert lease records, dropping (and logging) those that cannot be parsed.
fn to_leases(scope: &str, records: &[LeaseRecord]) -> Vec<Lease> {
    records
        .iter()
        .filter_map(|r| match r.to_lease() {
            Ok(lease) => Some(lease),
            Err(e) => {
                log::warn!("scope '{scope}': ignoring lease: {e}");
                None
            }
        })
        .collect()
}
