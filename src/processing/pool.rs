//! Pool utilization calculation.
//!
//! Reconciles a scope's full range, exclusion ranges, reservations and
//! dynamic leases into a single [`UtilizationResult`].

use crate::config::Thresholds;
use crate::models::{in_excluded_range, Lease, Scope, UtilizationResult};

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute utilization for one scope from its leases.
///
/// Only dynamic leases of this scope that sit outside every exclusion
/// are counted. Overlapping exclusions are summed as-is and flagged.
pub fn calculate_utilization(
    scope: &Scope,
    leases: &[Lease],
    thresholds: &Thresholds,
) -> UtilizationResult {
    let mut data_errors = Vec::new();

    let total_range = scope.range.size();
    if total_range <= 0 {
        data_errors.push(format!(
            "address range {} is empty or inverted (size {total_range})",
            scope.range
        ));
    }

    for x in scope.exclusions.iter().filter(|x| x.is_inverted()) {
        data_errors.push(format!("exclusion {x} is inverted (size {})", x.size()));
    }
    let excluded_count: i64 = scope.exclusions.iter().map(|x| x.size()).sum();
    if has_overlap(scope) {
        data_errors.push("exclusion ranges overlap, excluded count is overstated".to_string());
    }

    let (reservations_in_excluded, reservations_outside_excluded) = scope
        .reservations
        .iter()
        .fold((0i64, 0i64), |(inside, outside), addr| {
            if in_excluded_range(*addr, &scope.exclusions) {
                (inside + 1, outside)
            } else {
                (inside, outside + 1)
            }
        });
    let reserved_count = reservations_in_excluded + reservations_outside_excluded;

    let active_pool_size = total_range - excluded_count - reservations_outside_excluded;

    let active_lease_count = leases
        .iter()
        .filter(|l| l.is_dynamic_in(&scope.name))
        .filter(|l| !in_excluded_range(l.address, &scope.exclusions))
        .count() as i64;

    let available_count = active_pool_size - active_lease_count;
    if available_count < 0 {
        data_errors.push(format!(
            "{active_lease_count} active leases exceed the pool of {active_pool_size}"
        ));
    }

    let usage_percent = if active_pool_size > 0 {
        round2(active_lease_count as f64 / active_pool_size as f64 * 100.0)
    } else {
        0.0
    };

    for e in &data_errors {
        log::warn!("scope '{}': {e}", scope.name);
    }

    UtilizationResult {
        scope_name: scope.name.clone(),
        network: scope.network,
        subnet_mask: scope.subnet_mask,
        enabled: scope.enabled,
        range: scope.range,
        exclusions: scope.exclusions.clone(),
        total_range,
        excluded_count,
        reserved_count,
        reservations_in_excluded,
        reservations_outside_excluded,
        active_pool_size,
        active_lease_count,
        available_count,
        usage_percent,
        severity: thresholds.classify(usage_percent),
        data_errors,
    }
}

fn has_overlap(scope: &Scope) -> bool {
    let x = &scope.exclusions;
    (0..x.len()).any(|i| x[i + 1..].iter().any(|other| x[i].overlaps(other)))
}
