//! Per-scope utilization result.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

use super::AddressRange;

/// Severity tier of a scope's usage, ordered from least to most severe.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Normal,
    Elevated,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Normal => "NORMAL",
            Severity::Elevated => "ELEVATED",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// Utilization figures for one scope.
///
/// Counts are signed: inconsistent server data can push `active_pool_size`
/// or `available_count` below zero and that is reported as-is.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UtilizationResult {
    pub scope_name: String,
    pub network: Option<Ipv4Addr>,
    pub subnet_mask: Option<Ipv4Addr>,
    pub enabled: Option<bool>,
    pub range: AddressRange,
    pub exclusions: Vec<AddressRange>,
    pub total_range: i64,
    pub excluded_count: i64,
    pub reserved_count: i64,
    pub reservations_in_excluded: i64,
    pub reservations_outside_excluded: i64,
    pub active_pool_size: i64,
    #[serde(rename = "active_leases")]
    pub active_lease_count: i64,
    #[serde(rename = "available_addresses")]
    pub available_count: i64,
    pub usage_percent: f64,
    pub severity: Severity,
    /// Data-consistency problems found while computing this result.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_errors: Vec<String>,
}

impl UtilizationResult {
    pub fn has_data_errors(&self) -> bool {
        !self.data_errors.is_empty()
    }
}
