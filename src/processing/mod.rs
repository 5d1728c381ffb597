//! Scope utilization processing logic.
//!
//! This module contains the business logic for turning server data into figures:
//! - [`pool`] - Pure pool utilization calculation for one scope
//! - [`collect`] - Fetching all scopes and leases and computing their results

mod collect;
mod pool;

// Re-export public functions
pub use collect::collect_utilization;
pub use pool::{calculate_utilization, round2};
