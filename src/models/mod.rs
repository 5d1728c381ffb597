//! Domain models for DHCP pool usage.
//!
//! This module contains the core data structures used throughout the application:
//! - [`AddressRange`] - inclusive IPv4 range with size and membership helpers
//! - [`Scope`] and [`Lease`] - records fetched from the DHCP server
//! - [`UtilizationResult`] and [`Severity`] - computed per-scope figures

mod ipv4;
mod scope;
mod utilization;

// Re-export public types
pub use ipv4::{
    derive_network, in_excluded_range, ip_to_int, mask_to_prefix, parse_ip, parse_range_list,
    AddressRange, CLASS_C_MASK, MAX_LENGTH,
};
pub use scope::{Lease, LeaseType, Scope};
pub use utilization::{Severity, UtilizationResult};
