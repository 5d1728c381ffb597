//! DHCP management API interaction.
//!
//! This module handles all server-facing operations:
//! - [`client`] - HTTP client and the [`DhcpApi`] trait
//! - [`wire`] - JSON envelope and payload shapes, conversion into models

mod client;
mod wire;

// Re-export public types and functions
pub use client::{DhcpApi, HttpDhcpApi, LEASES_LIST, SCOPES_GET, SCOPES_LIST};
pub use wire::{
    parse_envelope, Envelope, Exclusion, LeaseList, LeaseRecord, ReservedLease, ScopeDetail,
    ScopeList, ScopeSummary,
};
