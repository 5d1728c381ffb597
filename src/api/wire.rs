//! JSON shapes returned by the DHCP management API.
//!
//! Every endpoint wraps its payload in an envelope:
//! `{"status": "ok"|"error", "errorMessage": "...", "response": {...}}`.

use crate::error::ApiError;
use crate::models::{derive_network, parse_ip, AddressRange, Lease, LeaseType, Scope};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;

/// Outer envelope shared by all endpoints.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: String,
    pub error_message: Option<String>,
    pub response: Option<serde_json::Value>,
}

/// `response` of the scope list endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ScopeList {
    #[serde(default)]
    pub scopes: Vec<ScopeSummary>,
}

/// One entry of the scope list.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub name: String,
    pub enabled: Option<bool>,
    pub network_address: Option<String>,
    pub subnet_mask: Option<String>,
}

/// `response` of the scope detail endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDetail {
    pub name: Option<String>,
    pub starting_address: String,
    pub ending_address: String,
    pub network_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub exclusions: Option<Vec<Exclusion>>,
    #[serde(default)]
    pub reserved_leases: Option<Vec<ReservedLease>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub starting_address: String,
    pub ending_address: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReservedLease {
    pub address: String,
}

/// `response` of the lease list endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct LeaseList {
    #[serde(default)]
    pub leases: Vec<LeaseRecord>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRecord {
    pub address: String,
    #[serde(rename = "type")]
    pub lease_type: String,
    pub scope: String,
}

/// Unwrap an envelope and deserialize its `response` into `T`.
///
/// Deserialization errors carry the JSON path of the offending field.
pub fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    let data_error = |message: String| ApiError::Data {
        endpoint: endpoint.to_string(),
        message,
    };

    let mut deserializer = serde_json::Deserializer::from_str(body);
    let envelope: Envelope = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::debug!("BODY START:\n\n{body}\n\nBODY END\n");
        data_error(format!("path={} error={}", e.path(), e))
    })?;

    if !envelope.status.eq_ignore_ascii_case("ok") {
        return Err(ApiError::Protocol {
            endpoint: endpoint.to_string(),
            message: envelope
                .error_message
                .unwrap_or_else(|| format!("status '{}'", envelope.status)),
        });
    }

    let response = envelope
        .response
        .ok_or_else(|| data_error("envelope has no 'response'".to_string()))?;

    serde_path_to_error::deserialize(response)
        .map_err(|e| data_error(format!("path=response.{} error={}", e.path(), e)))
}

fn parse_optional_ip(value: Option<&str>) -> Result<Option<Ipv4Addr>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(ip) => parse_ip(ip).map(Some).map_err(|e| e.to_string()),
    }
}

impl ScopeDetail {
    /// Build a [`Scope`] from the detail record, filling gaps from the list entry.
    pub fn into_scope(self, summary: &ScopeSummary) -> Result<Scope, ApiError> {
        let endpoint = format!("scope '{}'", summary.name);
        let data_error = |message: String| ApiError::Data {
            endpoint: endpoint.clone(),
            message,
        };

        let range = AddressRange::parse(&self.starting_address, &self.ending_address)
            .map_err(|e| data_error(format!("range: {e}")))?;

        let exclusions = self
            .exclusions
            .unwrap_or_default()
            .iter()
            .map(|x| AddressRange::parse(&x.starting_address, &x.ending_address))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| data_error(format!("exclusion: {e}")))?;

        let reservations = self
            .reserved_leases
            .unwrap_or_default()
            .iter()
            .map(|r| parse_ip(&r.address))
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| data_error(format!("reservation: {e}")))?;

        let subnet_mask = parse_optional_ip(
            self.subnet_mask
                .as_deref()
                .or(summary.subnet_mask.as_deref()),
        )
        .map_err(|e| data_error(format!("subnetMask: {e}")))?;

        let network = parse_optional_ip(
            self.network_address
                .as_deref()
                .or(summary.network_address.as_deref()),
        )
        .map_err(|e| data_error(format!("networkAddress: {e}")))?;

        Ok(Scope {
            name: summary.name.clone(),
            network: derive_network(network, subnet_mask, range.start),
            subnet_mask,
            enabled: self.enabled.or(summary.enabled),
            range,
            exclusions,
            reservations,
        })
    }
}

impl LeaseRecord {
    pub fn to_lease(&self) -> Result<Lease, ApiError> {
        let address = parse_ip(&self.address).map_err(|e| ApiError::Data {
            endpoint: format!("lease in scope '{}'", self.scope),
            message: e.to_string(),
        })?;
        Ok(Lease {
            address,
            lease_type: LeaseType::from(self.lease_type.as_str()),
            scope_name: self.scope.clone(),
        })
    }
}
