//! DHCP scope and lease data model.

use super::AddressRange;
use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;

/// A configured DHCP address pool, as reported by the management API.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Name of the scope, unique per server.
    pub name: String,
    /// Network address (None when neither reported nor derivable).
    pub network: Option<Ipv4Addr>,
    pub subnet_mask: Option<Ipv4Addr>,
    /// None when the server did not say.
    pub enabled: Option<bool>,
    /// Full address range handed to the scope.
    pub range: AddressRange,
    /// Exclusion ranges in the order the server lists them.
    pub exclusions: Vec<AddressRange>,
    /// Reserved addresses.
    pub reservations: BTreeSet<Ipv4Addr>,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({} exclusions, {} reservations)",
            self.name,
            self.range,
            self.exclusions.len(),
            self.reservations.len()
        )
    }
}

/// Kind of lease reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaseType {
    Dynamic,
    Reserved,
    Other(String),
}

impl From<&str> for LeaseType {
    fn from(value: &str) -> Self {
        match value {
            v if v.eq_ignore_ascii_case("dynamic") => LeaseType::Dynamic,
            v if v.eq_ignore_ascii_case("reserved") => LeaseType::Reserved,
            other => LeaseType::Other(other.to_string()),
        }
    }
}

/// A single lease record.
#[derive(Debug, Clone, PartialEq)]
pub struct Lease {
    pub address: Ipv4Addr,
    pub lease_type: LeaseType,
    /// Name of the scope the lease belongs to.
    pub scope_name: String,
}

impl Lease {
    /// True for a dynamic lease handed out by the named scope.
    pub fn is_dynamic_in(&self, scope_name: &str) -> bool {
        self.lease_type == LeaseType::Dynamic && self.scope_name == scope_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_type_from_str() {
        assert_eq!(LeaseType::from("Dynamic"), LeaseType::Dynamic);
        assert_eq!(LeaseType::from("dynamic"), LeaseType::Dynamic);
        assert_eq!(LeaseType::from("Reserved"), LeaseType::Reserved);
        let bootp = LeaseType::Other("Bootp".to_string());
        assert_eq!(LeaseType::from("Bootp"), bootp);
    }

    #[test]
    fn test_is_dynamic_in() {
        let lease = Lease {
            address: Ipv4Addr::new(10, 0, 0, 5),
            lease_type: LeaseType::Dynamic,
            scope_name: "office".to_string(),
        };
        assert!(lease.is_dynamic_in("office"));
        assert!(!lease.is_dynamic_in("lab"));

        let reserved = Lease {
            lease_type: LeaseType::Reserved,
            ..lease
        };
        assert!(!reserved.is_dynamic_in("office"));
    }
}
