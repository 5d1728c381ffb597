//! IPv4 address and inclusive range utilities.
//!
//! Provides [`AddressRange`] for representing DHCP address ranges,
//! along with the integer conversions used by the pool calculations.

use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// The only mask for which a missing network address is derived.
pub const CLASS_C_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// Convert a dotted-quad IPv4 string to its 32-bit integer value.
///
/// # Examples
/// ```
/// use dhcp_pool_usage::models::ip_to_int;
/// assert_eq!(ip_to_int("10.0.0.1").unwrap(), 0x0A000001);
/// ```
pub fn ip_to_int(ip: &str) -> Result<u32, Box<dyn Error>> {
    let addr = parse_ip(ip)?;
    Ok(u32::from(addr))
}

/// Parse a dotted-quad IPv4 string, trimming surrounding whitespace.
pub fn parse_ip(ip: &str) -> Result<Ipv4Addr, Box<dyn Error>> {
    let ip = ip.trim();
    Ipv4Addr::from_str(ip).map_err(|_| format!("Invalid IPv4 address '{ip}'").into())
}

/// Convert a contiguous subnet mask to its prefix length.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Result<u8, Box<dyn Error>> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones() as u8;
    if ones < MAX_LENGTH && bits << ones != 0 {
        return Err(format!("Subnet mask {mask} is not contiguous").into());
    }
    Ok(ones)
}

/// Derive a missing network address from the starting address.
///
/// Only a 255.255.255.0 mask is handled: the first three octets of `start`
/// followed by `.0`. Any other mask leaves `network` as reported.
pub fn derive_network(
    network: Option<Ipv4Addr>,
    subnet_mask: Option<Ipv4Addr>,
    start: Ipv4Addr,
) -> Option<Ipv4Addr> {
    match (network, subnet_mask) {
        (Some(network), _) => Some(network),
        (None, Some(mask)) if mask == CLASS_C_MASK => {
            let [a, b, c, _] = start.octets();
            Some(Ipv4Addr::new(a, b, c, 0))
        }
        _ => None,
    }
}

/// Test whether `addr` falls inside any of the given ranges.
///
/// Stops at the first matching range; overlapping ranges are not merged.
pub fn in_excluded_range(addr: Ipv4Addr, ranges: &[AddressRange]) -> bool {
    ranges.iter().any(|r| r.contains(addr))
}

/// Parse a comma separated list of `start-end` ranges.
///
/// Empty entries are skipped, so `""` yields an empty list.
pub fn parse_range_list(list: &str) -> Result<Vec<AddressRange>, Box<dyn Error>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(AddressRange::from_str)
        .collect()
}

/// Inclusive IPv4 address range.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressRange {
    /// First address in the range.
    pub start: Ipv4Addr,
    /// Last address in the range.
    pub end: Ipv4Addr,
}

impl AddressRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> AddressRange {
        AddressRange { start, end }
    }

    /// Create a range from two dotted-quad strings.
    pub fn parse(start: &str, end: &str) -> Result<AddressRange, Box<dyn Error>> {
        Ok(AddressRange {
            start: parse_ip(start)?,
            end: parse_ip(end)?,
        })
    }

    /// Number of addresses in the range, `end - start + 1`.
    ///
    /// Signed so that an inverted range shows up as zero or negative
    /// instead of wrapping.
    pub fn size(&self) -> i64 {
        i64::from(u32::from(self.end)) - i64::from(u32::from(self.start)) + 1
    }

    /// True when `end` sorts before `start`.
    pub fn is_inverted(&self) -> bool {
        u32::from(self.end) < u32::from(self.start)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let a = u32::from(addr);
        u32::from(self.start) <= a && a <= u32::from(self.end)
    }

    /// True when both ranges share at least one address.
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        !self.is_inverted()
            && !other.is_inverted()
            && self.start <= other.end
            && other.start <= self.end
    }
}

impl FromStr for AddressRange {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 2 {
            return Err(format!("Invalid address range '{s}', expected start-end").into());
        }
        AddressRange::parse(parts[0], parts[1])
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for AddressRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
