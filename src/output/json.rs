//! JSON report keyed by discovery order.

use crate::models::UtilizationResult;
use serde_json::{Map, Value};
use std::error::Error;

/// Build `{"scope_0": {...}, "scope_1": {...}}` in the given order.
///
/// An empty slice gives an empty object.
pub fn to_json_value(results: &[UtilizationResult]) -> Result<Value, Box<dyn Error>> {
    let mut map = Map::new();
    for (i, r) in results.iter().enumerate() {
        let value =
            serde_json::to_value(r).map_err(|e| format!("Error serializing JSON: {e}"))?;
        map.insert(format!("scope_{i}"), value);
    }
    Ok(Value::Object(map))
}

/// Pretty-printed JSON report.
pub fn render_json(results: &[UtilizationResult]) -> Result<String, Box<dyn Error>> {
    let value = to_json_value(results)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::models::{AddressRange, Scope};
    use crate::processing::calculate_utilization;

    fn result(name: &str) -> UtilizationResult {
        let scope = Scope {
            name: name.to_string(),
            network: None,
            subnet_mask: None,
            enabled: None,
            range: "10.0.0.1-10.0.0.100".parse::<AddressRange>().unwrap(),
            exclusions: vec![],
            reservations: Default::default(),
        };
        calculate_utilization(&scope, &[], &Thresholds::default())
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_json(&[]).unwrap(), "{}");
    }

    #[test]
    fn test_keys_in_discovery_order() {
        let results: Vec<_> = (0..12).map(|i| result(&format!("s{i}"))).collect();
        let value = to_json_value(&results).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys[2], "scope_2");
        assert_eq!(keys[10], "scope_10");
        assert_eq!(value["scope_11"]["scope_name"], "s11");
    }

    #[test]
    fn test_field_names() {
        let value = to_json_value(&[result("Office")]).unwrap();
        let scope = &value["scope_0"];
        assert_eq!(scope["total_range"], 100);
        assert_eq!(scope["available_addresses"], 100);
        assert_eq!(scope["active_leases"], 0);
        assert_eq!(scope["usage_percent"], 0.0);
        assert_eq!(scope["severity"], "NORMAL");
        assert_eq!(scope["range"], "10.0.0.1-10.0.0.100");
        assert!(scope["network"].is_null());
        assert!(scope.get("data_errors").is_none());
    }
}
