//! Single-value extraction for monitoring systems.
//!
//! Picks one field out of the first scope of a JSON report. Historical
//! wrappers could not tell a genuine zero from missing data; those
//! behaviours are kept as explicit [`ZeroMode`]s.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How zero values are interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ZeroMode {
    /// Numeric zero is data; only absent or null fields are missing.
    #[default]
    Strict,
    /// Numeric zero is treated the same as an absent field.
    NullOrZero,
    /// Like [`ZeroMode::NullOrZero`], and the string `"0"` is also a failure.
    StringZero,
}

impl FromStr for ZeroMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ZeroMode::Strict),
            "null-or-zero" => Ok(ZeroMode::NullOrZero),
            "string-zero" => Ok(ZeroMode::StringZero),
            other => Err(format!(
                "unknown zero mode '{other}' (expected strict, null-or-zero or string-zero)"
            )),
        }
    }
}

impl fmt::Display for ZeroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ZeroMode::Strict => "strict",
            ZeroMode::NullOrZero => "null-or-zero",
            ZeroMode::StringZero => "string-zero",
        };
        f.write_str(s)
    }
}

/// Outcome of a metric lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Value(f64),
    /// Field missing, null, not numeric, or a zero the mode rejects.
    NoData(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Value(v) => *v,
            MetricValue::NoData(_) => 0.0,
        }
    }
}

impl fmt::Display for MetricValue {
    /// Integral values print without a fraction, everything else as-is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.as_f64();
        if v.fract() == 0.0 && v.abs() < 1e15 {
            write!(f, "{}", v as i64)
        } else {
            write!(f, "{v}")
        }
    }
}

/// Extract `field` from the first scope of a `scope_N` keyed report.
///
/// A bare scope object (without `scope_N` wrapping) is accepted as well.
pub fn extract_metric(report: &Value, field: &str, mode: ZeroMode) -> MetricValue {
    let scope = match report.get("scope_0") {
        Some(scope) => scope,
        None => match report.as_object().and_then(|m| m.values().next()) {
            Some(first) if first.is_object() => first,
            _ => report,
        },
    };

    let value = match scope.get(field) {
        None => return MetricValue::NoData(format!("field '{field}' is absent")),
        Some(Value::Null) => return MetricValue::NoData(format!("field '{field}' is null")),
        Some(v) => v,
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if mode == ZeroMode::StringZero && s.trim() == "0" {
                return MetricValue::NoData(format!("field '{field}' is the string \"0\""));
            }
            s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match number {
        None => MetricValue::NoData(format!("field '{field}' is not numeric: {value}")),
        Some(n) if n == 0.0 && mode != ZeroMode::Strict => {
            MetricValue::NoData(format!("field '{field}' is zero ({mode} mode)"))
        }
        Some(n) => MetricValue::Value(n),
    }
}
