//! Run configuration and alert thresholds.

use crate::error::ApiError;
use crate::models::Severity;
use std::time::Duration;

/// Default usage percent at which a scope is reported as elevated.
pub const DEFAULT_WARNING: u8 = 75;
/// Default usage percent at which a scope is reported as critical.
pub const DEFAULT_CRITICAL: u8 = 90;
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Usage thresholds, both in percent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: u8,
    pub critical: u8,
}

impl Thresholds {
    /// Validate and build thresholds.
    ///
    /// Both values must be within 0..=100 and `critical` must be above `warning`.
    pub fn new(warning: u8, critical: u8) -> Result<Thresholds, ApiError> {
        if warning > 100 || critical > 100 {
            return Err(ApiError::Config(format!(
                "thresholds must be between 0 and 100 (warning={warning}, critical={critical})"
            )));
        }
        if critical <= warning {
            return Err(ApiError::Config(format!(
                "critical threshold ({critical}) must be greater than warning threshold ({warning})"
            )));
        }
        Ok(Thresholds { warning, critical })
    }

    /// Map a usage percentage to its severity tier.
    pub fn classify(&self, usage_percent: f64) -> Severity {
        if usage_percent >= f64::from(self.critical) {
            Severity::Critical
        } else if usage_percent >= f64::from(self.warning) {
            Severity::Elevated
        } else {
            Severity::Normal
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            warning: DEFAULT_WARNING,
            critical: DEFAULT_CRITICAL,
        }
    }
}

/// How the report is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Everything a run needs, resolved from command line and environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the DHCP server API, always with a scheme.
    pub server: String,
    pub token: String,
    /// Only report this scope when set.
    pub scope: Option<String>,
    pub output: OutputMode,
    pub verbose: bool,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
    pub thresholds: Thresholds,
    pub timeout: Duration,
}

impl RunConfig {
    pub fn new(server: &str, token: &str) -> Result<RunConfig, ApiError> {
        Ok(RunConfig {
            server: normalize_server(server)?,
            token: token.trim().to_string(),
            scope: None,
            output: OutputMode::Text,
            verbose: false,
            insecure: false,
            thresholds: Thresholds::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Add `http://` when no scheme is given and strip trailing slashes.
pub fn normalize_server(server: &str) -> Result<String, ApiError> {
    let server = server.trim().trim_end_matches('/');
    if server.is_empty() {
        return Err(ApiError::Config("server address is empty".to_string()));
    }
    if server.starts_with("http://") || server.starts_with("https://") {
        Ok(server.to_string())
    } else {
        Ok(format!("http://{server}"))
    }
}
