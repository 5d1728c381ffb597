//! Command line arguments for both binaries.

use crate::config::{
    OutputMode, RunConfig, Thresholds, DEFAULT_CRITICAL, DEFAULT_TIMEOUT_SECS, DEFAULT_WARNING,
};
use crate::error::ApiError;
use crate::output::ZeroMode;
use clap::Parser;
use std::time::Duration;

/// Report DHCP scope pool utilization from a DHCP server's management API
#[derive(Parser, Debug)]
#[command(name = "dhcp-pool-usage", author, version, about, long_about = None)]
pub struct Args {
    /// DHCP server API address, e.g. dns.example.com:5380 or https://dns.example.com
    #[arg(long, env = "DHCP_SERVER")]
    pub server: String,

    /// API access token
    #[arg(long, env = "DHCP_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Only report this scope
    #[arg(long)]
    pub scope: Option<String>,

    /// Print a JSON report instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Show exclusions, reservation split and debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Accept invalid TLS certificates
    #[arg(long, default_value_t = false)]
    pub insecure: bool,

    /// Usage percent at which a scope is ELEVATED
    #[arg(
        long,
        default_value_t = DEFAULT_WARNING,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub warning: u8,

    /// Usage percent at which a scope is CRITICAL
    #[arg(
        long,
        default_value_t = DEFAULT_CRITICAL,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub critical: u8,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Args {
    /// Validate and turn the arguments into a [`RunConfig`].
    pub fn into_config(self) -> Result<RunConfig, ApiError> {
        let thresholds = Thresholds::new(self.warning, self.critical)?;
        let mut config = RunConfig::new(&self.server, &self.token)?;
        if config.token.is_empty() {
            return Err(ApiError::Config("API token is empty".to_string()));
        }
        config.scope = self.scope.filter(|s| !s.trim().is_empty());
        config.output = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        config.verbose = self.verbose;
        config.insecure = self.insecure;
        config.thresholds = thresholds;
        config.timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}

/// Print one utilization field of a scope for a monitoring system
#[derive(Parser, Debug)]
#[command(name = "dhcp-scope-metric", author, version, about, long_about = None)]
pub struct MetricArgs {
    /// DHCP server API address
    pub server: String,

    /// API access token
    pub token: String,

    /// Scope name
    pub scope: String,

    /// Field to print, e.g. usage_percent or available_addresses
    pub metric: String,

    /// Accept invalid TLS certificates when set to true, yes, 1 or insecure
    pub insecure: Option<String>,

    /// How zero values are treated: strict, null-or-zero or string-zero
    #[arg(long, default_value_t = ZeroMode::Strict)]
    pub zero_mode: ZeroMode,
}

impl MetricArgs {
    pub fn is_insecure(&self) -> bool {
        self.insecure.as_deref().is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "insecure"
            )
        })
    }

    pub fn into_config(self) -> Result<RunConfig, ApiError> {
        let mut config = RunConfig::new(&self.server, &self.token)?;
        config.insecure = self.is_insecure();
        config.scope = Some(self.scope);
        config.output = OutputMode::Json;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let argv = ["dhcp-pool-usage", "--server", "dns:5380", "--token", "t"];
        let args = Args::try_parse_from(argv).expect("valid args");
        let config = args.into_config().unwrap();
        assert_eq!(config.server, "http://dns:5380");
        assert_eq!(config.output, OutputMode::Text);
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.scope.is_none());
    }

    #[test]
    fn test_args_all_flags() {
        let args = Args::try_parse_from([
            "dhcp-pool-usage",
            "--server",
            "https://dns",
            "--token",
            "t",
            "--scope",
            "Office",
            "--json",
            "--verbose",
            "--insecure",
            "--warning",
            "60",
            "--critical",
            "80",
        ])
        .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.output, OutputMode::Json);
        assert_eq!(config.scope.as_deref(), Some("Office"));
        assert!(config.insecure && config.verbose);
        assert_eq!(config.thresholds, Thresholds::new(60, 80).unwrap());
    }

    #[test]
    fn test_bad_thresholds_rejected() {
        let parse = |w: &str, c: &str| {
            Args::try_parse_from([
                "dhcp-pool-usage",
                "--server",
                "dns",
                "--token",
                "t",
                "--warning",
                w,
                "--critical",
                c,
            ])
        };
        assert!(parse("abc", "90").is_err());
        assert!(parse("75", "101").is_err());
        let args = parse("90", "80").expect("parses, fails on validation");
        assert!(matches!(args.into_config(), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_metric_args() {
        let args = MetricArgs::try_parse_from([
            "dhcp-scope-metric",
            "dns:5380",
            "t",
            "Office",
            "usage_percent",
            "true",
        ])
        .unwrap();
        assert!(args.is_insecure());
        assert_eq!(args.zero_mode, ZeroMode::Strict);
        let config = args.into_config().unwrap();
        assert_eq!(config.scope.as_deref(), Some("Office"));
        assert!(config.insecure);

        let args = MetricArgs::try_parse_from([
            "dhcp-scope-metric",
            "dns",
            "t",
            "Office",
            "available_addresses",
            "--zero-mode",
            "string-zero",
        ])
        .unwrap();
        assert!(!args.is_insecure());
        assert_eq!(args.zero_mode, ZeroMode::StringZero);
    }
}
