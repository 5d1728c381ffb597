//! Human readable report.

use crate::models::{mask_to_prefix, Severity, UtilizationResult};
use colored::{ColoredString, Colorize};
use itertools::Itertools;
use std::fmt::Write;

/// Width of the label column.
const LABEL_WIDTH: usize = 16;

/// Format a label padded to the label column.
///
/// # Arguments
/// * `label` - The label text, without colon
///
/// # Returns
/// The label followed by a colon and padding
pub fn format_label(label: &str) -> String {
    let with_colon = format!("{label}:");
    format!("{with_colon:<width$}", width = LABEL_WIDTH)
}

/// Turn colored output off when the report does not go to a terminal.
pub fn disable_color_unless_terminal(is_terminal: bool) {
    if !is_terminal {
        colored::control::set_override(false);
    }
}

/// Color a string by severity tier.
pub fn paint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Normal => text.green(),
        Severity::Elevated => text.yellow(),
        Severity::Critical => text.red().bold(),
    }
}

fn enabled_str(enabled: Option<bool>) -> &'static str {
    match enabled {
        Some(true) => "enabled",
        Some(false) => "disabled",
        None => "unknown",
    }
}

fn network_str(r: &UtilizationResult) -> String {
    match (r.network, r.subnet_mask) {
        (Some(net), Some(mask)) => match mask_to_prefix(mask) {
            Ok(prefix) => format!("{net}/{prefix}"),
            Err(_) => format!("{net} mask {mask}"),
        },
        (Some(net), None) => net.to_string(),
        (None, Some(mask)) => format!("unknown (mask {mask})"),
        (None, None) => "unknown".to_string(),
    }
}

/// Render one scope block.
pub fn render_scope(r: &UtilizationResult, verbose: bool) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let name = r.scope_name.bold();
    let _ = writeln!(out, "Scope: {name} [{}]", enabled_str(r.enabled));
    let mut line = |label: &str, value: String| {
        let _ = writeln!(out, "  {}{value}", format_label(label));
    };
    line("Network", network_str(r));
    let range = format!("{} ({} addresses)", r.range, r.total_range);
    line("Address range", range);
    line("Excluded", r.excluded_count.to_string());
    if verbose && !r.exclusions.is_empty() {
        line("Exclusions", r.exclusions.iter().join(", "));
    }
    line("Reserved", r.reserved_count.to_string());
    if verbose {
        line("  in excluded", r.reservations_in_excluded.to_string());
        line("  in pool", r.reservations_outside_excluded.to_string());
    }
    line("Active pool", r.active_pool_size.to_string());
    line("Active leases", r.active_lease_count.to_string());
    line("Available", r.available_count.to_string());
    let usage = format!("{:.2}% [{}]", r.usage_percent, r.severity);
    line("Utilization", paint(&usage, r.severity).to_string());
    for e in &r.data_errors {
        line("Data error", e.red().to_string());
    }
    out
}

/// Render the full text report.
///
/// # Arguments
/// * `results` - Scope results in discovery order
/// * `server` - Server the data came from, shown in the header
/// * `verbose` - Include exclusion list and reservation split
pub fn render_text(results: &[UtilizationResult], server: &str, verbose: bool) -> String {
    let now = chrono::Local::now();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "DHCP pool usage for {server} at {}",
        now.format("%Y-%m-%d %H:%M:%S")
    );

    if results.is_empty() {
        let _ = writeln!(out, "No DHCP scopes found.");
        return out;
    }

    for r in results {
        let _ = writeln!(out);
        out.push_str(&render_scope(r, verbose));
    }

    let worst = results.iter().map(|r| r.severity).max();
    let worst = worst.unwrap_or(Severity::Normal);
    let counts = results.iter().map(|r| r.severity).counts();
    let summary = [Severity::Critical, Severity::Elevated, Severity::Normal]
        .iter()
        .filter_map(|s| counts.get(s).map(|n| format!("{n} {s}")))
        .join(", ");
    let _ = writeln!(out);
    let summary = paint(&summary, worst);
    let _ = writeln!(out, "{} scope(s): {summary}", results.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressRange;
    use std::net::Ipv4Addr;

    fn sample(severity: Severity) -> UtilizationResult {
        UtilizationResult {
            scope_name: "Office".to_string(),
            network: Some(Ipv4Addr::new(10, 10, 10, 0)),
            subnet_mask: Some(Ipv4Addr::new(255, 255, 255, 0)),
            enabled: Some(true),
            range: "10.10.10.1-10.10.10.254".parse::<AddressRange>().unwrap(),
            exclusions: vec!["10.10.10.1-10.10.10.25".parse().unwrap()],
            total_range: 254,
            excluded_count: 25,
            reserved_count: 2,
            reservations_in_excluded: 1,
            reservations_outside_excluded: 1,
            active_pool_size: 228,
            active_lease_count: 57,
            available_count: 171,
            usage_percent: 25.0,
            severity,
            data_errors: vec![],
        }
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("Excluded"), "Excluded:       ");
        assert_eq!(format_label("A very long label").len(), 18);
    }

    #[test]
    fn test_render_scope() {
        colored::control::set_override(false);
        let text = render_scope(&sample(Severity::Normal), false);
        assert!(text.contains("Scope: Office [enabled]"));
        assert!(text.contains("10.10.10.0/24"));
        assert!(text.contains("10.10.10.1-10.10.10.254 (254 addresses)"));
        assert!(text.contains("25.00% [NORMAL]"));
        assert!(!text.contains("Exclusions"));

        let verbose = render_scope(&sample(Severity::Normal), true);
        assert!(verbose.contains("Exclusions:     10.10.10.1-10.10.10.25"));
        assert!(verbose.contains("in pool"));
    }

    #[test]
    fn test_piped_output_has_no_escape_codes() {
        disable_color_unless_terminal(false);
        let results = vec![sample(Severity::Critical)];
        let text = render_text(&results, "http://dns.local", false);
        assert!(!text.contains('\u{1b}'), "{text:?}");
        assert_eq!(paint("x", Severity::Critical).to_string(), "x");
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&[], "http://dns.local", false);
        assert!(text.contains("No DHCP scopes found."));
    }

    #[test]
    fn test_render_text_summary() {
        colored::control::set_override(false);
        let results = vec![sample(Severity::Critical), sample(Severity::Normal)];
        let text = render_text(&results, "http://dns.local", false);
        assert!(text.contains("2 scope(s): 1 CRITICAL, 1 NORMAL"));
    }
}
