//! Print a single utilization field for one scope, `0` on any failure.

use clap::error::ErrorKind;
use clap::Parser;
use dhcp_pool_usage::cli::MetricArgs;
use dhcp_pool_usage::logging::init_logging;
use dhcp_pool_usage::output::{extract_metric, to_json_value, MetricValue};
use dhcp_pool_usage::run_report;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = match MetricArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            println!("0");
            return;
        }
    };
    if let Err(e) = init_logging(false) {
        eprintln!("WARNING: {e}");
    }

    let metric = args.metric.clone();
    let mode = args.zero_mode;
    let value = match lookup(args).await {
        Ok(report) => extract_metric(&report, &metric, mode),
        Err(e) => MetricValue::NoData(e),
    };
    if let MetricValue::NoData(reason) = &value {
        log::warn!("no data for '{metric}': {reason}");
    }
    println!("{value}");
}

async fn lookup(args: MetricArgs) -> Result<serde_json::Value, String> {
    let config = args.into_config().map_err(|e| e.to_string())?;
    let results = run_report(&config).await.map_err(|e| e.to_string())?;
    to_json_value(&results).map_err(|e| e.to_string())
}
