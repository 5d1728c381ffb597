use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use dhcp_pool_usage::cli::Args;
use dhcp_pool_usage::logging::init_logging;
use dhcp_pool_usage::output::disable_color_unless_terminal;
use dhcp_pool_usage::{render, run_report};
use std::io::IsTerminal;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    disable_color_unless_terminal(std::io::stdout().is_terminal());

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{} {e}", "WARNING:".yellow());
    }
    log::info!("#Start main()");

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "ERROR:".red());
            return ExitCode::FAILURE;
        }
    };

    let results = match run_report(&config).await {
        Ok(results) => results,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", "ERROR:".red());
            return ExitCode::FAILURE;
        }
    };

    match render(&results, &config) {
        Ok(report) => {
            print!("{report}");
            if !report.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e}", "ERROR:".red());
            ExitCode::FAILURE
        }
    }
}
