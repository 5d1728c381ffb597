//! Logger setup.
//!
//! Logs always go to stderr so stdout carries only the report.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Config file honoured when present in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Initialise log4rs from [`LOG_CONFIG_FILE`], or a stderr console logger.
///
/// `verbose` always selects the built-in debug logger.
pub fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    if !verbose && Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {LOG_CONFIG_FILE}: {e}"))?;
        return Ok(());
    }
    log4rs::init_config(stderr_config(verbose)?)?;
    Ok(())
}

/// Console config writing to stderr at `warn`, or `debug` when verbose.
pub fn stderr_config(verbose: bool) -> Result<Config, Box<dyn Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_config_levels() {
        let quiet = stderr_config(false).expect("config builds");
        assert_eq!(quiet.root().level(), LevelFilter::Warn);
        let verbose = stderr_config(true).expect("config builds");
        assert_eq!(verbose.root().level(), LevelFilter::Debug);
        assert_eq!(verbose.appenders().len(), 1);
    }
}
