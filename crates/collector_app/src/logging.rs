//! Logging setup for the collector app.
//!
//! Logs land in `./collector.log`. Set `COLLECTOR_LOG=terminal` to log to
//! the terminal instead, or `COLLECTOR_LOG=both` for both sinks.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Environment variable selecting the log destination.
pub const LOG_DESTINATION_ENV: &str = "COLLECTOR_LOG";
const LOG_FILE: &str = "./collector.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

impl LogDestination {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_DESTINATION_ENV).ok().as_deref())
    }

    /// Unset or unrecognized values fall back to the log file.
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("terminal") => Self::Terminal,
            Some("both") => Self::Both,
            _ => Self::File,
        }
    }
}

/// Install the global logger. A failure to create the log file degrades to
/// whatever sinks remain rather than aborting startup.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        sinks.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(LOG_FILE) {
            Ok(file) => sinks.push(WriteLogger::new(level, config.clone(), file)),
            Err(err) => eprintln!("could not create {LOG_FILE}: {err}"),
        }
    }

    if !sinks.is_empty() {
        let _ = CombinedLogger::init(sinks);
    }
}

#[cfg(test)]
mod tests {
    use super::LogDestination;

    #[test]
    fn destination_parses_known_values_and_defaults_to_file() {
        assert_eq!(
            LogDestination::parse(Some("terminal")),
            LogDestination::Terminal
        );
        assert_eq!(LogDestination::parse(Some("both")), LogDestination::Both);
        assert_eq!(LogDestination::parse(Some("syslog")), LogDestination::File);
        assert_eq!(LogDestination::parse(None), LogDestination::File);
    }
}
