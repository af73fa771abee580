use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pagetext_engine::FetchSettings;
use pagetext_logging::LogDestination;

/// Save the main text of a web page as word-wrapped plain text.
#[derive(Debug, Parser)]
#[command(name = "pagetext", version)]
pub struct Cli {
    /// Page to extract. Prompted for on stdin when omitted.
    pub url: Option<String>,

    /// JSON list of per-site extraction templates.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Root directory for saved text files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log file used with `--log file` or `--log both`.
    #[arg(long, default_value = "pagetext.log")]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Whole-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings::default();
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, LogTarget};
    use clap::{CommandFactory, Parser};
    use std::time::Duration;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::parse_from(["pagetext"]);
        assert_eq!(cli.url, None);
        assert_eq!(cli.config.to_str(), Some("config.json"));
        assert_eq!(cli.log, LogTarget::Terminal);
        assert_eq!(cli.level(), log::LevelFilter::Info);
        assert_eq!(cli.fetch_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "pagetext",
            "https://example.com/a.html",
            "--timeout-secs",
            "5",
            "--log",
            "both",
            "-v",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://example.com/a.html"));
        assert_eq!(cli.log, LogTarget::Both);
        assert_eq!(cli.level(), log::LevelFilter::Debug);
        assert_eq!(cli.fetch_settings().request_timeout, Duration::from_secs(5));
    }
}
