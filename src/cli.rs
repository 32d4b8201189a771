//! Command line flags

use clap::Parser;
use std::path::PathBuf;

/// Refine - terminal client for a prompt refinement service
#[derive(Debug, Parser)]
#[command(name = "refine", about = "Refine informal prompts into structured, high-quality prompts", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Refinement service base URL (overrides config)
    #[arg(long = "base-url", help = "Refinement service base URL (overrides config)")]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["refine"]);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "refine",
            "-c",
            "/tmp/refine.yml",
            "--log-level",
            "DEBUG",
            "--base-url",
            "http://10.0.0.5:8000",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/refine.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.5:8000"));
    }
}
