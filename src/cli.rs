//! Command-line flags for the `buildlog` driver.
use std::path::PathBuf;

use clap::Parser;

/// Route build output through a filtered console and a persistent log file.
#[derive(Parser, Debug)]
#[command(
    name = "buildlog",
    about = "Route build output through a filtered console and a persistent log file",
    version
)]
pub struct Cli {
    /// Stored option file (TOML); missing files are ignored
    #[arg(short, long, default_value = "buildlog.toml")]
    pub config: PathBuf,

    /// Level assigned to every input line (lower is more important)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pub level: i32,

    /// Section assigned to every input line
    #[arg(short, long)]
    pub section: Option<String>,

    /// Rank printed as `[rank]` before each line
    #[arg(long)]
    pub rank: Option<u32>,

    /// Print this text in a box before reading input
    #[arg(long)]
    pub banner: Option<String>,

    /// Print the resolved options as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show internal diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Option overrides such as `-debugLevel=4` or `-noOutput`
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub overrides: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["buildlog"]);
        assert_eq!(cli.config, PathBuf::from("buildlog.toml"));
        assert_eq!(cli.level, -1);
        assert_eq!(cli.section, None);
        assert!(cli.overrides.is_empty());
        assert!(!cli.show_config);
    }

    #[test]
    fn parse_level_and_section() {
        let cli = Cli::parse_from(["buildlog", "--level", "2", "-s", "compile"]);
        assert_eq!(cli.level, 2);
        assert_eq!(cli.section.as_deref(), Some("compile"));
    }

    #[test]
    fn parse_negative_level() {
        let cli = Cli::parse_from(["buildlog", "-l", "-1"]);
        assert_eq!(cli.level, -1);
    }

    #[test]
    fn parse_overrides_after_separator() {
        let cli = Cli::parse_from([
            "buildlog",
            "--rank",
            "3",
            "--",
            "-debugLevel=4",
            "-noOutput",
        ]);
        assert_eq!(cli.rank, Some(3));
        assert_eq!(cli.overrides, vec!["-debugLevel=4", "-noOutput"]);
    }

    #[test]
    fn parse_show_config_and_verbose() {
        let cli = Cli::parse_from(["buildlog", "--show-config", "-v"]);
        assert!(cli.show_config);
        assert!(cli.verbose);
    }
}
