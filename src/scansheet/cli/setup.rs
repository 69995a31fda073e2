use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.1" for releases, "0.3.1@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "scansheet", bin_name = "scansheet", version = get_version())]
#[command(about = "Generate, print and check batches of barcodes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json
    #[arg(
        long,
        global = true,
        env = "SCANSHEET_CONFIG_DIR",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate COUNT barcodes and print them as a PDF sheet
    Generate {
        /// Number of barcodes
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// Output file (defaults to the configured one)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Open the sheet in the system viewer once written
        #[arg(long)]
        open: bool,
    },

    /// Interactive console: generate, print and scan in one session
    Session,

    /// Show the effective configuration
    Config,

    /// Write a default config.json
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_options() {
        let cli = Cli::try_parse_from(["scansheet", "generate", "20", "-o", "a.pdf", "--open"])
            .unwrap();
        match cli.command {
            Some(Commands::Generate {
                count,
                output,
                open,
            }) => {
                assert_eq!(count, 20);
                assert_eq!(output, Some(PathBuf::from("a.pdf")));
                assert!(open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_count_reaches_the_api() {
        let cli = Cli::try_parse_from(["scansheet", "generate", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Generate { count: -1, .. })
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["scansheet", "config", "--config-dir", "/tmp/x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["scansheet"]).unwrap();
        assert!(cli.command.is_none());
    }
}
