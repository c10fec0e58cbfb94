//! CLI argument definitions.
//!
//! All Clap derive structs for `folio` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

/// Default location of the content document.
pub const DEFAULT_CONTENT_PATH: &str = "data/content.json";

// ============================================================================
// Root CLI
// ============================================================================

/// Content API and admin editor for a single-page portfolio site.
#[derive(Parser, Debug)]
#[command(name = "folio", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "FOLIO_COLOR")]
    pub color: ColorChoice,

    /// Log line format.
    #[arg(long, default_value = "human", global = true, env = "FOLIO_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the content API and admin editor.
    Serve(ServeArgs),

    /// Write the seed content document.
    Init(InitArgs),

    /// Check a content document and report what it holds.
    Validate(ValidateArgs),

    /// Print one content section as JSON.
    Show(ShowArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `serve`.
///
/// Every option overrides the matching config file setting.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen on `[host:]port`.
    #[arg(short, long, env = "FOLIO_BIND")]
    pub bind: Option<String>,

    /// Path of the content document.
    #[arg(long, env = "FOLIO_CONTENT")]
    pub content: Option<PathBuf>,

    /// Directory receiving uploaded images.
    #[arg(long, env = "FOLIO_UPLOADS")]
    pub uploads: Option<PathBuf>,

    /// Expose Prometheus metrics on `127.0.0.1:<port>`.
    #[arg(long, env = "FOLIO_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Append audit events as JSON lines to this file.
    #[arg(long, env = "FOLIO_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Admin username.
    #[arg(long, env = "FOLIO_ADMIN_USERNAME")]
    pub admin_username: Option<String>,

    /// Admin password.
    #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

/// Arguments for `init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the document.
    #[arg(long, default_value = DEFAULT_CONTENT_PATH, env = "FOLIO_CONTENT")]
    pub content: PathBuf,

    /// Overwrite an existing document.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document to check.
    #[arg(long, default_value = DEFAULT_CONTENT_PATH, env = "FOLIO_CONTENT")]
    pub content: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Section name, as a document key (`techStack`) or route (`techstack`).
    pub section: String,

    /// Document to read.
    #[arg(long, default_value = DEFAULT_CONTENT_PATH, env = "FOLIO_CONTENT")]
    pub content: PathBuf,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal support automatically.
    #[default]
    Auto,
    /// Always emit ANSI color codes.
    Always,
    /// Never emit ANSI color codes.
    Never,
}

/// Output format for commands that print reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Human,
    /// JSON on stdout.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
