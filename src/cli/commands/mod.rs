//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod content;
pub mod serve;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::error::FolioError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` is fired by the process signal handler; only `serve` waits
/// on it.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), FolioError> {
    match cli.command {
        Commands::Serve(args) => serve::run(&args, cancel).await,
        Commands::Init(args) => content::init(&args).await,
        Commands::Validate(args) => content::validate(&args).await,
        Commands::Show(args) => content::show(&args).await,
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
