//! Command dispatch.

pub mod hitcounts;

use fmc_api::FmcClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a connected command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &FmcClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Get(args) => hitcounts::get(&args, client, global).await,
        Command::Refresh(args) => hitcounts::refresh(&args, client, global).await,
        Command::Clear(args) => hitcounts::clear(&args, client, global).await,
        // Handled before connecting.
        Command::Completions(_) => Ok(()),
    }
}
