use std::io;

use crate::cli_args::*;
use crate::modules::devices::{handle_delete, handle_view};
use crate::modules::system::{CommandContext, RunStatus};

pub(crate) async fn handle_command(
    command: Command,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<RunStatus> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::View(args) => handle_view(args, ctx, &mut out).await,
        Command::Delete(args) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            handle_delete(args, ctx, &mut input, &mut out).await
        }
    }
}
