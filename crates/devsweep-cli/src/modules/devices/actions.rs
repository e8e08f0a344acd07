use std::io::{BufRead, Write};

use chrono::Utc;
use devsweep_core::{collect_candidates, purge_candidates, Evaluation, SweepError, SweepPlan};
use tracing::info;

use super::confirm::confirm_purge;
use super::report::{describe_progress, write_purge_summary, write_report};
use crate::cli_args::SelectArgs;
use crate::modules::system::{CommandContext, RunStatus};

async fn select(args: &SelectArgs, ctx: &CommandContext<'_>) -> Result<Evaluation, SweepError> {
    let plan = SweepPlan {
        criteria: args.criteria(),
        offline_days: args.offline_days,
        page_size: ctx.config.page_size,
        timestamp_policy: args.on_bad_timestamp.into(),
    };
    collect_candidates(ctx.api, &plan, Utc::now()).await
}

pub(crate) async fn handle_view<W: Write>(
    args: SelectArgs,
    ctx: &CommandContext<'_>,
    out: &mut W,
) -> anyhow::Result<RunStatus> {
    let evaluation = select(&args, ctx).await?;
    write_report(out, &evaluation, ctx.config.format, ctx.config.identifier)?;
    Ok(RunStatus::Completed)
}

pub(crate) async fn handle_delete<R: BufRead, W: Write>(
    args: SelectArgs,
    ctx: &CommandContext<'_>,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<RunStatus> {
    let evaluation = select(&args, ctx).await?;
    write_report(out, &evaluation, ctx.config.format, ctx.config.identifier)?;

    let count = evaluation.candidates.len();
    if count == 0 {
        writeln!(out, "Nothing to delete.")?;
        return Ok(RunStatus::NothingToDo);
    }
    if !confirm_purge(input, out, count)? {
        info!(count, "purge declined");
        writeln!(out, "Aborted; no devices were changed.")?;
        return Ok(RunStatus::Declined);
    }

    info!(count, identifier = %ctx.config.identifier, "purging devices");
    // A broken stdout must not stop the batch.
    let mut write_error = None;
    let report = purge_candidates(
        ctx.api,
        &evaluation.candidates,
        ctx.config.identifier,
        |progress| {
            if write_error.is_none() {
                if let Err(err) = writeln!(out, "{}", describe_progress(&progress)) {
                    write_error = Some(err);
                }
            }
        },
    )
    .await;
    if let Some(err) = write_error {
        return Err(err.into());
    }

    write_purge_summary(out, &report)?;
    if report.has_failures() {
        Ok(RunStatus::PurgeFailures)
    } else {
        Ok(RunStatus::Completed)
    }
}
