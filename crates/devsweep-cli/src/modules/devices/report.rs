use std::io::Write;

use devsweep_core::{
    Candidate, Device, Evaluation, IdentifierField, PurgeOutcome, PurgeProgress, PurgeReport,
};
use serde::Serialize;

use crate::cli_args::OutputFormat;

#[derive(Serialize)]
struct CandidateRow<'a> {
    name: &'a str,
    identifier: Option<&'a str>,
    days_offline: Option<i64>,
    device: &'a Device,
}

pub(crate) fn write_report<W: Write>(
    out: &mut W,
    evaluation: &Evaluation,
    format: OutputFormat,
    field: IdentifierField,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<CandidateRow<'_>> = evaluation
                .candidates
                .iter()
                .map(|candidate| CandidateRow {
                    name: &candidate.name,
                    identifier: candidate.device.identifier(field),
                    days_offline: candidate.days_offline,
                    device: &candidate.device,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            if evaluation.candidates.is_empty() {
                writeln!(out, "No devices matched.")?;
            } else {
                write_table(out, &evaluation.candidates, field)?;
                writeln!(out)?;
                writeln!(out, "Total devices matched: {}", evaluation.candidates.len())?;
            }
            if !evaluation.skipped.is_empty() {
                writeln!(
                    out,
                    "Skipped {} devices with unreadable last_online: {}",
                    evaluation.skipped.len(),
                    evaluation.skipped.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    candidates: &[Candidate],
    field: IdentifierField,
) -> std::io::Result<()> {
    let mut rows = Vec::with_capacity(candidates.len());
    let mut name_width = "NAME".len();
    let mut id_width = "IDENTIFIER".len();

    for candidate in candidates {
        let identifier = candidate.device.identifier(field).unwrap_or("-");
        let days = candidate
            .days_offline
            .map(|days| days.to_string())
            .unwrap_or_else(|| "-".to_string());
        name_width = name_width.max(candidate.name.chars().count());
        id_width = id_width.max(identifier.chars().count());
        rows.push((candidate.name.as_str(), identifier, days));
    }

    writeln!(
        out,
        "{:<name_width$}  {:<id_width$}  DAYS OFFLINE",
        "NAME", "IDENTIFIER"
    )?;
    for (name, identifier, days) in rows {
        writeln!(out, "{name:<name_width$}  {identifier:<id_width$}  {days}")?;
    }
    Ok(())
}

pub(crate) fn describe_progress(progress: &PurgeProgress<'_>) -> String {
    match progress {
        PurgeProgress::Disabling { name, identifier } => {
            format!("Disabling device: {name} ({identifier})")
        }
        PurgeProgress::Disabled { name, identifier } => {
            format!("Device disabled: {name} ({identifier})")
        }
        PurgeProgress::Deleting { name, identifier } => {
            format!("Deleting device: {name} ({identifier})")
        }
        PurgeProgress::Finished(entry) => match &entry.outcome {
            PurgeOutcome::Deleted => {
                format!("Device deleted: {} ({})", entry.name, entry.identifier)
            }
            PurgeOutcome::DisableFailed(err) => format!(
                "Failed to disable device: {} ({}): {err}",
                entry.name, entry.identifier
            ),
            PurgeOutcome::DeleteFailed(err) => format!(
                "Failed to delete device: {} ({}): {err}; it stays disabled",
                entry.name, entry.identifier
            ),
        },
    }
}

pub(crate) fn write_purge_summary<W: Write>(out: &mut W, report: &PurgeReport) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Deleted {} of {} devices ({} disable failed, {} delete failed)",
        report.deleted(),
        report.entries.len(),
        report.disable_failed(),
        report.delete_failed()
    )?;
    Ok(())
}
