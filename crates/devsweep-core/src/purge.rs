use tracing::{info, warn};

use crate::{Candidate, DeviceApi, IdentifierField, MutationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeOutcome {
    Deleted,
    /// Disable was refused; delete was never attempted.
    DisableFailed(MutationError),
    /// The device is left disabled but still present.
    DeleteFailed(MutationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeEntry {
    pub name: String,
    pub identifier: String,
    pub outcome: PurgeOutcome,
}

/// Step notifications emitted while a batch is processed.
#[derive(Debug)]
pub enum PurgeProgress<'a> {
    Disabling { name: &'a str, identifier: &'a str },
    Disabled { name: &'a str, identifier: &'a str },
    Deleting { name: &'a str, identifier: &'a str },
    Finished(&'a PurgeEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub entries: Vec<PurgeEntry>,
}

impl PurgeReport {
    pub fn deleted(&self) -> usize {
        self.count(|outcome| matches!(outcome, PurgeOutcome::Deleted))
    }

    pub fn disable_failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, PurgeOutcome::DisableFailed(_)))
    }

    pub fn delete_failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, PurgeOutcome::DeleteFailed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.deleted() < self.entries.len()
    }

    fn count(&self, pred: impl Fn(&PurgeOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| pred(&entry.outcome))
            .count()
    }
}

/// Disables and then deletes each candidate, one at a time and in order.
///
/// A device is only deleted after its disable call succeeded. Failures are
/// recorded against the device and the batch carries on with the next one;
/// nothing is retried.
pub async fn purge_candidates<A, F>(
    api: &A,
    candidates: &[Candidate],
    field: IdentifierField,
    mut on_progress: F,
) -> PurgeReport
where
    A: DeviceApi + ?Sized,
    F: FnMut(PurgeProgress<'_>),
{
    let mut report = PurgeReport::default();

    for candidate in candidates {
        let name = candidate.name.as_str();
        let entry = match candidate.device.identifier(field) {
            Some(identifier) => {
                let outcome = purge_one(api, name, identifier, &mut on_progress).await;
                PurgeEntry {
                    name: name.to_string(),
                    identifier: identifier.to_string(),
                    outcome,
                }
            }
            None => PurgeEntry {
                name: name.to_string(),
                identifier: candidate.device.id.clone(),
                outcome: PurgeOutcome::DisableFailed(MutationError::transport(format!(
                    "device has no {field}"
                ))),
            },
        };

        match &entry.outcome {
            PurgeOutcome::Deleted => {
                info!(device = %entry.identifier, name = %entry.name, "device deleted");
            }
            PurgeOutcome::DisableFailed(err) => {
                warn!(device = %entry.identifier, error = %err, "disable failed; delete skipped");
            }
            PurgeOutcome::DeleteFailed(err) => {
                warn!(device = %entry.identifier, error = %err, "delete failed; device left disabled");
            }
        }
        on_progress(PurgeProgress::Finished(&entry));
        report.entries.push(entry);
    }

    report
}

async fn purge_one<A, F>(
    api: &A,
    name: &str,
    identifier: &str,
    on_progress: &mut F,
) -> PurgeOutcome
where
    A: DeviceApi + ?Sized,
    F: FnMut(PurgeProgress<'_>),
{
    on_progress(PurgeProgress::Disabling { name, identifier });
    if let Err(err) = api.disable_device(identifier).await {
        return PurgeOutcome::DisableFailed(err);
    }
    on_progress(PurgeProgress::Disabled { name, identifier });

    on_progress(PurgeProgress::Deleting { name, identifier });
    match api.delete_device(identifier).await {
        Ok(()) => PurgeOutcome::Deleted,
        Err(err) => PurgeOutcome::DeleteFailed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Device, DevicePage, PageRequest, SweepError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        refuse_disable: HashSet<String>,
        refuse_delete: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl DeviceApi for RecordingApi {
        async fn list_devices(&self, _request: &PageRequest) -> Result<DevicePage, SweepError> {
            unreachable!("purge only")
        }

        async fn disable_device(&self, identifier: &str) -> Result<(), MutationError> {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("disable {identifier}"));
            if self.refuse_disable.contains(identifier) {
                return Err(MutationError::status(403, "forbidden"));
            }
            Ok(())
        }

        async fn delete_device(&self, identifier: &str) -> Result<(), MutationError> {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("delete {identifier}"));
            if self.refuse_delete.contains(identifier) {
                return Err(MutationError::status(500, ""));
            }
            Ok(())
        }
    }

    fn candidate(id: &str, guid: Option<&str>) -> Candidate {
        let mut device = Device::new(id);
        device.guid = guid.map(str::to_string);
        device.device_name = Some(format!("host-{id}"));
        Candidate::new(device, Some(30))
    }

    #[tokio::test]
    async fn disable_failure_skips_delete_and_continues() {
        let api = RecordingApi {
            refuse_disable: HashSet::from(["ga".to_string()]),
            ..RecordingApi::default()
        };
        let candidates = vec![candidate("a", Some("ga")), candidate("b", Some("gb"))];

        let report = purge_candidates(&api, &candidates, IdentifierField::Guid, |_| {}).await;

        assert_eq!(api.calls(), vec!["disable ga", "disable gb", "delete gb"]);
        assert_eq!(
            report.entries[0].outcome,
            PurgeOutcome::DisableFailed(MutationError::status(403, "forbidden"))
        );
        assert_eq!(report.entries[1].outcome, PurgeOutcome::Deleted);
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.disable_failed(), 1);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn delete_failure_is_recorded_per_device() {
        let api = RecordingApi {
            refuse_delete: HashSet::from(["1".to_string()]),
            ..RecordingApi::default()
        };
        let candidates = vec![candidate("1", None), candidate("2", None)];

        let report = purge_candidates(&api, &candidates, IdentifierField::Id, |_| {}).await;

        assert_eq!(
            api.calls(),
            vec!["disable 1", "delete 1", "disable 2", "delete 2"]
        );
        assert_eq!(report.delete_failed(), 1);
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.entries[0].identifier, "1");
    }

    #[tokio::test]
    async fn missing_identifier_never_reaches_the_api() {
        let api = RecordingApi::default();
        let candidates = vec![candidate("a", None), candidate("b", Some("gb"))];

        let report = purge_candidates(&api, &candidates, IdentifierField::Guid, |_| {}).await;

        assert_eq!(api.calls(), vec!["disable gb", "delete gb"]);
        assert_eq!(report.disable_failed(), 1);
        assert_eq!(report.entries[0].identifier, "a");
    }

    #[tokio::test]
    async fn progress_is_reported_in_call_order() {
        let api = RecordingApi {
            refuse_disable: HashSet::from(["gb".to_string()]),
            ..RecordingApi::default()
        };
        let candidates = vec![candidate("a", Some("ga")), candidate("b", Some("gb"))];
        let mut steps = Vec::new();

        purge_candidates(&api, &candidates, IdentifierField::Guid, |progress| {
            steps.push(match progress {
                PurgeProgress::Disabling { identifier, .. } => format!("disabling {identifier}"),
                PurgeProgress::Disabled { identifier, .. } => format!("disabled {identifier}"),
                PurgeProgress::Deleting { identifier, .. } => format!("deleting {identifier}"),
                PurgeProgress::Finished(entry) => format!("finished {}", entry.identifier),
            });
        })
        .await;

        assert_eq!(
            steps,
            vec![
                "disabling ga",
                "disabled ga",
                "deleting ga",
                "finished ga",
                "disabling gb",
                "finished gb",
            ]
        );
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let api = RecordingApi::default();
        let report = purge_candidates(&api, &[], IdentifierField::Guid, |_| {}).await;
        assert!(report.entries.is_empty());
        assert!(!report.has_failures());
        assert!(api.calls().is_empty());
    }
}
