use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    dedup_devices, evaluate, fetch_all_devices, DeviceApi, Evaluation, MatchCriteria,
    SweepError, TimestampPolicy, DEFAULT_PAGE_SIZE,
};

/// Everything that decides which devices a run selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    pub criteria: MatchCriteria,
    pub offline_days: Option<i64>,
    pub page_size: u32,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            criteria: MatchCriteria::default(),
            offline_days: None,
            page_size: DEFAULT_PAGE_SIZE,
            timestamp_policy: TimestampPolicy::default(),
        }
    }
}

/// Fetch, deduplicate and filter: the read-only half of a sweep.
pub async fn collect_candidates<A>(
    api: &A,
    plan: &SweepPlan,
    now: DateTime<Utc>,
) -> Result<Evaluation, SweepError>
where
    A: DeviceApi + ?Sized,
{
    let fetched = fetch_all_devices(api, &plan.criteria, plan.page_size).await?;
    let fetched_count = fetched.len();
    let devices = dedup_devices(fetched);
    let evaluation = evaluate(devices, plan.offline_days, plan.timestamp_policy, now)?;
    info!(
        fetched = fetched_count,
        matched = evaluation.candidates.len(),
        skipped = evaluation.skipped.len(),
        "device inventory evaluated"
    );
    Ok(evaluation)
}
