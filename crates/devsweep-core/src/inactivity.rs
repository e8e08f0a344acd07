use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Candidate, Device, SweepError, LAST_ONLINE_FORMAT};

const SECONDS_PER_DAY: i64 = 86_400;

/// What to do with a device whose `last_online` cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Leave the device out and keep going.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub candidates: Vec<Candidate>,
    /// Ids of devices dropped under [`TimestampPolicy::Skip`].
    pub skipped: Vec<String>,
}

/// Parses a `last_online` value as UTC, ignoring everything from the first
/// `.` onwards (fractional seconds and any zone suffix).
pub fn parse_last_online(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.split('.').next().unwrap_or(raw).trim();
    NaiveDateTime::parse_from_str(trimmed, LAST_ONLINE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole days from `last_online` to `now`, floored; negative when the
/// timestamp lies in the future.
pub fn days_between(last_online: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_online)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

pub fn days_offline(device: &Device, now: DateTime<Utc>) -> Result<i64, SweepError> {
    let raw = device.last_online.as_deref().unwrap_or_default();
    parse_last_online(raw)
        .map(|last_online| days_between(last_online, now))
        .ok_or_else(|| SweepError::TimestampParse {
            device: device.id.clone(),
            value: raw.to_string(),
        })
}

/// Applies the inactivity threshold to the fetched devices.
///
/// Without a threshold every device passes; its offline days are still
/// filled in when `last_online` is readable. With a threshold a device is
/// kept when it has been offline for at least that many days.
pub fn evaluate(
    devices: Vec<Device>,
    threshold: Option<i64>,
    policy: TimestampPolicy,
    now: DateTime<Utc>,
) -> Result<Evaluation, SweepError> {
    let mut evaluation = Evaluation::default();

    let Some(threshold) = threshold else {
        evaluation.candidates = devices
            .into_iter()
            .map(|device| {
                let days = days_offline(&device, now).ok();
                Candidate::new(device, days)
            })
            .collect();
        return Ok(evaluation);
    };

    for device in devices {
        let days = match days_offline(&device, now) {
            Ok(days) => days,
            Err(err) => match policy {
                TimestampPolicy::Abort => return Err(err),
                TimestampPolicy::Skip => {
                    warn!(device = %device.id, error = %err, "skipping device");
                    evaluation.skipped.push(device.id);
                    continue;
                }
            },
        };
        if days >= threshold {
            evaluation.candidates.push(Candidate::new(device, Some(days)));
        }
    }

    Ok(evaluation)
}
