use clap::{Args, ValueEnum};
use devsweep_core::{MatchCriteria, TimestampPolicy};

/// Filters shared by `view` and `delete`. Values are substring matches
/// unless they are `-` or already contain `%`.
#[derive(Args, Clone, Default)]
pub struct SelectArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, alias = "device_name")]
    pub device_name: Option<String>,
    #[arg(long, alias = "user_name")]
    pub user_name: Option<String>,
    #[arg(long, alias = "group_name")]
    pub group_name: Option<String>,
    #[arg(
        long,
        alias = "offline_days",
        value_name = "DAYS",
        value_parser = clap::value_parser!(i64).range(0..),
        help = "Only devices offline for at least this many days"
    )]
    pub offline_days: Option<i64>,
    #[arg(long, value_enum, default_value = "abort")]
    pub on_bad_timestamp: TimestampPolicyArg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TimestampPolicyArg {
    #[default]
    Abort,
    Skip,
}

impl From<TimestampPolicyArg> for TimestampPolicy {
    fn from(value: TimestampPolicyArg) -> Self {
        match value {
            TimestampPolicyArg::Abort => TimestampPolicy::Abort,
            TimestampPolicyArg::Skip => TimestampPolicy::Skip,
        }
    }
}

impl SelectArgs {
    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            id: self.id.clone(),
            device_name: self.device_name.clone(),
            user_name: self.user_name.clone(),
            group_name: self.group_name.clone(),
        }
    }
}
