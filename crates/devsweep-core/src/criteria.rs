use serde::{Deserialize, Serialize};

use crate::{EXACT_MATCH, WILDCARD};

/// Identity filters forwarded to the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
    pub id: Option<String>,
    pub device_name: Option<String>,
    pub user_name: Option<String>,
    pub group_name: Option<String>,
}

impl MatchCriteria {
    /// Query pairs for the set fields, in a fixed order. Unset fields are
    /// left out entirely rather than sent empty.
    pub fn query_params(&self) -> Vec<(String, String)> {
        [
            ("id", self.id.as_deref()),
            ("device_name", self.device_name.as_deref()),
            ("user_name", self.user_name.as_deref()),
            ("group_name", self.group_name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), match_value(value))))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.device_name.is_none()
            && self.user_name.is_none()
            && self.group_name.is_none()
    }
}

/// Turns a raw filter into the API's search syntax: `-` means exact match,
/// a value that already carries a wildcard is taken as-is, anything else
/// becomes a substring match.
pub fn match_value(raw: &str) -> String {
    if raw == EXACT_MATCH || raw.contains(WILDCARD) {
        return raw.to_string();
    }
    format!("{WILDCARD}{raw}{WILDCARD}")
}
