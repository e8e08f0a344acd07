use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::UNKNOWN_DEVICE_NAME;

/// One record of the device inventory as returned by `GET /api/devices`.
///
/// Only the fields the sweep consumes are typed; everything else is kept
/// in `extra` so JSON output can echo the original record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<DeviceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_online: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guid: None,
            device_name: None,
            info: None,
            last_online: None,
            extra: Map::new(),
        }
    }

    /// Top-level `device_name`, then `info.device_name`, then a placeholder.
    pub fn display_name(&self) -> &str {
        self.device_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.info
                    .as_ref()
                    .and_then(|info| info.device_name.as_deref())
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or(UNKNOWN_DEVICE_NAME)
    }

    pub fn identifier(&self, field: IdentifierField) -> Option<&str> {
        match field {
            IdentifierField::Guid => self.guid.as_deref(),
            IdentifierField::Id => Some(self.id.as_str()),
        }
        .filter(|value| !value.is_empty())
    }
}

/// Which device field the server expects in disable/delete paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierField {
    #[default]
    Guid,
    Id,
}

impl IdentifierField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::Id => "id",
        }
    }
}

impl std::fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of one listing response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePage {
    #[serde(default)]
    pub data: Vec<Device>,
    #[serde(default)]
    pub total: u64,
}

/// A device that survived filtering and may be purged.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub device: Device,
    pub name: String,
    pub days_offline: Option<i64>,
}

impl Candidate {
    pub fn new(device: Device, days_offline: Option<i64>) -> Self {
        let name = device.display_name().to_string();
        Self {
            device,
            name,
            days_offline,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
