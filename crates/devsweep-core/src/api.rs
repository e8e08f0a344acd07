use async_trait::async_trait;

use crate::{DevicePage, MutationError, SweepError};

/// One listing call: the identity filters plus the paging window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub filters: Vec<(String, String)>,
    pub page_size: u32,
    pub current: u32,
}

impl PageRequest {
    /// Everything the listing endpoint takes as query parameters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        pairs.push(("pageSize".to_string(), self.page_size.to_string()));
        pairs.push(("current".to_string(), self.current.to_string()));
        pairs
    }
}

/// The remote device-management API, as far as the sweep needs it.
#[async_trait]
pub trait DeviceApi {
    async fn list_devices(&self, request: &PageRequest) -> Result<DevicePage, SweepError>;
    async fn disable_device(&self, identifier: &str) -> Result<(), MutationError>;
    async fn delete_device(&self, identifier: &str) -> Result<(), MutationError>;
}
