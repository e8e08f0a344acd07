use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{Device, DeviceApi, MatchCriteria, PageRequest, SweepError, FIRST_CURSOR};

/// Walks the listing endpoint page by page and returns every device in
/// arrival order.
///
/// The cursor is an item offset: it starts at one and advances by
/// `page_size` after each call. Paging stops after a short page or once
/// the cursor has moved past the reported total, so a server that keeps
/// returning full pages still cannot hold the loop open past `total`.
pub async fn fetch_all_devices<A>(
    api: &A,
    criteria: &MatchCriteria,
    page_size: u32,
) -> Result<Vec<Device>, SweepError>
where
    A: DeviceApi + ?Sized,
{
    if page_size == 0 {
        return Err(SweepError::configuration("page size must be at least 1"));
    }

    let filters = criteria.query_params();
    let mut devices = Vec::new();
    let mut current = FIRST_CURSOR;

    loop {
        let request = PageRequest {
            filters: filters.clone(),
            page_size,
            current,
        };
        let page = api.list_devices(&request).await?;
        let received = page.data.len();
        debug!(current, received, total = page.total, "fetched device page");
        devices.extend(page.data);

        current = current.saturating_add(page_size);
        if received < page_size as usize || u64::from(current) > page.total {
            break;
        }
    }

    Ok(devices)
}

/// Drops repeated ids, keeping the first record seen. Repeats happen when
/// the inventory shifts between page requests.
pub fn dedup_devices(devices: Vec<Device>) -> Vec<Device> {
    let before = devices.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Device> = devices
        .into_iter()
        .filter(|device| seen.insert(device.id.clone()))
        .collect();
    let dropped = before - unique.len();
    if dropped > 0 {
        warn!(dropped, "duplicate devices returned across pages");
    }
    unique
}
