/// Items requested per listing call.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Offset of the first item; the listing API counts from one.
pub const FIRST_CURSOR: u32 = 1;

/// Marker the listing API treats as "any run of characters".
pub const WILDCARD: char = '%';

/// Match value the API interprets literally instead of as a substring.
pub const EXACT_MATCH: &str = "-";

pub const UNKNOWN_DEVICE_NAME: &str = "Unknown";

/// Layout of `last_online` once the fractional part is cut off.
pub const LAST_ONLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
