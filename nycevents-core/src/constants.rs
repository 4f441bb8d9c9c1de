/// The city's "NYC Parks Events" open-data endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://data.cityofnewyork.us/resource/tvpp-9vvx.json";

/// Result-count ceiling sent as `$limit` with every query. There is no paging.
pub const RESULT_LIMIT: u32 = 5000;

/// Default HTTP timeout for upstream requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Days covered by an event listing when no bounds are given.
pub const DEFAULT_LIST_DAYS: i64 = 7;

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 4097;
