/// Palisade system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Table whose presence and user-identity filter establish tenant isolation.
pub const DEFAULT_ANCHOR_TABLE: &str = "DEPOT";

/// Secondary table holding per-record business data, joined against the anchor.
pub const DEFAULT_FACT_TABLE: &str = "FACTS";

/// Column carrying the tenant identity on the anchor table.
pub const DEFAULT_USER_ID_COLUMN: &str = "ID_USER";

/// Bind placeholder expected in the tenant filter predicate.
pub const DEFAULT_PLACEHOLDER: &str = "?";

/// Marker appended when a statement touches temporal columns.
pub const PERIOD_MARKER: &str = "PERIODE";

/// Similarity score at or above which a retrieved candidate is authoritative.
pub const DEFAULT_EXACT_MATCH_THRESHOLD: f64 = 0.95;

/// Number of candidates requested from the vector index.
pub const DEFAULT_TOP_K: usize = 5;

/// Maximum number of retrieved candidates passed to generation as examples.
pub const DEFAULT_MAX_EXAMPLES: usize = 3;

/// Cache entry time-to-live.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Request text length bounds, applied after trimming.
pub const MIN_REQUEST_LEN: usize = 1;
pub const MAX_REQUEST_LEN: usize = 1000;

/// Completion sentinel: the question cannot be answered from the schema.
pub const SENTINEL_IMPOSSIBLE: &str = "IMPOSSIBLE";

/// Completion sentinel: the question asks for a write operation.
pub const SENTINEL_READONLY_VIOLATION: &str = "READONLY_VIOLATION";
