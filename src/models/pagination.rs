use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_PAGE_SIZE: u64 = 10;

/// `?page=&size=` query. Pages are zero-based; the window is
/// `skip(page * size).limit(size)` over an already sorted cursor.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: u64,
    /// Page size (default 10). A size of 0 yields an empty page.
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 0, size: DEFAULT_PAGE_SIZE }
    }
}

// The driver serializes skip and limit as i64.
const MAX_WINDOW: u64 = i64::MAX as u64;

impl PageQuery {
    /// True when the window cannot hold any document. The server must not
    /// query then, since MongoDB reads `limit(0)` as "no limit".
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn limit(&self) -> i64 {
        self.size.min(MAX_WINDOW) as i64
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_WINDOW)
    }
}
