use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MIN_LOADING_DISPLAY: Duration = Duration::from_millis(1000);

/// Tunables shared by the stores and the fetch hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Items requested per page by infinite lists.
    pub page_size: usize,
    /// Fast responses still keep the loading state this long.
    pub min_loading_display: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            min_loading_display: MIN_LOADING_DISPLAY,
        }
    }
}
