use stores::StoreConfig;

/// Build-time settings, read from the environment when the bundle is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin. `None` means same origin.
    pub backend_url: Option<&'static str>,
    pub stores: StoreConfig,
}

impl ClientConfig {
    pub fn from_build_env() -> Self {
        let mut stores = StoreConfig::default();
        if let Some(size) = option_env!("PAGE_SIZE").and_then(|s| s.parse().ok())
        {
            stores.page_size = size;
        }
        Self {
            backend_url: option_env!("BACKEND_URL"),
            stores,
        }
    }

    /// The backend origin, falling back to the page's own origin.
    pub fn backend_address(&self) -> String {
        if let Some(url) = self.backend_url {
            return url.trim_end_matches('/').to_string();
        }
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }

    /// Development builds point at a local backend.
    pub fn is_dev_mode(&self) -> bool {
        self.backend_url.is_some_and(|url| url.contains("localhost"))
    }
}
