use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_LOG_FILTER: &str = "info";

const STORAGE_KEY: &str = "spending.config";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub currency_symbol: String,
    pub log_filter: String,
}

/// Runtime override stored in local storage; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    api_base_url: Option<String>,
    currency_symbol: Option<String>,
    log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `SPENDING_API_URL` / `SPENDING_LOG` at build time.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("SPENDING_API_URL") {
            config.api_base_url = url.to_string();
        }
        if let Some(filter) = option_env!("SPENDING_LOG") {
            config.log_filter = filter.to_string();
        }
        config.normalized()
    }

    /// Build-time config with the local storage override applied on top.
    pub fn load() -> Self {
        let config = Self::from_build_env();
        match read_stored_override() {
            Some(raw) => config.with_override(&raw),
            None => config,
        }
    }

    /// Applies a JSON override; malformed input leaves the config as is.
    pub fn with_override(mut self, raw: &str) -> Self {
        let Ok(patch) = serde_json::from_str::<ConfigOverride>(raw) else {
            return self;
        };
        if let Some(url) = patch.api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(symbol) = patch.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(filter) = patch.log_filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self
    }
}

fn read_stored_override() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}
