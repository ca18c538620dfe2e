use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Search panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last edit before a search is issued (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long success notices stay on screen (default: 3000).
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
    /// Delay before leaving a form after a successful submit (default: 1500).
    #[serde(default = "default_redirect_ms")]
    pub redirect_ms: u64,
}

fn default_base_url() -> String {
    "https://playground-021-backend.vercel.app".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notice_ms() -> u64 {
    3000
}

fn default_redirect_ms() -> u64 {
    1500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notice_ms: default_notice_ms(),
            redirect_ms: default_redirect_ms(),
        }
    }
}
