use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the REST backend, e.g. `"https://shop.example.com"`. Paths such
    /// as `/api/products` are joined onto it.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// How long the shop menu stays open after the pointer leaves it.
    pub shop_close_delay_ms: u64,
    /// How long the cart drawer stays open after the pointer leaves it.
    pub cart_close_delay_ms: u64,
    /// Simulated latency before the concierge replies.
    pub chat_reply_delay_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn shop_close_delay(&self) -> Duration {
        Duration::from_millis(self.shop_close_delay_ms)
    }

    #[must_use]
    pub fn cart_close_delay(&self) -> Duration {
        Duration::from_millis(self.cart_close_delay_ms)
    }

    #[must_use]
    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }
}
