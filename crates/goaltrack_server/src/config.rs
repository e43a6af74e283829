//! Server settings layered on top of `CoreConfig`.

use goaltrack_core::CoreConfig;

pub const BIND_ENV: &str = "GOALTRACK_BIND";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub core: CoreConfig,
    /// `host:port` the listener binds to.
    pub bind: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind = lookup(BIND_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        Self {
            core: CoreConfig::from_lookup(lookup),
            bind,
        }
    }
}
