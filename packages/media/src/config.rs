/// Remote media backend configuration.
///
/// Production reads `REMOTE_MEDIA_*` from the process environment; tests
/// hand [`RemoteMediaConfig::from_lookup`] a closure instead so they never
/// mutate global env state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMediaConfig {
    pub account: String,
    pub key: String,
    pub secret: String,
    /// Outbound proxy for restricted deployments where direct egress is
    /// blocked. Only honored when `USE_REMOTE_MEDIA_PROXY` is truthy.
    pub proxy: Option<String>,
}

impl RemoteMediaConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Returns `None` unless all three credentials are present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account = non_empty(lookup("REMOTE_MEDIA_ACCOUNT"))?;
        let key = non_empty(lookup("REMOTE_MEDIA_KEY"))?;
        let secret = non_empty(lookup("REMOTE_MEDIA_SECRET"))?;

        let proxy = lookup("USE_REMOTE_MEDIA_PROXY")
            .filter(|flag| is_truthy(flag))
            .and_then(|_| non_empty(lookup("REMOTE_MEDIA_PROXY")));

        Some(Self {
            account,
            key,
            secret,
            proxy,
        })
    }
}

/// Pure configuration check; no network call is made.
pub fn is_remote_backend_configured() -> bool {
    RemoteMediaConfig::from_env().is_some()
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
