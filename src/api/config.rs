//! Backend configuration parsed from environment variables.

pub const DEFAULT_BACKEND_ORIGIN: &str = "https://istc-admin.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Server-only origin; never exposed to client bundles.
pub const SERVER_ORIGIN_VAR: &str = "ISTC_API_URL";
/// Origin visible to client bundles.
pub const PUBLIC_ORIGIN_VAR: &str = "ISTC_PUBLIC_API_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash.
    pub origin: String,
    pub timeouts: BackendTimeouts,
}

impl BackendConfig {
    /// Build config from environment variables.
    ///
    /// Origin precedence, first non-empty wins:
    /// - `ISTC_API_URL`
    /// - `ISTC_PUBLIC_API_URL`
    /// - [`DEFAULT_BACKEND_ORIGIN`]
    ///
    /// Optional:
    /// - `ISTC_API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ISTC_API_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin = resolve_origin(lookup(SERVER_ORIGIN_VAR).as_deref(), lookup(PUBLIC_ORIGIN_VAR).as_deref());
        let timeouts = BackendTimeouts {
            request_secs: parse_u64(lookup("ISTC_API_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("ISTC_API_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self { origin, timeouts }
    }

    /// Config pointing at `origin` with default timeouts.
    #[must_use]
    pub fn with_origin(origin: &str) -> Self {
        Self { origin: normalize(origin), timeouts: BackendTimeouts::default() }
    }

    /// Absolute URL for a backend path such as `/users`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.origin)
        } else {
            format!("{}/{path}", self.origin)
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::with_origin(DEFAULT_BACKEND_ORIGIN)
    }
}

/// Pick the first origin that is non-blank after normalization, falling back to [`DEFAULT_BACKEND_ORIGIN`].
#[must_use]
pub fn resolve_origin(server: Option<&str>, public: Option<&str>) -> String {
    [server, public]
        .into_iter()
        .flatten()
        .map(normalize)
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_ORIGIN.to_owned())
}

fn normalize(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_owned()
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
