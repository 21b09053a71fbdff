use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use newslens_core::error::{Error, Result};

/// Builds a client with a request timeout, a user agent and optional bearer
/// auth on every request.
pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str, bearer: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = bearer.map(str::trim).filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::InvalidConfig(format!("invalid API key: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .default_headers(headers)
        .build()
        .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))
}

/// Trims a trailing slash so paths can be appended with `format!`.
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
