// GitHub API HTTP client.
// Handles authentication headers and request dispatch.

use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{LookupError, Result};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client, authenticated when a token is supplied.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, token)
    }

    /// Create a client against a custom API root.
    ///
    /// Without a token requests go out anonymously, with the lower rate limit.
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| LookupError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("ghlookup"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a single GET request to the API. Status codes are not interpreted here.
    pub async fn get(&self, endpoint: &str) -> reqwest::Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.client.get(&url).send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_base_url("http://localhost:8080/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = GitHubClient::new(Some("bad\ntoken")).unwrap_err();
        assert!(matches!(err, LookupError::InvalidHeader(_)));
    }
}
