//! HTTP client utilities for fetching remote resources.

use anyhow::{Result, bail};
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use std::time::Duration;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Creates the headers sent with every fetch.
///
/// # Examples
///
/// ```
/// use cutil::http::headers;
///
/// let headers = headers();
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("cutil/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("image/*,*/*;q=0.8"));
    headers
}

/// Returns `true` when `source` is an absolute `http` or `https` URL.
///
/// # Examples
///
/// ```
/// use cutil::http::is_http_url;
///
/// assert!(is_http_url("https://example.com/a.png"));
/// assert!(!is_http_url("/srv/assets/a.png"));
/// ```
pub fn is_http_url(source: &str) -> bool {
    Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Fetches the body of `url` with the shared client.
///
/// A non-success status is an error. Without `timeout` the request waits
/// as long as the connection stays open.
///
/// # Examples
///
/// ```no_run
/// use cutil::http::get_bytes;
///
/// // Note: This function requires an async runtime
/// // let data = get_bytes("https://example.com/a.png", None).await.unwrap();
/// ```
pub async fn get_bytes(url: &str, timeout: Option<Duration>) -> Result<Bytes> {
    let mut request = HTTP_CLIENT.get(url).headers(headers());
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }

    Ok(response.bytes().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let headers = headers();
        assert!(headers.contains_key("user-agent"));
        assert!(headers.contains_key("accept"));
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://example.com/bg.jpg"));
        assert!(is_http_url("https://example.com/bg.jpg?w=1280"));

        assert!(!is_http_url("ftp://example.com/bg.jpg"));
        assert!(!is_http_url("data:image/png;base64,AAAA"));
        assert!(!is_http_url("assets/bg.jpg"));
        assert!(!is_http_url("/tmp/bg.jpg"));
        assert!(!is_http_url(""));
    }

    #[tokio::test]
    async fn test_get_bytes_invalid_url() {
        assert!(get_bytes("not-a-url", None).await.is_err());
    }
}
