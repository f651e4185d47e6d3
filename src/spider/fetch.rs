use crate::{CrawlError, Result};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Page body
    pub body: String,
}

/// Builds the HTTP client shared by every job's spider
///
/// # Arguments
///
/// * `user_agent` - The user agent string sent with every request
pub fn build_http_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(CrawlError::ClientBuild)
}

/// Fetches one URL, expecting an HTML page
///
/// Any outcome other than a 2xx HTML response is an error: the worker pool
/// treats a fetch failure as "URL consumed, no retry", so classification
/// beyond the error message is not needed here.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
/// * `language` - Optional language hint, sent as Accept-Language
pub async fn fetch_page(client: &Client, url: &str, language: Option<&str>) -> Result<FetchedPage> {
    let mut request = client.get(url);
    if let Some(lang) = language {
        request = request.header(ACCEPT_LANGUAGE, lang);
    }

    let response = request.send().await.map_err(|e| CrawlError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(CrawlError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| CrawlError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(FetchedPage {
        status: status.as_u16(),
        content_type,
        body,
    })
}
