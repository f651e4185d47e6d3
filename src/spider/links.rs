use scraper::{Html, Selector};
use url::Url;

/// Extracts the domain from a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawlmaster::spider::extract_domain;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts same-domain links from an HTML page
///
/// Anchors are resolved against the page URL, so relative hrefs work.
/// Non-HTTP(S) schemes, fragments, and links to other domains are skipped;
/// the crawl never leaves the job's site through discovery.
///
/// # Arguments
///
/// * `html` - The page body
/// * `page_url` - URL the page was fetched from, for resolving relative links
/// * `domain` - The job's domain; only links on it are kept
pub fn extract_links(html: &str, page_url: &str, domain: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_link(&base, href) else {
            continue;
        };

        if (resolved.scheme() == "http" || resolved.scheme() == "https")
            && extract_domain(&resolved).as_deref() == Some(domain)
        {
            links.push(resolved.to_string());
        }
    }

    links
}

/// Resolves a possibly-relative href against the page URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    base.join(href).ok()
}
