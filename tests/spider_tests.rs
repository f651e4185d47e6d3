//! Integration tests for the default fetch collaborator
//!
//! These use wiremock to stand in for the crawled site and verify the
//! spider's full contract: record the page, merge same-domain discoveries
//! into the frontier file, and increment the progress counter — or, on
//! failure, do none of that.

use crawlmaster::config::JobConfig;
use crawlmaster::spider::{build_http_client, PageProcessor, Spider};
use crawlmaster::{FrontierStore, PageCounter};
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn job_for(base_url: &str) -> JobConfig {
    JobConfig {
        name: "spider-test".to_string(),
        homepage: base_url.to_string(),
        max_pages: 10,
        workers: 1,
        delay_ms: None,
        language: Some("en".to_string()),
    }
}

fn spider_in(
    dir: &tempfile::TempDir,
    base_url: &str,
    progress: Arc<PageCounter>,
) -> (Spider, FrontierStore) {
    let store = FrontierStore::new(dir.path().join("frontier.txt"));
    let client = build_http_client("TestCrawler/1.0").unwrap();
    let spider = Spider::new(
        job_for(base_url),
        client,
        store.clone(),
        dir.path().join("pages"),
        progress,
    )
    .unwrap();
    (spider, store)
}

#[tokio::test]
async fn test_successful_page_is_recorded_and_counted() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            // set_body_raw: wiremock's set_body_string pins the content-type
            // to text/plain, overriding insert_header
            ResponseTemplate::new(200).set_body_raw(
                format!(
                    r#"<html><body>
                    <a href="{}/article/1">One</a>
                    <a href="{}/article/2">Two</a>
                    <a href="https://elsewhere.test/away">Away</a>
                    </body></html>"#,
                    base_url, base_url
                ),
                "text/html",
            ),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let progress = Arc::new(PageCounter::new());
    let (spider, store) = spider_in(&dir, &base_url, progress.clone());

    let url = format!("{}/", base_url);
    spider.process(0, &url).await.unwrap();

    assert_eq!(progress.read(), 1);

    // Same-domain discoveries landed in the frontier; the off-site link did not
    let frontier = store.load().unwrap();
    assert!(frontier.contains(&format!("{}/article/1", base_url)));
    assert!(frontier.contains(&format!("{}/article/2", base_url)));
    assert!(!frontier.iter().any(|u| u.contains("elsewhere.test")));

    // The page body and its metadata sidecar were stored
    let pages: Vec<_> = std::fs::read_dir(dir.path().join("pages"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().any(|f| f.ends_with(".html")));
    assert!(pages.iter().any(|f| f.ends_with(".meta")));
}

#[tokio::test]
async fn test_http_error_leaves_counter_and_frontier_alone() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let progress = Arc::new(PageCounter::new());
    let (spider, store) = spider_in(&dir, &base_url, progress.clone());

    let url = format!("{}/missing", base_url);
    let result = spider.process(0, &url).await;

    assert!(result.is_err());
    assert_eq!(progress.read(), 0);
    assert!(store.load().unwrap().is_empty());
    assert!(!dir.path().join("pages").exists());
}

#[tokio::test]
async fn test_non_html_response_is_a_failure() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/feed.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let progress = Arc::new(PageCounter::new());
    let (spider, _store) = spider_in(&dir, &base_url, progress.clone());

    let url = format!("{}/feed.json", base_url);
    let result = spider.process(0, &url).await;

    assert!(result.is_err());
    assert_eq!(progress.read(), 0);
}

#[tokio::test]
async fn test_accept_language_header_is_sent() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("accept-language", "en"))
        .respond_with(
            // set_body_raw: see note in test_successful_page_is_recorded_and_counted
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>hello</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let progress = Arc::new(PageCounter::new());
    let (spider, _store) = spider_in(&dir, &base_url, progress.clone());

    // Succeeds only if the mock's header matcher saw Accept-Language: en
    let url = format!("{}/", base_url);
    spider.process(0, &url).await.unwrap();
    assert_eq!(progress.read(), 1);
}
