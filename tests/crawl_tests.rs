//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up real HTTP servers and exercise the
//! full crawl cycle end-to-end: fetching, link extraction, reservation,
//! termination, and JSON output.

use spinneret::config::Settings;
use spinneret::crawler::{crawl, Spider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves an HTML page at `page_path` on the mock server
async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn html_with_links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>page</title></head><body>{}</body></html>",
        anchors
    )
}

fn settings_for(server: &MockServer) -> Settings {
    Settings::new(format!("{}/", server.uri())).delay(0.0)
}

#[tokio::test]
async fn test_full_crawl_records_all_reachable_pages() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_with_links(&["/page1", "/page2"])).await;
    mount_page(&server, "/page1", html_with_links(&[])).await;
    mount_page(&server, "/page2", html_with_links(&[])).await;

    let results = crawl(settings_for(&server).max_links(10))
        .await
        .expect("crawl failed");

    assert_eq!(results.len(), 3);
    let root = format!("{}/", server.uri());
    assert_eq!(
        results[&root].urls,
        vec![
            format!("{}/page1", server.uri()),
            format!("{}/page2", server.uri())
        ]
    );
}

#[tokio::test]
async fn test_quota_stops_crawl_early() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_with_links(&["/a", "/b", "/c"])).await;
    for p in ["/a", "/b", "/c"] {
        mount_page(&server, p, html_with_links(&["/d"])).await;
    }
    mount_page(&server, "/d", html_with_links(&[])).await;

    let results = crawl(settings_for(&server).max_links(2))
        .await
        .expect("crawl failed");

    // Root plus exactly one more page, even though more links were found
    assert_eq!(results.len(), 2);
    assert!(results.contains_key(&format!("{}/", server.uri())));
}

#[tokio::test]
async fn test_relative_links_resolved_against_page_url() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_with_links(&["/dir/page"])).await;
    mount_page(&server, "/dir/page", html_with_links(&["../sibling"])).await;
    mount_page(&server, "/sibling", html_with_links(&[])).await;

    let results = crawl(settings_for(&server).max_links(10))
        .await
        .expect("crawl failed");

    let dir_page = format!("{}/dir/page", server.uri());
    assert_eq!(
        results[&dir_page].urls,
        vec![format!("{}/sibling", server.uri())]
    );
    // The resolved sibling was actually visited
    assert!(results.contains_key(&format!("{}/sibling", server.uri())));
}

#[tokio::test]
async fn test_non_fetchable_links_never_recorded() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html_with_links(&["javascript:void(0)", "mailto:a@b.test", "#top", "/real"]),
    )
    .await;
    mount_page(&server, "/real", html_with_links(&[])).await;

    let results = crawl(settings_for(&server).max_links(10))
        .await
        .expect("crawl failed");

    let root = format!("{}/", server.uri());
    assert_eq!(results[&root].urls, vec![format!("{}/real", server.uri())]);
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_concurrent_crawl_visits_each_page_exactly_once() {
    let server = MockServer::start().await;

    // 50 pages; page i links to the next two, so all are reachable from 0.
    // expect(1) on every mock turns a duplicate fetch into a test failure
    // when the server is verified on drop.
    for i in 0..50u32 {
        let links: Vec<String> = [(i + 1) % 50, (i + 2) % 50]
            .iter()
            .map(|j| format!("/page{}", j))
            .collect();
        let refs: Vec<&str> = links.iter().map(String::as_str).collect();
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(html_with_links(&refs))
                    .insert_header("content-type", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let settings = Settings::new(format!("{}/page0", server.uri()))
        .delay(0.0)
        .max_links(50)
        .max_workers(8);
    let results = crawl(settings).await.expect("crawl failed");

    assert_eq!(results.len(), 50);
    server.verify().await;
}

#[tokio::test]
async fn test_failing_root_returns_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let results = crawl(settings_for(&server).max_links(5).max_workers(3))
        .await
        .expect("crawl should terminate, not error");

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_results_written_to_json_file() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_with_links(&["/only"])).await;
    mount_page(&server, "/only", html_with_links(&[])).await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("crawl.json");

    let settings = settings_for(&server)
        .max_links(5)
        .save_to_file(&out_path);
    let spider = Spider::new(settings).unwrap();
    let results = spider.start().await.unwrap();
    spider.save_results(&results).unwrap();

    let content = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    let root = format!("{}/", server.uri());
    assert_eq!(
        parsed[&root]["urls"][0],
        serde_json::Value::String(format!("{}/only", server.uri()))
    );
}

#[tokio::test]
async fn test_server_errors_do_not_stop_the_crawl() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_with_links(&["/broken", "/fine"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/fine", html_with_links(&[])).await;

    let results = crawl(settings_for(&server).max_links(10))
        .await
        .expect("crawl failed");

    assert!(results.contains_key(&format!("{}/fine", server.uri())));
    assert!(!results.contains_key(&format!("{}/broken", server.uri())));
}
