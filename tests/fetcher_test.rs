mod server;

use seoscope::extractor::extract;
use seoscope::fetcher::PageFetcher;
use server::get_test_server_url;

#[tokio::test]
async fn test_fetch_success() {
    let base_url = get_test_server_url().await;
    let fetcher = PageFetcher::new(10).expect("Failed to build fetcher");

    let page = fetcher.fetch(&base_url).await;
    assert_eq!(page.status_code, 200);
    assert!(page.error.is_none());
    assert!(page.html.contains("<h1>Welcome</h1>"));
    assert!(
        page.headers
            .get("content-type")
            .is_some_and(|ct| ct.contains("text/html"))
    );
}

#[tokio::test]
async fn test_fetch_reports_status_without_error() {
    let base_url = get_test_server_url().await;
    let fetcher = PageFetcher::new(10).expect("Failed to build fetcher");

    let page = fetcher.fetch(&format!("{}/missing", base_url)).await;
    assert_eq!(page.status_code, 404);
    assert!(page.error.is_none());
}

#[tokio::test]
async fn test_fetch_follows_redirects_to_final_url() {
    let base_url = get_test_server_url().await;
    let fetcher = PageFetcher::new(10).expect("Failed to build fetcher");

    let page = fetcher.fetch(&format!("{}/redirect", base_url)).await;
    assert_eq!(page.status_code, 200);
    assert_eq!(page.url, format!("{}/", base_url));
    assert!(page.html.contains("Welcome"));
}

#[tokio::test]
async fn test_fetch_connection_error_lands_in_error_field() {
    let fetcher = PageFetcher::new(2).expect("Failed to build fetcher");

    // Port 9 (discard) should refuse the connection
    let page = fetcher.fetch("http://127.0.0.1:9/").await;
    assert_eq!(page.status_code, 0);
    assert!(page.html.is_empty());
    assert!(page.error.is_some());
}

#[tokio::test]
async fn test_fetch_all_preserves_order() {
    let base_url = get_test_server_url().await;
    let fetcher = PageFetcher::new(10).expect("Failed to build fetcher");

    let urls = vec![format!("{}/missing", base_url), format!("{}/", base_url)];
    let pages = fetcher.fetch_all(&urls).await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].status_code, 404);
    assert_eq!(pages[1].status_code, 200);
}

#[tokio::test]
async fn test_fetched_page_feeds_the_extractor() {
    let base_url = get_test_server_url().await;
    let fetcher = PageFetcher::new(10).expect("Failed to build fetcher");

    let page = fetcher.fetch(&base_url).await;
    let signals = extract(&page.html, &page.url);
    assert_eq!(
        signals.title,
        "A well optimized page title for testing purposes"
    );
    assert_eq!(signals.h1, vec!["Welcome"]);
    assert!(signals.has_viewport);
    assert!(signals.has_charset);
    assert_eq!(signals.language, "en");
    assert_eq!(signals.internal_links.len(), 1);
}
