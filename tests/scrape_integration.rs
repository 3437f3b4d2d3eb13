//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the catalog site, including its
//! quirk of serving the last real page again for out-of-range page numbers,
//! and verify the documents written to disk.

use shelfwalker::catalog::PageLabel;
use shelfwalker::config::Config;
use shelfwalker::crawler::{run_scrape, ScrapeJob};
use shelfwalker::storage::JsonStore;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a listing-table page from (title, href) rows
fn listing_html(rows: &[(&str, &str)]) -> String {
    let mut body = String::from("<html><body><table>\n<tr><th>Title</th></tr>\n");
    for (title, href) in rows {
        body.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td></tr>\n",
            href, title
        ));
    }
    body.push_str("</table></body></html>");
    body
}

/// Test configuration pointed at the mock server, with zero delays
fn test_config(base_url: &str, dir: &Path, fetch_details: bool) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.page_delay_ms = 0;
    config.crawler.detail_delay_ms = 0;
    config.crawler.fetch_details = fetch_details;
    config.output.catalog_path = dir.join("catalog.json").to_string_lossy().into_owned();
    config.output.state_path = dir.join("state.json").to_string_lossy().into_owned();
    config.output.download_dir = dir.join("files").to_string_lossy().into_owned();
    config
}

fn job(category: &str, page: PageLabel, dir: &Path) -> ScrapeJob {
    ScrapeJob {
        category: category.to_string(),
        page,
        output: dir.join("catalog.json"),
        start_id: None,
        download: false,
    }
}

async fn mount_listing(server: &MockServer, category: &str, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/list/{}", category)))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_traversal_stops_on_repeated_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page2 = listing_html(&[("Gamma Station", "/item/3"), ("Delta Rally", "/item/4")]);

    mount_listing(
        &server,
        "ps2",
        "1",
        listing_html(&[("Alpha Quest", "/item/1"), ("Beta Drive", "/item/2")]),
    )
    .await;
    mount_listing(&server, "ps2", "2", page2.clone()).await;
    // The source serves its last real page again past the end
    mount_listing(&server, "ps2", "3", page2).await;

    let config = test_config(&server.uri(), dir.path(), false);
    let summary = run_scrape(config, job("ps2", PageLabel::All, dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.records, 4);

    // Stopping on the repeated page means page 4 was never requested
    let requests = server.received_requests().await.unwrap();
    assert!(!requests
        .iter()
        .any(|request| request.url.query().unwrap_or("").contains("page=4")));

    // The aggregated traversal lands in a single "all" entry
    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    let category = &doc.categories["ps2"];
    assert_eq!(category.pages.len(), 1);
    assert_eq!(category.pages[0].page, PageLabel::All);
    assert_eq!(category.pages[0].record_count, 4);
    assert_eq!(category.total_pages, 0);
    assert_eq!(category.total_records, 4);

    let ids: Vec<u64> = category.pages[0].records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    // The id counter survives into the next run via the state file
    let state = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    assert!(state.contains("\"next_id\": 5"));
}

#[tokio::test]
async fn test_full_traversal_stops_on_empty_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(
        &server,
        "gba",
        "1",
        listing_html(&[("Alpha Quest", "/item/1"), ("Beta Drive", "/item/2")]),
    )
    .await;
    // Page 2 exists but lists nothing
    mount_listing(&server, "gba", "2", listing_html(&[])).await;

    let config = test_config(&server.uri(), dir.path(), false);
    let summary = run_scrape(config, job("gba", PageLabel::All, dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.records, 2);
}

#[tokio::test]
async fn test_single_page_enrichment_preserves_listing_ids() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(
        &server,
        "ps2",
        "2",
        listing_html(&[("Alpha Quest", "/item/a"), ("Beta Drive", "/item/b")]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/item/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1>Alpha Quest</h1>
               <table><tr><td>Region</td><td>USA</td></tr></table>
               <a href="/download/a">Download</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1>Beta Drive</h1>
               <table><tr><td>Region</td><td>EU</td></tr></table>"#,
        ))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path(), true);
    let summary = run_scrape(config, job("ps2", PageLabel::Page(2), dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.records, 2);

    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    let entry = doc.categories["ps2"].page(PageLabel::Page(2)).unwrap();

    // Listing ids survive enrichment even though the detail path allocates
    // its own ids internally
    assert_eq!(entry.records[0].id, 1);
    assert_eq!(entry.records[1].id, 2);
    assert_eq!(entry.records[0].region.as_deref(), Some("USA"));
    assert_eq!(entry.records[1].region.as_deref(), Some("EU"));

    // The detail page's download link refines the asset locator
    assert!(entry.records[0].asset_url.ends_with("/download/a"));
    // No download link on the detail page: asset stays the source URL
    assert!(entry.records[1].asset_url.ends_with("/item/b"));
}

#[tokio::test]
async fn test_reruns_merge_into_existing_document() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(
        &server,
        "ps2",
        "1",
        listing_html(&[("Alpha Quest", "/item/1"), ("Beta Drive", "/item/2")]),
    )
    .await;
    mount_listing(
        &server,
        "ps2",
        "2",
        listing_html(&[("Gamma Station", "/item/3")]),
    )
    .await;

    let base = server.uri();

    // Three runs against the same document: page 2, page 1, page 1 again
    for page in [PageLabel::Page(2), PageLabel::Page(1), PageLabel::Page(1)] {
        let config = test_config(&base, dir.path(), false);
        run_scrape(config, job("ps2", page, dir.path())).await.unwrap();
    }

    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    let category = &doc.categories["ps2"];

    // Page 1 was merged twice but appears once, and pages come out sorted
    let labels: Vec<PageLabel> = category.pages.iter().map(|p| p.page).collect();
    assert_eq!(labels, vec![PageLabel::Page(1), PageLabel::Page(2)]);
    assert_eq!(category.total_pages, 2);
    assert_eq!(category.total_records, 3);
    assert_eq!(doc.total_categories, 1);
}

#[tokio::test]
async fn test_corrupt_document_is_replaced_not_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    std::fs::write(dir.path().join("catalog.json"), "{ not json").unwrap();

    mount_listing(
        &server,
        "ps2",
        "1",
        listing_html(&[("Alpha Quest", "/item/1")]),
    )
    .await;

    let config = test_config(&server.uri(), dir.path(), false);
    let summary = run_scrape(config, job("ps2", PageLabel::Page(1), dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.records, 1);
    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    assert_eq!(doc.categories["ps2"].total_records, 1);
}

#[tokio::test]
async fn test_failed_single_page_fetch_merges_empty_entry() {
    // No mock mounted: the listing request 404s, which degrades to an
    // empty page rather than an error.
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let config = test_config(&server.uri(), dir.path(), false);
    let summary = run_scrape(config, job("ps2", PageLabel::Page(9), dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.records, 0);
    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    assert_eq!(doc.categories["ps2"].pages[0].record_count, 0);
}

#[tokio::test]
async fn test_start_id_override_renumbers_new_records() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(
        &server,
        "ps2",
        "1",
        listing_html(&[("Alpha Quest", "/item/1"), ("Beta Drive", "/item/2")]),
    )
    .await;

    let config = test_config(&server.uri(), dir.path(), false);
    let mut override_job = job("ps2", PageLabel::Page(1), dir.path());
    override_job.start_id = Some(1000);

    run_scrape(config, override_job).await.unwrap();

    let doc = JsonStore::new(&dir.path().join("catalog.json")).load();
    let ids: Vec<u64> = doc.categories["ps2"].pages[0]
        .records
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![1000, 1001]);
}

#[tokio::test]
async fn test_download_flag_fetches_assets() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(
        &server,
        "ps2",
        "1",
        listing_html(&[("Alpha Quest", "/files/alpha.iso")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/files/alpha.iso"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake image bytes".to_vec()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path(), false);
    let mut download_job = job("ps2", PageLabel::Page(1), dir.path());
    download_job.download = true;

    let summary = run_scrape(config, download_job).await.unwrap();

    assert_eq!(summary.downloads_ok, 1);
    assert_eq!(summary.downloads_failed, 0);
    let downloaded = dir.path().join("files").join("alpha.iso");
    assert_eq!(std::fs::read(downloaded).unwrap(), b"fake image bytes");
}
