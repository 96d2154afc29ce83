//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to stand in for the directory site and the
//! schools' own websites, and run all three stages over real HTTP.

use school_harvest::config::Config;
use school_harvest::crawler::FetchError;
use school_harvest::output::{read_records, write_results};
use school_harvest::Pipeline;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, concurrency: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_concurrent_fetches = concurrency;
    config.crawler.request_timeout_secs = 5;
    config.listing.origin = base_url.to_string();
    config.listing.urls = vec![format!("{}/results?page=0", base_url)];
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn listing_page(codes: &[&str]) -> String {
    let rows: String = codes
        .iter()
        .map(|code| {
            format!(
                r#"<tr><td>County</td><td>District</td><td>Type</td><td><a href="/details?cds={}">School {}</a></td></tr>"#,
                code, code
            )
        })
        .collect();
    format!("<html><body><table>{}</table></body></html>", rows)
}

fn detail_page(county: &str, name: &str, code: &str, website: &str) -> String {
    format!(
        r#"<html><body><table class="table small">
            <tr><td>{}</td></tr>
            <tr><td>Some District</td></tr>
            <tr><td>{}</td></tr>
            <tr><td>{}</td></tr>
            <tr><td>Active</td></tr>
            <tr><td>1 Main St</td></tr>
            <tr><td>1 Main St</td></tr>
            <tr><td>555-0100</td></tr>
            <tr><td>555-0101</td></tr>
            <tr><td><a href="{}">{}</a></td></tr>
        </table></body></html>"#,
        county, name, code, website, website
    )
}

async fn mount_listing(server: &MockServer, codes: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("page", "0"))
        .respond_with(html(listing_page(codes)))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, code: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/details"))
        .and(query_param("cds", code))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_two_schools() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing(&server, &["1", "2"]).await;
    mount_detail(
        &server,
        "1",
        html(detail_page(
            "Alameda",
            "Arts & Sciences High",
            "01000000000001",
            &format!("{}/site-a/", base_url),
        )),
    )
    .await;
    mount_detail(
        &server,
        "2",
        html(detail_page(
            "Fresno",
            "Valley High",
            "10000000000002",
            &format!("{}/site-b", base_url),
        )),
    )
    .await;
    mount_page(
        &server,
        "/site-a/",
        r#"<html><body>
            <a href="/staff">Staff Directory</a>
            <a href="staff">DIRECTORY</a>
            <a href="/board">Meet the Director</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/site-b",
        r#"<html><body><a href="/news">News</a></body></html>"#,
    )
    .await;

    let config = create_test_config(&base_url, 1);
    let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
    let result = pipeline.execute(&config.listing.urls).await;

    assert!(result.failures.is_empty(), "{:?}", result.failures);
    assert_eq!(result.all_records.len(), 2);

    let first = &result.all_records[0];
    assert_eq!(first.source_url(), format!("{}/details?cds=1", base_url));
    assert_eq!(first.region, "Alameda");
    assert_eq!(first.name, "Arts & Sciences High");
    assert_eq!(first.code, "01000000000001");
    assert_eq!(first.home_url, format!("{}/site-a/", base_url));
    assert_eq!(
        first.discovered_links(),
        &[format!("{}/site-a/staff", base_url)]
    );

    let second = &result.all_records[1];
    assert_eq!(second.name, "Valley High");
    assert!(second.discovered_links().is_empty());

    assert_eq!(result.records_with_links.len(), 1);
    assert_eq!(result.records_with_links[0], *first);

    // Write and read back both result files
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let all_path = dir.path().join("all_results.json");
    let directory_path = dir.path().join("directory_results.json");
    write_results(&result, &all_path, &directory_path).expect("Failed to write results");

    let raw = std::fs::read_to_string(&all_path).expect("Failed to read results");
    assert!(raw.contains("Arts & Sciences High"));

    assert_eq!(read_records(&all_path).unwrap(), result.all_records);
    assert_eq!(
        read_records(&directory_path).unwrap(),
        result.records_with_links
    );
}

#[tokio::test]
async fn test_concurrent_harvest_keeps_visit_order() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let codes = ["1", "2", "3"];
    mount_listing(&server, &codes).await;

    // The first detail page answers last
    for (code, delay_ms) in codes.iter().zip([300u64, 150, 0]) {
        mount_detail(
            &server,
            code,
            html(detail_page(
                "County",
                &format!("School {}", code),
                code,
                &format!("{}/home-{}", base_url, code),
            ))
            .set_delay(Duration::from_millis(delay_ms)),
        )
        .await;
        mount_page(
            &server,
            &format!("/home-{}", code),
            &format!(r#"<a href="/dir-{}">Directory</a>"#, code),
        )
        .await;
    }

    let config = create_test_config(&base_url, 3);
    let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
    let result = pipeline.execute(&config.listing.urls).await;

    let names: Vec<&str> = result.all_records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["School 1", "School 2", "School 3"]);

    for (record, code) in result.all_records.iter().zip(codes) {
        assert_eq!(record.code, code);
        assert_eq!(
            record.source_url(),
            format!("{}/details?cds={}", base_url, code)
        );
        assert_eq!(
            record.discovered_links(),
            &[format!("{}/home-{}/dir-{}", base_url, code, code)]
        );
    }
}

#[tokio::test]
async fn test_failed_detail_page_keeps_record() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing(&server, &["1", "2"]).await;
    mount_detail(&server, "1", ResponseTemplate::new(500)).await;
    mount_detail(
        &server,
        "2",
        html(detail_page(
            "Kern",
            "Desert High",
            "15000000000002",
            &format!("{}/desert", base_url),
        )),
    )
    .await;
    mount_page(
        &server,
        "/desert",
        r#"<a href="https://district.example.org/directory">District Directory</a>"#,
    )
    .await;

    let config = create_test_config(&base_url, 1);
    let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
    let result = pipeline.execute(&config.listing.urls).await;

    assert_eq!(result.all_records.len(), 2);

    let failed = &result.all_records[0];
    assert_eq!(failed.source_url(), format!("{}/details?cds=1", base_url));
    assert!(!failed.is_complete());
    assert!(failed.home_url.is_empty());

    let ok = &result.all_records[1];
    assert_eq!(
        ok.discovered_links(),
        &["https://district.example.org/directory".to_string()]
    );
    assert_eq!(result.records_with_links.len(), 1);

    // The 500 on the detail page, then the empty website in discovery
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].stage, "detail");
    assert_eq!(result.failures[0].error, FetchError::Status(500));
    assert_eq!(result.failures[1].stage, "discovery");
    assert_eq!(result.failures[1].error, FetchError::EmptyUrl);
}

#[tokio::test]
async fn test_slow_homepage_times_out() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing(&server, &["1"]).await;
    mount_detail(
        &server,
        "1",
        html(detail_page(
            "Inyo",
            "Mountain High",
            "14000000000001",
            &format!("{}/slow", base_url),
        )),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html(r#"<a href="/staff">Directory</a>"#.to_string())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&base_url, 1);
    config.crawler.request_timeout_secs = 1;
    let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
    let result = pipeline.execute(&config.listing.urls).await;

    assert_eq!(result.all_records.len(), 1);
    assert_eq!(result.all_records[0].name, "Mountain High");
    assert!(result.records_with_links.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(
        result.failures[0].error,
        FetchError::Timeout(Duration::from_secs(1))
    );
}
