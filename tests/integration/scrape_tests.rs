//! Integration tests for the scraper
//!
//! These tests use wiremock to serve listing and detail pages and run the
//! full fetch → parse → export cycle end-to-end.

use calamine::{open_workbook, Reader, Xlsx};
use jobscrape::config::Config;
use jobscrape::crawler::{Coordinator, FixedPolicy};
use jobscrape::{CrawlPhase, NoDataReason, ScrapeError};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "JobscrapeTest/1.0";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.listing_url = format!("{}/jobs/", base_url);
    config.fetcher.user_agents = vec![TEST_USER_AGENT.to_string()];
    config.fetcher.timeout_secs = 5;
    config.output.path = output_dir
        .path()
        .join("Jobs.xlsx")
        .to_string_lossy()
        .into_owned();
    config
}

fn create_coordinator(config: Config, delay: Duration) -> Coordinator {
    let policy = FixedPolicy::new(&config.fetcher, delay).expect("Failed to build policy");
    Coordinator::with_policy(config, Arc::new(policy)).expect("Failed to create coordinator")
}

fn listing_page(cards: &[(&str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<div class="internship_meta experience_meta">
                    <a class="job-title-href" href="{}">{}</a>
                    <div class="company_name">Acme</div>
                </div>"#,
                href, title
            )
        })
        .collect();
    format!("<html><body><div id=\"list\">{}</div></body></html>", cards)
}

fn detail_page(location: &str, skills: &[&str], salary: &str) -> String {
    let tags: String = skills
        .iter()
        .map(|s| format!(r#"<span class="round_tabs">{}</span>"#, s))
        .collect();
    format!(
        r#"<html><body>
        <p id="location_names"><a href="/jobs/in-{loc}">{loc}</a></p>
        <div class="job-experience-item"><div class="item_body">0-1 years</div></div>
        <div class="round_tabs_container">{tags}</div>
        <div class="internship_details">
            <div class="text-container">
                About the job

                Work with the team
            </div>
        </div>
        <div class="text-container salary_container"><p>{salary}</p></div>
        </body></html>"#,
        loc = location,
        tags = tags,
        salary = salary
    )
}

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

async fn mount_two_card_listing(server: &MockServer) {
    mount_page(
        server,
        "/jobs/",
        listing_page(&[
            ("Data Analyst Intern", "/internship/detail/data-analyst-123"),
            ("Backend Intern", "/internship/detail/backend-99"),
        ]),
    )
    .await;
}

fn sheet_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    let worksheets = workbook.worksheets();
    assert_eq!(worksheets.len(), 1);

    let (name, range) = &worksheets[0];
    assert_eq!(name, "Jobs");

    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[tokio::test]
async fn test_full_scrape_two_jobs() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_two_card_listing(&mock_server).await;
    mount_page(
        &mock_server,
        "/internship/detail/data-analyst-123",
        detail_page("Bangalore", &["SQL", "Python"], "₹ 25,000 /month"),
    )
    .await;
    mount_page(
        &mock_server,
        "/internship/detail/backend-99",
        detail_page("Pune", &["Rust"], "₹ 30,000 /month"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let report = coordinator.run().await.expect("Scrape failed");

    assert_eq!(coordinator.phase(), CrawlPhase::Reported);

    let records = &report.outcome.records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title(), "Data Analyst Intern");
    assert_eq!(
        records[0].url(),
        format!("{}/internship/detail/data-analyst-123", mock_server.uri())
    );
    assert_eq!(records[0].location(), "Bangalore");
    assert_eq!(records[0].experience(), "0-1 years");
    assert_eq!(records[0].skills(), "SQL, Python");
    assert_eq!(records[0].salary(), "₹ 25,000 /month");
    assert_eq!(
        records[0].description_lines(),
        ["About the job", "Work with the team"]
    );
    assert_eq!(records[1].title(), "Backend Intern");
    assert_eq!(records[1].skills(), "Rust");

    assert_eq!(report.export.rows_written, 3);
    let rows = sheet_rows(&report.export.path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "JobTitle");
    assert_eq!(rows[0][6], "JobDescriptionSummary");
    assert_eq!(rows[1][0], "Data Analyst Intern");
    assert_eq!(rows[2][0], "Backend Intern");
    assert_eq!(rows[2][1], "Pune");

    let summary = jobscrape::output::format_summary(&report);
    assert!(summary.contains("Total jobs scraped: 2"));
}

#[tokio::test]
async fn test_detail_failure_skips_job_and_continues() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_two_card_listing(&mock_server).await;
    mount_page(
        &mock_server,
        "/internship/detail/data-analyst-123",
        detail_page("Bangalore", &["SQL"], "₹ 25,000 /month"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/internship/detail/backend-99"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let report = coordinator.run().await.expect("Scrape failed");

    assert_eq!(coordinator.phase(), CrawlPhase::Reported);
    assert_eq!(report.outcome.records.len(), 1);
    assert_eq!(report.outcome.records[0].title(), "Data Analyst Intern");
    assert_eq!(report.outcome.failures.len(), 1);
    assert_eq!(report.outcome.failures[0].title, "Backend Intern");
    assert_eq!(sheet_rows(&report.export.path).len(), 2);
}

#[tokio::test]
async fn test_no_cards_aborts_without_output() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/jobs/",
        "<html><body><p>No jobs today</p></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let output_path = config.output.path.clone();
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let result = coordinator.run().await;

    assert!(matches!(
        result,
        Err(ScrapeError::NoData(NoDataReason::NoCards))
    ));
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);
    assert!(!Path::new(&output_path).exists());
}

#[tokio::test]
async fn test_cards_without_links_abort_as_no_stubs() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/jobs/",
        r#"<div class="internship_meta experience_meta"><span>Untitled</span></div>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let output_path = config.output.path.clone();
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let result = coordinator.run().await;

    assert!(matches!(
        result,
        Err(ScrapeError::NoData(NoDataReason::NoStubs))
    ));
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);
    assert!(!Path::new(&output_path).exists());
}

#[tokio::test]
async fn test_listing_failure_aborts_run() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/jobs/"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Detail pages must never be requested
    Mock::given(method("GET"))
        .and(path("/internship/detail/backend-99"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let output_path = config.output.path.clone();
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let result = coordinator.run().await;

    assert!(matches!(result, Err(ScrapeError::Network(_))));
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);
    assert!(!Path::new(&output_path).exists());
}

#[tokio::test]
async fn test_all_details_failing_aborts_as_no_records() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_two_card_listing(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/internship/detail/data-analyst-123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/internship/detail/backend-99"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let output_path = config.output.path.clone();
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let result = coordinator.run().await;

    assert!(matches!(
        result,
        Err(ScrapeError::NoData(NoDataReason::NoRecords))
    ));
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);
    assert!(!Path::new(&output_path).exists());
}

#[tokio::test]
async fn test_missing_detail_fields_are_empty() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/jobs/",
        listing_page(&[("Bare Job", "/internship/detail/bare-1")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/internship/detail/bare-1",
        "<html><body><h1>Bare Job</h1></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let mut coordinator = create_coordinator(config, Duration::ZERO);

    let report = coordinator.run().await.expect("Scrape failed");
    let record = &report.outcome.records[0];

    assert_eq!(record.title(), "Bare Job");
    assert_eq!(record.location(), "");
    assert_eq!(record.experience(), "");
    assert_eq!(record.skills(), "");
    assert_eq!(record.salary(), "");
    assert!(record.description_lines().is_empty());
}

#[tokio::test]
async fn test_requests_carry_policy_headers_and_pause_between_jobs() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/jobs/"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            ("Job A", "/job/a"),
            ("Job B", "/job/b"),
            ("Job C", "/job/c"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Delhi", &["Go"], "Unpaid")),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let mut coordinator = create_coordinator(config, Duration::from_millis(100));

    let start = Instant::now();
    let report = coordinator.run().await.expect("Scrape failed");
    let elapsed = start.elapsed();

    let titles: Vec<&str> = report.outcome.records.iter().map(|r| r.title()).collect();
    assert_eq!(titles, ["Job A", "Job B", "Job C"]);

    // Two pauses: before the second and the third job
    assert!(
        elapsed >= Duration::from_millis(200),
        "Expected at least 200ms of pauses, got {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_pause_follows_failed_detail_fetch() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/jobs/",
        listing_page(&[
            ("Job A", "/job/a"),
            ("Job B", "/job/b"),
            ("Job C", "/job/c"),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/job/a"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/job/b", detail_page("Delhi", &["Go"], "Unpaid")).await;
    mount_page(&mock_server, "/job/c", detail_page("Pune", &["Rust"], "Unpaid")).await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let mut coordinator = create_coordinator(config, Duration::from_millis(100));

    let start = Instant::now();
    let report = coordinator.run().await.expect("Scrape failed");
    let elapsed = start.elapsed();

    assert_eq!(coordinator.phase(), CrawlPhase::Reported);
    assert_eq!(report.outcome.failures.len(), 1);
    assert_eq!(report.outcome.failures[0].title, "Job A");

    let titles: Vec<&str> = report.outcome.records.iter().map(|r| r.title()).collect();
    assert_eq!(titles, ["Job B", "Job C"]);

    // The failed first job still pauses before the second one
    assert!(
        elapsed >= Duration::from_millis(200),
        "Expected at least 200ms of pauses, got {:?}",
        elapsed
    );
}
