//! Crawl tests against a mock site and a mock translation API

use site_lingo::config::{
    Config, CrawlOptions, GoogleTranslateConfig, StorageConfig, TranslateOptions,
    UserAgentConfig,
};
use site_lingo::crawler::{
    build_http_client, fetch_page, run_crawl, InitOutcome, InitRequest, Orchestrator,
};
use site_lingo::gateway::GoogleTranslateGateway;
use site_lingo::model::LanguageSpec;
use site_lingo::page::{HtmlDocument, Page};
use site_lingo::storage::{SqliteStorage, Storage};
use site_lingo::LingoError;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const PAGE_A: &str = r#"<html><head><title>A</title></head><body>
<h1 class="translate" id="title">Hello</h1>
<p class="translate">Anonymous</p>
</body></html>"#;

const PAGE_B: &str = r#"<html><head><title>B</title></head><body>
<div class="translate" id="intro">Good <b>day</b></div>
</body></html>"#;

/// Creates a test configuration for the site served by `site`
fn create_test_config(site: &MockServer, translate_endpoint: Option<String>, db_path: &Path) -> Config {
    Config {
        crawl: CrawlOptions {
            path_names: vec!["/a".to_string(), "/b".to_string()],
            protocol: "http://".to_string(),
            host: site.address().to_string(),
            current_page_only: false,
            force: false,
        },
        translate_options: TranslateOptions {
            element_selector: ".translate".to_string(),
            translate_blanks: false,
        },
        languages: vec![
            LanguageSpec {
                id: 0,
                code: "hr".to_string(),
                label: "Croatian".to_string(),
            },
            LanguageSpec {
                id: 1,
                code: "de".to_string(),
                label: "German".to_string(),
            },
        ],
        google_translate: GoogleTranslateConfig {
            enable: translate_endpoint.is_some(),
            endpoint: translate_endpoint.unwrap_or_default(),
            ..GoogleTranslateConfig::default()
        },
        storage: StorageConfig {
            database_path: db_path.display().to_string(),
        },
        user_agent: UserAgentConfig {
            name: "TestLingo".to_string(),
            version: "1.0.0".to_string(),
        },
    }
}

/// Starts a mock site serving `/a` and `/b`
async fn start_site() -> MockServer {
    let site = MockServer::start().await;

    for (page_path, body) in [("/a", PAGE_A), ("/b", PAGE_B)] {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/html"),
            )
            .mount(&site)
            .await;
    }

    site
}

/// Starts a mock translation API answering `"<target>:<q>"`
///
/// Requests for a target listed in `failing` get HTTP 500.
async fn start_translate_api(failing: &'static [&'static str]) -> MockServer {
    let api = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("key", "test-key"))
        .respond_with(move |request: &Request| {
            let body: serde_json::Value = match serde_json::from_slice(&request.body) {
                Ok(body) => body,
                Err(_) => return ResponseTemplate::new(400),
            };
            let q = body["q"].as_str().unwrap_or_default();
            let target = body["target"].as_str().unwrap_or_default();

            if failing.contains(&target) {
                return ResponseTemplate::new(500).set_body_string("backend error");
            }

            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [ { "translatedText": format!("{}:{}", target, q) } ] }
            }))
        })
        .mount(&api)
        .await;

    api
}

fn orchestrator(config: &Config) -> Orchestrator<SqliteStorage> {
    let storage = SqliteStorage::new(Path::new(&config.storage.database_path))
        .expect("Failed to open DB");
    let orchestrator = Orchestrator::new(Arc::new(config.clone()), storage);

    if config.google_translate.enable {
        let gateway = GoogleTranslateGateway::new("test-key", &config.google_translate)
            .expect("Failed to build gateway");
        orchestrator.with_translator(Arc::new(gateway))
    } else {
        orchestrator
    }
}

#[tokio::test]
async fn test_full_crawl_with_translation() {
    let site = start_site().await;
    let api = start_translate_api(&[]).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &site,
        Some(format!("{}/translate", api.uri())),
        &dir.path().join("lingo.db"),
    );

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    let data = match outcome {
        InitOutcome::Collected(data) => data,
        other => panic!("expected collected, got {:?}", other),
    };
    let aggregate = data.translation_data;
    assert_eq!(aggregate.len(), 2);

    let a = aggregate.page("/a").unwrap();
    assert_eq!(a.elements.len(), 2);
    assert_eq!(a.elements[0].element_id, "title");
    assert!(a.elements[0].eligible);
    assert_eq!(a.elements[0].translations[0].translated_text, "hr:Hello");
    assert_eq!(a.elements[0].translations[1].translated_text, "de:Hello");
    assert!(!a.elements[1].eligible);

    let b = aggregate.page("/b").unwrap();
    assert_eq!(
        b.elements[0].translations[1].translated_text,
        "de:Good <b>day</b>"
    );

    // 3 elements x 2 languages
    let requests = api.received_requests().await.unwrap();
    assert_eq!(requests.len(), 6);

    // The data survives a new connection
    drop(orchestrator);
    let storage = SqliteStorage::new(Path::new(&config.storage.database_path)).unwrap();
    let snapshot = storage.load_snapshot().unwrap().unwrap();
    assert!(snapshot.is_ready());
    assert_eq!(snapshot.pages, aggregate);
}

#[tokio::test]
async fn test_apply_after_crawl() {
    let site = start_site().await;
    let api = start_translate_api(&[]).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &site,
        Some(format!("{}/translate", api.uri())),
        &dir.path().join("lingo.db"),
    );

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    let url = config.url_for("/b").unwrap();
    let html = fetch_page(&client, &url).await.unwrap();
    let mut page = HtmlDocument::new(url.as_str(), html);

    let outcome = orchestrator
        .init(&InitRequest::apply(0, "/b"), &mut page)
        .await;
    let result = match outcome {
        InitOutcome::Applied(result) => result,
        other => panic!("expected applied, got {:?}", other),
    };
    assert!(result.success);
    assert_eq!(result.applied, 1);
    assert_eq!(
        page.select("#intro").unwrap()[0].inner_html,
        "hr:Good <b>day</b>"
    );

    // Loading a page again without an apply request changes nothing
    let mut page = HtmlDocument::new(url.as_str(), PAGE_B);
    let outcome = orchestrator
        .init(&InitRequest::crawl("/b"), &mut page)
        .await;
    assert!(matches!(outcome, InitOutcome::NotApplied { success: true, .. }));
}

#[tokio::test]
async fn test_crawl_without_translation() {
    let site = start_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&site, None, &dir.path().join("lingo.db"));

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    let data = match outcome {
        InitOutcome::Collected(data) => data,
        other => panic!("expected collected, got {:?}", other),
    };
    let elements: Vec<_> = data.translation_data.elements().collect();
    assert_eq!(elements.len(), 3);
    for element in elements {
        assert_eq!(element.translations.len(), 2);
        assert!(element.translations.iter().all(|t| t.is_blank()));
        assert_eq!(element.eligible, !element.element_id.is_empty());
    }
}

#[tokio::test]
async fn test_gateway_failure_stalls_crawl() {
    let site = start_site().await;
    let api = start_translate_api(&["de"]).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &site,
        Some(format!("{}/translate", api.uri())),
        &dir.path().join("lingo.db"),
    );

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    match outcome {
        InitOutcome::Stalled { path, missing } => {
            assert_eq!(path, "/a");
            assert_eq!(missing.len(), 2);
            assert!(missing.iter().all(|m| m.language_id == 1));
        }
        other => panic!("expected stalled, got {:?}", other),
    }
    assert!(orchestrator.storage().load_snapshot().unwrap().is_none());
}

#[tokio::test]
async fn test_gateway_failure_filled_with_blank() {
    let site = start_site().await;
    let api = start_translate_api(&["de"]).await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(
        &site,
        Some(format!("{}/translate", api.uri())),
        &dir.path().join("lingo.db"),
    );
    config.google_translate.fill_failed_with_blank = true;

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    let data = match outcome {
        InitOutcome::Collected(data) => data,
        other => panic!("expected collected, got {:?}", other),
    };
    for element in data.translation_data.elements() {
        assert!(!element.translations[0].is_blank());
        assert!(element.translations[1].is_blank());
    }
}

#[tokio::test]
async fn test_missing_page_is_fetch_error() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&site, None, &dir.path().join("lingo.db"));

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let result = run_crawl(&mut orchestrator, &client, None).await;

    assert!(matches!(result, Err(LingoError::Fetch { status: 404, .. })));
}

#[tokio::test]
async fn test_unknown_start_path_restarts_at_first_page() {
    let site = start_site().await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_A))
        .mount(&site)
        .await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&site, None, &dir.path().join("lingo.db"));

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, Some("/elsewhere"))
        .await
        .expect("Crawl failed");

    let data = match outcome {
        InitOutcome::Collected(data) => data,
        other => panic!("expected collected, got {:?}", other),
    };
    assert!(data.translation_data.page("/elsewhere").is_none());
    assert_eq!(data.translation_data.len(), 2);
}

#[tokio::test]
async fn test_crawl_configured_path_needing_encoding() {
    let site = start_site().await;
    Mock::given(method("GET"))
        .and(path("/%C3%BCber%20uns"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_B))
        .mount(&site)
        .await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&site, None, &dir.path().join("lingo.db"));
    config.crawl.path_names = vec!["/a".to_string(), "/über uns".to_string()];
    config.translate_options.translate_blanks = true;

    let client = build_http_client(&config.user_agent).unwrap();
    let mut orchestrator = orchestrator(&config);
    let outcome = run_crawl(&mut orchestrator, &client, None)
        .await
        .expect("Crawl failed");

    let data = match outcome {
        InitOutcome::Collected(data) => data,
        other => panic!("expected collected, got {:?}", other),
    };
    assert_eq!(data.translation_data.len(), 2);
    let record = data.translation_data.page("/über uns").unwrap();
    assert_eq!(record.elements[0].element_id, "intro");

    // Both spellings of the path find the stored record
    for page_path in ["/über uns", "/%C3%BCber%20uns"] {
        let url = config.url_for(page_path).unwrap();
        let mut page = HtmlDocument::new(url.as_str(), PAGE_B);
        let outcome = orchestrator
            .init(&InitRequest::apply(0, page_path), &mut page)
            .await;
        match outcome {
            InitOutcome::Applied(result) => {
                assert!(result.success, "{:?}", result.errors);
                assert_eq!(result.applied, 1);
            }
            other => panic!("expected applied, got {:?}", other),
        }
    }
}
