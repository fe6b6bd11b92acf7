//! Catalog load and debounced search flows, end to end against the mock
//! backend.

use std::sync::Arc;
use std::time::Duration;

use greenbasket_integration_tests::{MockBackend, RecordingSink, init_tracing, test_config};
use greenbasket_storefront::{Command, Storefront};

async fn engine_against(backend: &MockBackend) -> (Storefront, RecordingSink) {
    init_tracing();
    let api_url = backend.serve().await;
    let sink = RecordingSink::default();
    let engine = Storefront::with_sink(&test_config(api_url), Arc::new(sink.clone()));
    (engine, sink)
}

#[tokio::test]
async fn test_load_catalog_populates_full_and_filtered_views() {
    let backend = MockBackend::with_default_catalog();
    let (engine, sink) = engine_against(&backend).await;

    engine.load_catalog().await;

    assert_eq!(engine.products().len(), 3);
    let search = engine.search_state();
    assert_eq!(search.results.len(), 3);
    assert!(!search.not_found);
    assert!(sink.notes().is_empty());
}

#[tokio::test]
async fn test_catalog_failure_retains_prior_state() {
    let backend = MockBackend::with_default_catalog();
    let (engine, sink) = engine_against(&backend).await;

    engine.load_catalog().await;
    assert_eq!(engine.products().len(), 3);

    backend.set_catalog_failing(true);
    engine.invalidate_catalog().await;
    engine.load_catalog().await;

    // Prior state untouched, failure surfaced through the sink.
    assert_eq!(engine.products().len(), 3);
    let (message, severity) = sink.last().expect("a notification");
    assert_eq!(severity, greenbasket_storefront::notify::Severity::Error);
    assert!(message.contains("Something went wrong"));
}

#[tokio::test]
async fn test_search_matches_name_case_insensitively() {
    let backend = MockBackend::with_default_catalog();
    let (engine, _sink) = engine_against(&backend).await;
    engine.load_catalog().await;

    engine.search("iphone").await;

    let search = engine.search_state();
    assert_eq!(search.query, "iphone");
    assert_eq!(search.results.len(), 1);
    assert_eq!(search.results[0].name, "iPhone XR");
    assert!(!search.not_found);
}

#[tokio::test]
async fn test_search_matches_category() {
    let backend = MockBackend::with_default_catalog();
    let (engine, _sink) = engine_against(&backend).await;
    engine.load_catalog().await;

    engine.search("sports").await;

    let search = engine.search_state();
    assert_eq!(search.results.len(), 1);
    assert_eq!(search.results[0].name, "Basketball");
}

#[tokio::test]
async fn test_search_without_match_sets_not_found() {
    let backend = MockBackend::with_default_catalog();
    let (engine, sink) = engine_against(&backend).await;
    engine.load_catalog().await;

    engine.search("xylophone").await;

    let search = engine.search_state();
    assert!(search.not_found);
    assert!(search.results.is_empty());
    // The full list is unaffected and no notification is raised:
    // an empty search is display state, not an error.
    assert_eq!(engine.products().len(), 3);
    assert!(sink.notes().is_empty());
}

#[tokio::test]
async fn test_dispatched_search_command_is_debounced() {
    let backend = MockBackend::with_default_catalog();
    let (engine, _sink) = engine_against(&backend).await;
    engine.load_catalog().await;

    engine
        .dispatch(
            None,
            Command::Search {
                query: "basket".to_string(),
            },
        )
        .await;

    // Dispatch returns immediately; the search fires after the quiet
    // interval.
    assert_eq!(backend.search_request_count(), 0);
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(backend.search_request_count(), 1);
    assert_eq!(engine.search_state().results[0].name, "Basketball");
}

#[tokio::test]
async fn test_debounced_search_executes_only_latest_query() {
    let backend = MockBackend::with_default_catalog();
    let (engine, _sink) = engine_against(&backend).await;
    engine.load_catalog().await;

    // Rapid keystrokes, all inside one quiet interval.
    engine.schedule_search("i");
    tokio::time::sleep(Duration::from_millis(25)).await;
    engine.schedule_search("ip");
    tokio::time::sleep(Duration::from_millis(25)).await;
    engine.schedule_search("iphone");

    // Well past the quiet interval: exactly one search reached the wire,
    // carrying the latest query.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(backend.search_request_count(), 1);

    let search = engine.search_state();
    assert_eq!(search.query, "iphone");
    assert_eq!(search.results.len(), 1);
}
