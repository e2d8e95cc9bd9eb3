//! Provider + dashboard-state integration: fetches flow through tickets,
//! and a superseded fetch can never clobber a newer selection.

use seco_transparency::provider::mock::MockProvider;
use seco_transparency::provider::retry::{retry_async, RetryConfig};
use seco_transparency::provider::EvaluationProvider;
use seco_transparency::state::DashboardState;

#[tokio::test]
async fn catalog_fetch_populates_state() {
    let provider = MockProvider::instant();
    let mut state = DashboardState::new();

    let ticket = state.begin_catalog_fetch();
    assert!(state.is_loading());

    let catalog = provider.fetch_catalog().await.unwrap();
    assert!(state.apply_catalog(ticket, catalog));
    assert!(!state.is_loading());

    let catalog = state.catalog().unwrap();
    assert!(!catalog.kpis.is_empty());
    assert!(!catalog.guidelines.is_empty());
}

#[tokio::test]
async fn catalog_fetch_through_retry_wrapper() {
    let provider = MockProvider::instant();
    let retry_cfg = RetryConfig {
        max_retries: 1,
        base_delay_ms: 1,
        ..Default::default()
    };
    let catalog = retry_async(&retry_cfg, "fetch_catalog", || provider.fetch_catalog())
        .await
        .unwrap();
    assert_eq!(catalog.kpis.len(), 4);
}

#[tokio::test]
async fn guideline_selection_supersedes_slow_response() {
    let provider = MockProvider::instant();
    let mut state = DashboardState::new();

    // User selects guideline 1, then reselects guideline 2 before the
    // first response lands.
    let first = state.begin_guideline_fetch(1);
    let second = state.begin_guideline_fetch(2);

    // Responses arrive out of order: the newer selection completes first.
    let detail_2 = provider.fetch_guideline(2).await.unwrap();
    assert!(state.apply_guideline(second, detail_2));
    assert_eq!(state.selected_guideline().unwrap().id, 2);

    // The late response for the stale ticket must be discarded.
    let detail_1 = provider.fetch_guideline(1).await.unwrap();
    assert!(!state.apply_guideline(first, detail_1));
    assert_eq!(state.selected_guideline().unwrap().id, 2);
}

#[tokio::test]
async fn unknown_guideline_clears_selection_without_error() {
    let provider = MockProvider::instant();
    let mut state = DashboardState::new();

    let ticket = state.begin_guideline_fetch(1);
    let detail = provider.fetch_guideline(1).await.unwrap();
    assert!(state.apply_guideline(ticket, detail));
    assert!(state.selected_guideline().is_some());

    // Selecting a guideline the backend does not know yields "no detail",
    // not a failure.
    let ticket = state.begin_guideline_fetch(999);
    let detail = provider.fetch_guideline(999).await.unwrap();
    assert!(detail.is_none());
    assert!(state.apply_guideline(ticket, detail));
    assert!(state.selected_guideline().is_none());
}

#[tokio::test]
async fn fetched_catalog_arrives_normalized() {
    let provider = MockProvider::instant();
    let catalog = provider.fetch_catalog().await.unwrap();
    for guideline in &catalog.guidelines {
        for criterion in &guideline.success_criteria {
            assert!((0.0..=100.0).contains(&criterion.compliance));
        }
    }
    for factor in &catalog.conditioning_factors {
        assert!((0.0..=100.0).contains(&factor.value));
    }
}
