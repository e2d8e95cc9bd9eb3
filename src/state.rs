//! Runtime configuration and the dashboard-side fetch state.

use crate::catalog::EvaluationCatalog;
use crate::model::{EntityId, GuidelineDetail};

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the evaluation backend (REST provider).
    pub api_base: String,
    /// Seconds between catalog refreshes in the evaluation loop.
    pub refresh_secs: u64,
    /// Simulated latency of the mock provider.
    pub mock_delay_ms: u64,
    pub mock_guideline_delay_ms: u64,
    /// How many hotspots the top-by-time view surfaces.
    pub top_hotspots: usize,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("API_BASE")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            refresh_secs: std::env::var("REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            mock_delay_ms: std::env::var("MOCK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            mock_guideline_delay_ms: std::env::var("MOCK_GUIDELINE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            top_hotspots: std::env::var("TOP_HOTSPOTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

// =============================================================================
// Fetch state with supersede-on-refetch
// =============================================================================

/// Ticket issued when a fetch starts. A completion is applied only if its
/// ticket is still the newest one for that logical data set, so a stale
/// response can never overwrite a newer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidelineTicket {
    generation: u64,
    pub id: EntityId,
}

/// Client-side view state: the last applied catalog and guideline detail,
/// each guarded by a fetch generation.
#[derive(Debug, Default)]
pub struct DashboardState {
    catalog: Option<EvaluationCatalog>,
    catalog_generation: u64,
    catalog_loading: bool,

    guideline: Option<GuidelineDetail>,
    guideline_generation: u64,
    guideline_loading: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> Option<&EvaluationCatalog> {
        self.catalog.as_ref()
    }

    pub fn selected_guideline(&self) -> Option<&GuidelineDetail> {
        self.guideline.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.catalog_loading || self.guideline_loading
    }

    // -------------------------------------------------------------------------
    // Catalog fetches
    // -------------------------------------------------------------------------

    pub fn begin_catalog_fetch(&mut self) -> FetchTicket {
        self.catalog_generation += 1;
        self.catalog_loading = true;
        FetchTicket {
            generation: self.catalog_generation,
        }
    }

    /// Apply a completed fetch. Returns false (and discards the catalog)
    /// when a newer fetch has superseded this ticket.
    pub fn apply_catalog(&mut self, ticket: FetchTicket, catalog: EvaluationCatalog) -> bool {
        if ticket.generation != self.catalog_generation {
            return false;
        }
        self.catalog = Some(catalog);
        self.catalog_loading = false;
        true
    }

    pub fn fail_catalog_fetch(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.catalog_generation {
            self.catalog_loading = false;
        }
    }

    // -------------------------------------------------------------------------
    // Guideline selection fetches
    // -------------------------------------------------------------------------

    /// Select a guideline. Issuing a new ticket supersedes any in-flight
    /// fetch for a previous selection.
    pub fn begin_guideline_fetch(&mut self, id: EntityId) -> GuidelineTicket {
        self.guideline_generation += 1;
        self.guideline_loading = true;
        GuidelineTicket {
            generation: self.guideline_generation,
            id,
        }
    }

    pub fn clear_guideline_selection(&mut self) {
        self.guideline_generation += 1;
        self.guideline = None;
        self.guideline_loading = false;
    }

    pub fn apply_guideline(
        &mut self,
        ticket: GuidelineTicket,
        detail: Option<GuidelineDetail>,
    ) -> bool {
        if ticket.generation != self.guideline_generation {
            return false;
        }
        self.guideline = detail;
        self.guideline_loading = false;
        true
    }

    pub fn fail_guideline_fetch(&mut self, ticket: GuidelineTicket) {
        if ticket.generation == self.guideline_generation {
            self.guideline_loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: EntityId) -> GuidelineDetail {
        GuidelineDetail {
            id,
            name: format!("g{}", id),
            description: String::new(),
            status: None,
            compliance: 80.0,
            detailed_metrics: Vec::new(),
            subguidelines: Vec::new(),
        }
    }

    #[test]
    fn catalog_fetch_applies_when_current() {
        let mut state = DashboardState::new();
        let ticket = state.begin_catalog_fetch();
        assert!(state.is_loading());
        assert!(state.apply_catalog(ticket, EvaluationCatalog::default()));
        assert!(!state.is_loading());
        assert!(state.catalog().is_some());
    }

    #[test]
    fn stale_catalog_fetch_is_discarded() {
        let mut state = DashboardState::new();
        let old = state.begin_catalog_fetch();
        let new = state.begin_catalog_fetch();

        assert!(!state.apply_catalog(old, EvaluationCatalog::default()));
        assert!(state.catalog().is_none());

        assert!(state.apply_catalog(new, EvaluationCatalog::default()));
        assert!(state.catalog().is_some());
    }

    #[test]
    fn rapid_reselection_wins_over_stale_response() {
        let mut state = DashboardState::new();
        let first = state.begin_guideline_fetch(1);
        let second = state.begin_guideline_fetch(2);

        // The slow response for guideline 1 lands after guideline 2 was
        // selected; it must not overwrite the newer selection.
        assert!(!state.apply_guideline(first, Some(detail(1))));
        assert!(state.selected_guideline().is_none());

        assert!(state.apply_guideline(second, Some(detail(2))));
        assert_eq!(state.selected_guideline().unwrap().id, 2);
    }

    #[test]
    fn clearing_selection_supersedes_inflight_fetch() {
        let mut state = DashboardState::new();
        let ticket = state.begin_guideline_fetch(1);
        state.clear_guideline_selection();
        assert!(!state.apply_guideline(ticket, Some(detail(1))));
        assert!(state.selected_guideline().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_fetch_clears_loading_only_when_current() {
        let mut state = DashboardState::new();
        let old = state.begin_catalog_fetch();
        let _new = state.begin_catalog_fetch();
        state.fail_catalog_fetch(old);
        // The newer fetch is still in flight.
        assert!(state.is_loading());
    }
}
