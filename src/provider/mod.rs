//! The Data Provider collaborator: the only asynchronous edge of the system.
//!
//! The derivation core never performs I/O; it consumes whatever catalog a
//! provider hands over. Two implementations exist: a REST client for a real
//! backend and an in-memory mock with a simulated network delay.

use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::EvaluationCatalog;
use crate::model::{EntityId, GuidelineDetail};
use crate::state::Config;

pub mod http;
pub mod mock;
pub mod retry;

#[async_trait]
pub trait EvaluationProvider: Send + Sync {
    /// Fetch the full evaluation catalog. Catalogs are replaced wholesale;
    /// there is no partial update.
    async fn fetch_catalog(&self) -> Result<EvaluationCatalog>;

    /// Fetch the drill-down payload for one guideline. `Ok(None)` means the
    /// guideline is unknown to the backend, which is not an error.
    async fn fetch_guideline(&self, id: EntityId) -> Result<Option<GuidelineDetail>>;
}

#[derive(Clone, Copy, Debug)]
pub enum ProviderKind {
    Rest,
    Mock,
}

impl ProviderKind {
    pub fn from_env() -> Self {
        match std::env::var("PROVIDER").unwrap_or_else(|_| "mock".to_string()).as_str() {
            "rest" => ProviderKind::Rest,
            _ => ProviderKind::Mock,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn EvaluationProvider>> {
        match self {
            ProviderKind::Rest => Ok(Box::new(http::RestProvider::new(cfg)?)),
            ProviderKind::Mock => Ok(Box::new(mock::MockProvider::new(cfg))),
        }
    }
}
