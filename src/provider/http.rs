//! REST provider: fetches the catalog from a real evaluation backend.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::catalog::EvaluationCatalog;
use crate::model::{EntityId, GuidelineDetail};
use crate::provider::retry::HttpStatusError;
use crate::provider::EvaluationProvider;
use crate::state::Config;

pub struct RestProvider {
    client: Client,
    base: String,
}

impl RestProvider {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cfg.http_timeout_secs))
                .build()?,
            base: cfg.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EvaluationProvider for RestProvider {
    async fn fetch_catalog(&self) -> Result<EvaluationCatalog> {
        let url = format!("{}/api/evaluation-data", self.base);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(HttpStatusError {
                operation: "evaluation data fetch".into(),
                status: resp.status().as_u16(),
            }
            .into());
        }
        let catalog: EvaluationCatalog = resp.json().await?;
        Ok(catalog.normalized())
    }

    async fn fetch_guideline(&self, id: EntityId) -> Result<Option<GuidelineDetail>> {
        let url = format!("{}/api/guidelines/{}", self.base, id);
        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(HttpStatusError {
                operation: format!("guideline {} fetch", id),
                status: resp.status().as_u16(),
            }
            .into());
        }
        Ok(Some(resp.json().await?))
    }
}
