//! The evaluation catalog: everything one provider fetch returns, plus
//! cross-entity resolution helpers.
//!
//! Referential ids may dangle (catalogs are fetched independently); a
//! dangling id resolves to nothing instead of failing.

use crate::model::{
    clamp_pct, ActionItem, ConditioningFactor, DevExperienceFactor, Dimension, DimensionScore,
    Guideline, HeatPoint, Kpi, NavigationFlow, Process, TaskCompletion,
};
use crate::score::mean_compliance;
use crate::status::StatusTier;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationCatalog {
    #[serde(default)]
    pub dimensions: Vec<DimensionScore>,
    #[serde(default, rename = "conditioningFactors")]
    pub conditioning_factors: Vec<ConditioningFactor>,
    #[serde(default, rename = "devExpFactors")]
    pub dev_exp_factors: Vec<DevExperienceFactor>,
    #[serde(default)]
    pub guidelines: Vec<Guideline>,
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default, rename = "actionItems")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, rename = "navigationFlows")]
    pub navigation_flows: Vec<NavigationFlow>,
    #[serde(default, rename = "heatmapData")]
    pub heatmap: Vec<HeatPoint>,
    #[serde(default, rename = "taskCompletionTimes")]
    pub task_completion_times: Vec<TaskCompletion>,
}

/// Per-dimension compliance roll-up for the overview cards.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    pub guideline_count: usize,
    /// `None` when the dimension has no guideline with criteria data.
    pub compliance: Option<u8>,
    pub tier: Option<StatusTier>,
}

impl EvaluationCatalog {
    /// True when no collection offers anything to derive from. A catalog
    /// carrying only usage logs (flows, task timings) is not empty.
    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
            && self.guidelines.is_empty()
            && self.navigation_flows.is_empty()
            && self.task_completion_times.is_empty()
    }

    /// Clamp every percentage-like field once, at the fetch boundary.
    pub fn normalized(mut self) -> Self {
        for f in &mut self.conditioning_factors {
            f.value = clamp_pct(f.value);
        }
        for f in &mut self.dev_exp_factors {
            f.value = clamp_pct(f.value);
        }
        for g in &mut self.guidelines {
            for c in &mut g.success_criteria {
                c.compliance = clamp_pct(c.compliance);
            }
        }
        for p in &mut self.processes {
            p.compliance = clamp_pct(p.compliance);
        }
        for d in &mut self.dimensions {
            d.score = clamp_pct(d.score);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Id resolution (dangling ids filter out silently)
    // -------------------------------------------------------------------------

    pub fn conditioning_factors_for(&self, kpi: &Kpi) -> Vec<&ConditioningFactor> {
        kpi.conditioning_factors
            .iter()
            .filter_map(|id| self.conditioning_factors.iter().find(|f| f.id == *id))
            .collect()
    }

    pub fn dev_exp_factors_for(&self, guideline: &Guideline) -> Vec<&DevExperienceFactor> {
        guideline
            .dev_exp_factors
            .iter()
            .filter_map(|id| self.dev_exp_factors.iter().find(|f| f.id == *id))
            .collect()
    }

    pub fn processes_for(&self, guideline: &Guideline) -> Vec<&Process> {
        guideline
            .processes
            .iter()
            .filter_map(|id| self.processes.iter().find(|p| p.id == *id))
            .collect()
    }

    pub fn guideline_for(&self, action: &ActionItem) -> Option<&Guideline> {
        self.guidelines.iter().find(|g| g.id == action.guideline)
    }

    pub fn kpi_for(&self, action: &ActionItem) -> Option<&Kpi> {
        self.kpis.iter().find(|k| k.id == action.kpi)
    }

    // -------------------------------------------------------------------------
    // Grouping and roll-ups
    // -------------------------------------------------------------------------

    pub fn guidelines_by_dimension(&self, dimension: Dimension) -> Vec<&Guideline> {
        self.guidelines
            .iter()
            .filter(|g| g.dimension == dimension)
            .collect()
    }

    /// One summary per primary dimension, for the overview tab.
    pub fn dimension_summaries(&self) -> Vec<DimensionSummary> {
        Dimension::primary()
            .into_iter()
            .map(|dimension| {
                let guidelines = self.guidelines_by_dimension(dimension);
                let compliance = mean_compliance(guidelines.iter().copied());
                DimensionSummary {
                    dimension,
                    guideline_count: guidelines.len(),
                    compliance,
                    tier: compliance.map(|c| StatusTier::from_score(f64::from(c))),
                }
            })
            .collect()
    }

    /// SHA-256 over the canonical JSON rendering, for audit log entries.
    pub fn content_hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hotspot, Severity, SuccessCriterion};

    fn guideline(id: u32, dimension: Dimension, compliances: &[f64]) -> Guideline {
        Guideline {
            id,
            name: format!("g{}", id),
            description: String::new(),
            dimension,
            conditioning_factors: Vec::new(),
            dev_exp_factors: vec![1, 99],
            processes: vec![1],
            success_criteria: compliances
                .iter()
                .enumerate()
                .map(|(i, c)| SuccessCriterion {
                    id: format!("{}.{}", id, i + 1),
                    name: String::new(),
                    compliance: *c,
                })
                .collect(),
            status: None,
        }
    }

    fn catalog() -> EvaluationCatalog {
        EvaluationCatalog {
            dev_exp_factors: vec![DevExperienceFactor {
                group: "tooling".into(),
                id: 1,
                name: "IDE integration".into(),
                value: 70.0,
                dimension: Dimension::Technical,
            }],
            processes: vec![Process {
                id: 1,
                name: "Release review".into(),
                compliance: 60.0,
                linked_guidelines: vec![1],
            }],
            guidelines: vec![
                guideline(1, Dimension::Technical, &[85.0, 95.0]),
                guideline(2, Dimension::Technical, &[60.0]),
                guideline(3, Dimension::Social, &[]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn dangling_ids_resolve_to_nothing() {
        let cat = catalog();
        let g = &cat.guidelines[0];
        // id 99 dangles, id 1 resolves
        let factors = cat.dev_exp_factors_for(g);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].id, 1);

        let action = ActionItem {
            id: 1,
            title: "t".into(),
            guideline: 404,
            kpi: 404,
            deadline: String::new(),
            status: crate::model::ActionStatus::Planning,
            impact: String::new(),
            dimension: Dimension::Technical,
        };
        assert!(cat.guideline_for(&action).is_none());
        assert!(cat.kpi_for(&action).is_none());
    }

    #[test]
    fn dimension_summaries_cover_primary_axes() {
        let cat = catalog();
        let summaries = cat.dimension_summaries();
        assert_eq!(summaries.len(), 4);

        let technical = &summaries[0];
        assert_eq!(technical.dimension, Dimension::Technical);
        assert_eq!(technical.guideline_count, 2);
        // mean(mean(85,95)=90, 60) = 75
        assert_eq!(technical.compliance, Some(75));
        assert_eq!(technical.tier, Some(StatusTier::Warning));

        // Social has one guideline with no criteria: no data, not zero.
        let social = &summaries[1];
        assert_eq!(social.guideline_count, 1);
        assert_eq!(social.compliance, None);
        assert_eq!(social.tier, None);

        let economic = &summaries[3];
        assert_eq!(economic.guideline_count, 0);
        assert_eq!(economic.compliance, None);
    }

    #[test]
    fn normalized_clamps_percentages() {
        let mut cat = catalog();
        cat.guidelines[0].success_criteria[0].compliance = 180.0;
        cat.processes[0].compliance = -10.0;
        let cat = cat.normalized();
        assert_eq!(cat.guidelines[0].success_criteria[0].compliance, 100.0);
        assert_eq!(cat.processes[0].compliance, 0.0);
    }

    #[test]
    fn content_hash_is_deterministic_and_sensitive() {
        let cat = catalog();
        assert_eq!(cat.content_hash(), cat.content_hash());

        let mut changed = catalog();
        changed.guidelines[0].success_criteria[0].compliance = 1.0;
        assert_ne!(cat.content_hash(), changed.content_hash());
    }

    #[test]
    fn partial_catalog_deserializes_with_defaults() {
        let cat: EvaluationCatalog = serde_json::from_str(
            r#"{"navigationFlows":[{"id":1,"path":"a->b","count":3,"avgTime":2.5}]}"#,
        )
        .unwrap();
        assert_eq!(cat.navigation_flows.len(), 1);
        assert!(cat.kpis.is_empty());
        assert!(cat.guidelines.is_empty());
    }

    #[test]
    fn usage_logs_alone_make_a_catalog_non_empty() {
        assert!(EvaluationCatalog::default().is_empty());

        let flows_only = EvaluationCatalog {
            navigation_flows: vec![NavigationFlow {
                id: 1,
                path: "a->b".into(),
                count: 3,
                avg_time: 2.5,
            }],
            ..Default::default()
        };
        assert!(!flows_only.is_empty());

        let timings_only = EvaluationCatalog {
            task_completion_times: vec![TaskCompletion {
                task: "t".into(),
                time: 5.0,
                benchmark: 4.0,
            }],
            ..Default::default()
        };
        assert!(!timings_only.is_empty());

        assert!(!catalog().is_empty());
    }

    #[test]
    fn kpi_hotspots_round_trip_through_catalog_json() {
        let mut cat = catalog();
        cat.kpis.push(Kpi {
            id: 9,
            name: "k".into(),
            goal: String::new(),
            critical_success: String::new(),
            metric: String::new(),
            target: "≥ 85%".into(),
            current: 70.0,
            dimension: Dimension::Technical,
            conditioning_factors: vec![5],
            trend: Vec::new(),
            corrective_actions: Vec::new(),
            hotspots: vec![Hotspot {
                area: "search".into(),
                severity: Severity::High,
                time: 41.0,
            }],
        });
        let json = serde_json::to_string(&cat).unwrap();
        let parsed: EvaluationCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kpis[0].hotspots[0].severity, Severity::High);
    }
}
