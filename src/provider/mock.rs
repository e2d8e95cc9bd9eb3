//! In-memory provider with simulated latency, used for development and as
//! the default when no backend is configured.

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use crate::catalog::EvaluationCatalog;
use crate::model::{
    ActionItem, ActionStatus, ConditioningFactor, DevExperienceFactor, Dimension, DimensionScore,
    EntityId, Guideline, GuidelineDetail, HeatPoint, Hotspot, Kpi, NavigationFlow, Process,
    Severity, Subguideline, SuccessCriterion, TaskCompletion, TrendPoint,
};
use crate::provider::EvaluationProvider;
use crate::state::Config;

pub struct MockProvider {
    delay: Duration,
    guideline_delay: Duration,
}

impl MockProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            delay: Duration::from_millis(cfg.mock_delay_ms),
            guideline_delay: Duration::from_millis(cfg.mock_guideline_delay_ms),
        }
    }

    /// No latency; handy in tests.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
            guideline_delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl EvaluationProvider for MockProvider {
    async fn fetch_catalog(&self) -> Result<EvaluationCatalog> {
        sleep(self.delay).await;
        Ok(mock_catalog().normalized())
    }

    async fn fetch_guideline(&self, id: EntityId) -> Result<Option<GuidelineDetail>> {
        sleep(self.guideline_delay).await;
        Ok(mock_guideline_detail(id))
    }
}

fn trend(points: &[(&str, f64)]) -> Vec<TrendPoint> {
    points
        .iter()
        .map(|(period, value)| TrendPoint {
            period: (*period).to_string(),
            value: *value,
        })
        .collect()
}

fn criteria(entries: &[(&str, &str, f64)]) -> Vec<SuccessCriterion> {
    entries
        .iter()
        .map(|(id, name, compliance)| SuccessCriterion {
            id: (*id).to_string(),
            name: (*name).to_string(),
            compliance: *compliance,
        })
        .collect()
}

/// The fixed development data set, mirroring what a real backend serves.
pub fn mock_catalog() -> EvaluationCatalog {
    EvaluationCatalog {
        dimensions: vec![
            DimensionScore {
                id: Dimension::Technical,
                name: "Technical".into(),
                status: Some("partial".into()),
                score: 70.0,
            },
            DimensionScore {
                id: Dimension::Social,
                name: "Social".into(),
                status: Some("partial".into()),
                score: 65.0,
            },
            DimensionScore {
                id: Dimension::Organizational,
                name: "Organizational".into(),
                status: Some("partial".into()),
                score: 55.0,
            },
            DimensionScore {
                id: Dimension::Economic,
                name: "Economic".into(),
                status: Some("partial".into()),
                score: 45.0,
            },
        ],
        conditioning_factors: vec![
            ConditioningFactor {
                id: 1,
                name: "Documentation Quality".into(),
                description: "Completeness and accuracy of ecosystem documentation".into(),
                value: 85.0,
                status: Some("success".into()),
                dimension: Some(Dimension::Technical),
            },
            ConditioningFactor {
                id: 2,
                name: "Community Engagement".into(),
                description: "Activity and responsiveness of the contributor community".into(),
                value: 65.0,
                status: Some("warning".into()),
                dimension: Some(Dimension::Social),
            },
            ConditioningFactor {
                id: 3,
                name: "Governance Clarity".into(),
                description: "Visibility of decision-making processes".into(),
                value: 60.0,
                status: Some("warning".into()),
                dimension: Some(Dimension::Organizational),
            },
            ConditioningFactor {
                id: 4,
                name: "Resource Utilization".into(),
                description: "Efficiency of resource allocation across the platform".into(),
                value: 45.0,
                status: Some("error".into()),
                dimension: Some(Dimension::Economic),
            },
        ],
        dev_exp_factors: vec![
            DevExperienceFactor {
                group: "tooling".into(),
                id: 1,
                name: "IDE Integration".into(),
                value: 72.0,
                dimension: Dimension::Technical,
            },
            DevExperienceFactor {
                group: "community".into(),
                id: 2,
                name: "Contribution Workflow".into(),
                value: 64.0,
                dimension: Dimension::Social,
            },
            DevExperienceFactor {
                group: "governance".into(),
                id: 3,
                name: "Decision Visibility".into(),
                value: 58.0,
                dimension: Dimension::Organizational,
            },
        ],
        guidelines: vec![
            Guideline {
                id: 1,
                name: "Code Documentation".into(),
                description: "Ensure comprehensive documentation of code and APIs".into(),
                dimension: Dimension::Technical,
                conditioning_factors: vec![1],
                dev_exp_factors: vec![1],
                processes: vec![1],
                success_criteria: criteria(&[
                    ("1.1", "API Documentation", 90.0),
                    ("1.2", "Code Comments", 70.0),
                ]),
                status: Some("success".into()),
            },
            Guideline {
                id: 2,
                name: "Testing Coverage".into(),
                description: "Maintain high testing coverage across all components".into(),
                dimension: Dimension::Technical,
                conditioning_factors: vec![1],
                dev_exp_factors: vec![1],
                processes: vec![1],
                success_criteria: criteria(&[
                    ("2.1", "Unit Test Coverage", 65.0),
                    ("2.2", "Integration Tests", 70.0),
                ]),
                status: Some("warning".into()),
            },
            Guideline {
                id: 3,
                name: "Community Guidelines".into(),
                description: "Clear guidelines for community contributions".into(),
                dimension: Dimension::Social,
                conditioning_factors: vec![2],
                dev_exp_factors: vec![2],
                processes: vec![2],
                success_criteria: criteria(&[
                    ("3.1", "Contribution Guide", 95.0),
                    ("3.2", "Code of Conduct", 85.0),
                ]),
                status: Some("success".into()),
            },
            Guideline {
                id: 4,
                name: "Inclusive Language".into(),
                description: "Use inclusive language in all documentation".into(),
                dimension: Dimension::Social,
                conditioning_factors: vec![2],
                dev_exp_factors: vec![2],
                processes: vec![],
                success_criteria: criteria(&[("4.1", "Docs Language Review", 72.0)]),
                status: Some("warning".into()),
            },
            Guideline {
                id: 5,
                name: "Governance Structure".into(),
                description: "Clearly defined governance and decision-making process".into(),
                dimension: Dimension::Organizational,
                conditioning_factors: vec![3],
                dev_exp_factors: vec![3],
                processes: vec![],
                success_criteria: criteria(&[("5.1", "Decision Records", 65.0)]),
                status: Some("warning".into()),
            },
            Guideline {
                id: 6,
                name: "Resource Management".into(),
                description: "Efficient allocation of development resources".into(),
                dimension: Dimension::Economic,
                conditioning_factors: vec![4],
                dev_exp_factors: vec![],
                processes: vec![],
                success_criteria: criteria(&[("6.1", "Budget Transparency", 45.0)]),
                status: Some("error".into()),
            },
        ],
        processes: vec![
            Process {
                id: 1,
                name: "Release Review".into(),
                compliance: 75.0,
                linked_guidelines: vec![1, 2],
            },
            Process {
                id: 2,
                name: "Community Onboarding".into(),
                compliance: 62.0,
                linked_guidelines: vec![3],
            },
        ],
        kpis: vec![
            Kpi {
                id: 1,
                name: "Documentation Coverage".into(),
                goal: "All public APIs documented".into(),
                critical_success: "New contributors find answers without asking".into(),
                metric: "Documented API surface".into(),
                target: "≥ 85%".into(),
                current: 78.0,
                dimension: Dimension::Technical,
                conditioning_factors: vec![1],
                trend: trend(&[("Jan", 70.0), ("Feb", 75.0), ("Mar", 78.0)]),
                corrective_actions: vec![
                    "Schedule documentation sprints per release".into(),
                    "Block merges lacking doc updates".into(),
                ],
                hotspots: vec![
                    Hotspot {
                        area: "API reference".into(),
                        severity: Severity::High,
                        time: 45.0,
                    },
                    Hotspot {
                        area: "tutorials".into(),
                        severity: Severity::Medium,
                        time: 22.0,
                    },
                ],
            },
            Kpi {
                id: 2,
                name: "Guideline Search Time".into(),
                goal: "Guidelines locatable in under three minutes".into(),
                critical_success: "Users stop abandoning guideline searches".into(),
                metric: "Median search-to-open time".into(),
                target: "< 3 minutes".into(),
                current: 5.8,
                dimension: Dimension::Technical,
                conditioning_factors: vec![1],
                trend: trend(&[("Jan", 7.5), ("Feb", 6.4), ("Mar", 5.8)]),
                corrective_actions: vec!["Add faceted search over guideline metadata".into()],
                hotspots: vec![
                    Hotspot {
                        area: "search bar".into(),
                        severity: Severity::High,
                        time: 48.0,
                    },
                    Hotspot {
                        area: "filter panel".into(),
                        severity: Severity::Medium,
                        time: 18.0,
                    },
                ],
            },
            Kpi {
                id: 3,
                name: "Community Response Rate".into(),
                goal: "Questions answered within one business day".into(),
                critical_success: "Contributors stay after their first question".into(),
                metric: "Threads with a response in 24h".into(),
                target: "≥ 70%".into(),
                current: 74.0,
                dimension: Dimension::Social,
                conditioning_factors: vec![2],
                trend: trend(&[("Jan", 61.0), ("Feb", 68.0), ("Mar", 74.0)]),
                corrective_actions: vec![],
                hotspots: vec![Hotspot {
                    area: "forum".into(),
                    severity: Severity::Low,
                    time: 12.0,
                }],
            },
            Kpi {
                id: 4,
                name: "Partner Onboarding Time".into(),
                goal: "New partners productive within two weeks".into(),
                critical_success: "Onboarding does not require insider knowledge".into(),
                metric: "Days to first accepted contribution".into(),
                target: "< 14 days".into(),
                current: 11.0,
                dimension: Dimension::Organizational,
                conditioning_factors: vec![3],
                trend: trend(&[("Jan", 19.0), ("Feb", 15.0), ("Mar", 11.0)]),
                corrective_actions: vec![],
                hotspots: vec![],
            },
        ],
        action_items: vec![
            ActionItem {
                id: 1,
                title: "Introduce documentation linting in CI".into(),
                guideline: 1,
                kpi: 1,
                deadline: "2025-06-30".into(),
                status: ActionStatus::InProgress,
                impact: "Raises documentation coverage at merge time".into(),
                dimension: Dimension::Technical,
            },
            ActionItem {
                id: 2,
                title: "Rebuild guideline search with metadata facets".into(),
                guideline: 2,
                kpi: 2,
                deadline: "2025-07-15".into(),
                status: ActionStatus::Planning,
                impact: "Cuts guideline search time below target".into(),
                dimension: Dimension::Technical,
            },
            ActionItem {
                id: 3,
                title: "Publish governance decision log".into(),
                guideline: 5,
                kpi: 4,
                deadline: "2025-05-31".into(),
                status: ActionStatus::Completed,
                impact: "Makes decision paths visible to partners".into(),
                dimension: Dimension::Organizational,
            },
        ],
        navigation_flows: vec![
            NavigationFlow {
                id: 1,
                path: "dashboard->guidelines->technical".into(),
                count: 145,
                avg_time: 32.0,
            },
            NavigationFlow {
                id: 2,
                path: "dashboard->hotspots->interaction".into(),
                count: 98,
                avg_time: 45.0,
            },
            NavigationFlow {
                id: 3,
                path: "guidelines->dashboard".into(),
                count: 112,
                avg_time: 18.0,
            },
        ],
        heatmap: vec![
            HeatPoint { x: 120.0, y: 80.0, value: 45.0 },
            HeatPoint { x: 200.0, y: 150.0, value: 75.0 },
            HeatPoint { x: 280.0, y: 90.0, value: 35.0 },
            HeatPoint { x: 180.0, y: 200.0, value: 55.0 },
            HeatPoint { x: 100.0, y: 250.0, value: 25.0 },
        ],
        task_completion_times: vec![
            TaskCompletion {
                task: "Find Technical Guidelines".into(),
                time: 18.5,
                benchmark: 15.0,
            },
            TaskCompletion {
                task: "Locate KPI Dashboard".into(),
                time: 8.2,
                benchmark: 10.0,
            },
            TaskCompletion {
                task: "Identify Hotspots".into(),
                time: 25.7,
                benchmark: 20.0,
            },
        ],
    }
}

/// Drill-down payloads exist only for the first two guidelines, matching
/// the development backend.
pub fn mock_guideline_detail(id: EntityId) -> Option<GuidelineDetail> {
    match id {
        1 => Some(GuidelineDetail {
            id: 1,
            name: "Code Documentation".into(),
            description: "Ensure comprehensive documentation of code and APIs".into(),
            status: Some("success".into()),
            compliance: 85.0,
            detailed_metrics: trend(&[("Jan", 75.0), ("Feb", 80.0), ("Mar", 85.0)]),
            subguidelines: vec![
                Subguideline {
                    id: "1.1".into(),
                    name: "API Documentation".into(),
                    status: Some("success".into()),
                    compliance: 90.0,
                },
                Subguideline {
                    id: "1.2".into(),
                    name: "Code Comments".into(),
                    status: Some("warning".into()),
                    compliance: 70.0,
                },
            ],
        }),
        2 => Some(GuidelineDetail {
            id: 2,
            name: "Testing Coverage".into(),
            description: "Maintain high testing coverage across all components".into(),
            status: Some("warning".into()),
            compliance: 68.0,
            detailed_metrics: trend(&[("Jan", 60.0), ("Feb", 65.0), ("Mar", 68.0)]),
            subguidelines: vec![
                Subguideline {
                    id: "2.1".into(),
                    name: "Unit Test Coverage".into(),
                    status: Some("warning".into()),
                    compliance: 65.0,
                },
                Subguideline {
                    id: "2.2".into(),
                    name: "Integration Tests".into(),
                    status: Some("warning".into()),
                    compliance: 70.0,
                },
            ],
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn instant_mock_serves_catalog() {
        let provider = MockProvider::instant();
        let catalog = provider.fetch_catalog().await.unwrap();
        assert_eq!(catalog.kpis.len(), 4);
        assert_eq!(catalog.guidelines.len(), 6);
        assert_eq!(catalog.navigation_flows.len(), 3);
    }

    #[tokio::test]
    async fn unknown_guideline_is_none_not_error() {
        let provider = MockProvider::instant();
        assert!(provider.fetch_guideline(999).await.unwrap().is_none());
        assert!(provider.fetch_guideline(1).await.unwrap().is_some());
    }

    #[test]
    fn mock_references_all_resolve() {
        // The development data set must not ship dangling ids.
        let catalog = mock_catalog();
        for kpi in &catalog.kpis {
            for id in &kpi.conditioning_factors {
                assert!(
                    catalog.conditioning_factors.iter().any(|f| f.id == *id),
                    "kpi {} references missing factor {}",
                    kpi.id,
                    id
                );
            }
        }
        for action in &catalog.action_items {
            assert!(catalog.guideline_for(action).is_some());
            assert!(catalog.kpi_for(action).is_some());
        }
        for guideline in &catalog.guidelines {
            for id in &guideline.processes {
                assert!(catalog.processes.iter().any(|p| p.id == *id));
            }
        }
    }

    #[test]
    fn mock_catalog_is_chart_ready() {
        let catalog = mock_catalog();
        // Every KPI target must parse; the mock is the reference data set.
        for kpi in &catalog.kpis {
            assert!(
                crate::score::attainment(kpi).is_some(),
                "kpi {} has unusable target {:?}",
                kpi.id,
                kpi.target
            );
        }
    }
}
