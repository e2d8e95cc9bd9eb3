//! Data contracts for the evaluation catalog.
//!
//! Everything here is an immutable record handed over by a provider; the
//! derivation modules only read these and produce fresh values.

use serde::{Deserialize, Serialize};

pub type EntityId = u32;

/// Clamp a percentage-like value into [0, 100]. Non-finite input is passed
/// through so the aggregators can treat it as missing rather than as zero.
pub fn clamp_pct(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        v
    }
}

// =============================================================================
// Classification tags
// =============================================================================

/// Classification axis applied to factors, guidelines, KPIs and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[serde(alias = "Technical")]
    Technical,
    #[serde(alias = "Social")]
    Social,
    #[serde(alias = "Organizational")]
    Organizational,
    #[serde(alias = "Economic")]
    Economic,
    // Appears only on guideline records in the source data.
    #[serde(alias = "Information")]
    Information,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Technical => "technical",
            Dimension::Social => "social",
            Dimension::Organizational => "organizational",
            Dimension::Economic => "economic",
            Dimension::Information => "information",
        }
    }

    /// The four primary axes used for dimension roll-ups.
    pub fn primary() -> [Dimension; 4] {
        [
            Dimension::Technical,
            Dimension::Social,
            Dimension::Organizational,
            Dimension::Economic,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    #[serde(rename = "planning")]
    Planning,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

// =============================================================================
// Leaf entities
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditioningFactor {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub dimension: Option<Dimension>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevExperienceFactor {
    pub group: String,
    pub id: EntityId,
    pub name: String,
    pub value: f64,
    pub dimension: Dimension,
}

/// One independently measurable compliance check under a guideline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessCriterion {
    pub id: String,
    pub name: String,
    pub compliance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub id: EntityId,
    pub name: String,
    pub compliance: f64,
    #[serde(default, rename = "linkedGuidelines")]
    pub linked_guidelines: Vec<EntityId>,
}

// =============================================================================
// Guidelines
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guideline {
    pub id: EntityId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dimension: Dimension,
    #[serde(default, rename = "conditioningFactors")]
    pub conditioning_factors: Vec<EntityId>,
    #[serde(default, rename = "devExpFactors")]
    pub dev_exp_factors: Vec<EntityId>,
    #[serde(default)]
    pub processes: Vec<EntityId>,
    #[serde(default, rename = "successCriteria")]
    pub success_criteria: Vec<SuccessCriterion>,
    /// Categorical tag carried by the source data; the derived tier wins
    /// whenever success criteria are present.
    #[serde(default)]
    pub status: Option<String>,
}

/// Drill-down payload served per guideline (monthly trend + subguidelines).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineDetail {
    pub id: EntityId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    pub compliance: f64,
    #[serde(default, rename = "detailedMetrics")]
    pub detailed_metrics: Vec<TrendPoint>,
    #[serde(default)]
    pub subguidelines: Vec<Subguideline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subguideline {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    pub compliance: f64,
}

// =============================================================================
// KPIs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(alias = "month")]
    pub period: String,
    pub value: f64,
}

/// An interface area where users spend disproportionate time or effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    pub area: String,
    pub severity: Severity,
    pub time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpi {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default, rename = "criticalSuccess")]
    pub critical_success: String,
    #[serde(default)]
    pub metric: String,
    /// Encodes both the numeric threshold and the comparison direction,
    /// e.g. "≥ 85%" or "< 3 minutes". Parsed by `score::Target`.
    pub target: String,
    pub current: f64,
    pub dimension: Dimension,
    #[serde(default, rename = "conditioningFactors")]
    pub conditioning_factors: Vec<EntityId>,
    #[serde(default)]
    pub trend: Vec<TrendPoint>,
    #[serde(default, rename = "correctiveActions")]
    pub corrective_actions: Vec<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

// =============================================================================
// Actions and usage logs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: EntityId,
    pub title: String,
    pub guideline: EntityId,
    pub kpi: EntityId,
    #[serde(default)]
    pub deadline: String,
    pub status: ActionStatus,
    #[serde(default)]
    pub impact: String,
    pub dimension: Dimension,
}

/// Raw usage-log record. The path is an ordered step sequence joined by
/// `flows::PATH_SEPARATOR`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationFlow {
    pub id: EntityId,
    pub path: String,
    pub count: u64,
    #[serde(rename = "avgTime")]
    pub avg_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub id: Dimension,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub task: String,
    pub time: f64,
    pub benchmark: f64,
}
