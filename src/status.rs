//! Three-tier status classification for compliance and attainment values.

use serde::{Deserialize, Serialize};

/// Severity tier for a compliance/attainment percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Good,
    Warning,
    Critical,
}

impl StatusTier {
    /// Tier for a numeric score: >= 80 good, 60..80 warning, below critical.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            StatusTier::Good
        } else if score >= 60.0 {
            StatusTier::Warning
        } else {
            StatusTier::Critical
        }
    }

    /// Normalize a categorical tag from the source data. Unrecognized tags
    /// fall to the lowest-confidence tier.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "success" | "completed" | "advanced" | "good" => StatusTier::Good,
            "warning" | "partial" | "established" => StatusTier::Warning,
            _ => StatusTier::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTier::Good => "good",
            StatusTier::Warning => "warning",
            StatusTier::Critical => "critical",
        }
    }
}

/// Label used on factor and KPI cards.
pub fn health_label(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Good => "Good",
        StatusTier::Warning => "Needs Attention",
        StatusTier::Critical => "Critical",
    }
}

/// Label used on action/progress views.
pub fn progress_label(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Good => "Complete",
        StatusTier::Warning => "Partial",
        StatusTier::Critical => "Not started",
    }
}
