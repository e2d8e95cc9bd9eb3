//! Compliance and attainment aggregation.
//!
//! All functions here are pure and total over well-typed input. Missing or
//! unusable data degrades to `None` (rendered "N/A" downstream), never to a
//! misleading zero.

use crate::model::{clamp_pct, Guideline, Kpi};
use serde::{Deserialize, Serialize};

// =============================================================================
// Target parsing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetDirection {
    /// Percentage-style targets: larger current is better.
    HigherIsBetter,
    /// Duration-style targets ("< 3 minutes"): smaller current is better.
    LowerIsBetter,
}

/// A KPI target decoded from its display string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub threshold: f64,
    pub direction: TargetDirection,
}

impl Target {
    /// Parse a target string such as "≥ 85%" or "< 3 minutes".
    ///
    /// The numeric threshold is whatever digits and decimal point remain
    /// after stripping everything else; a "<" anywhere in the string flips
    /// the comparison direction. Returns `None` when the threshold does not
    /// parse to a positive finite number (InvalidTarget).
    pub fn parse(raw: &str) -> Option<Target> {
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let threshold: f64 = digits.parse().ok()?;
        if !threshold.is_finite() || threshold <= 0.0 {
            return None;
        }
        let direction = if raw.contains('<') {
            TargetDirection::LowerIsBetter
        } else {
            TargetDirection::HigherIsBetter
        };
        Some(Target {
            threshold,
            direction,
        })
    }
}

// =============================================================================
// KPI attainment
// =============================================================================

/// Normalized [0, 100] measure of how close a KPI sits to its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attainment {
    pub pct: f64,
    pub direction: TargetDirection,
}

/// Compute a KPI's attainment percentage, honoring the target direction.
/// `None` means the target string is unusable (InvalidTarget).
pub fn attainment(kpi: &Kpi) -> Option<Attainment> {
    let target = Target::parse(&kpi.target)?;
    if !kpi.current.is_finite() {
        return None;
    }
    let ratio = kpi.current / target.threshold * 100.0;
    let pct = match target.direction {
        TargetDirection::HigherIsBetter => ratio.min(100.0),
        // Meeting the threshold is 100%; overshooting degrades linearly.
        TargetDirection::LowerIsBetter => (100.0 - (ratio - 100.0)).min(100.0),
    };
    Some(Attainment {
        pct: pct.clamp(0.0, 100.0),
        direction: target.direction,
    })
}

// =============================================================================
// Compliance roll-ups
// =============================================================================

fn rounded_mean(values: impl IntoIterator<Item = f64>) -> Option<u8> {
    let mut sum = 0.0;
    let mut n = 0u32;
    for v in values {
        if v.is_finite() {
            sum += clamp_pct(v);
            n += 1;
        }
    }
    if n == 0 {
        None
    } else {
        Some((sum / n as f64).round() as u8)
    }
}

/// Aggregate compliance of one guideline: rounded mean over its success
/// criteria. A guideline with no criteria has no data, which is distinct
/// from a genuine critical score of zero.
pub fn guideline_compliance(guideline: &Guideline) -> Option<u8> {
    rounded_mean(guideline.success_criteria.iter().map(|c| c.compliance))
}

/// Average derived compliance across a subset of guidelines (e.g. one
/// dimension). Guidelines without data are skipped, not zero-filled.
pub fn mean_compliance<'a>(guidelines: impl IntoIterator<Item = &'a Guideline>) -> Option<u8> {
    rounded_mean(
        guidelines
            .into_iter()
            .filter_map(guideline_compliance)
            .map(f64::from),
    )
}

/// One roll-up percentage across all KPIs: rounded mean of attainments.
/// KPIs with unusable targets are excluded from the average entirely.
pub fn overall_score(kpis: &[Kpi]) -> Option<u8> {
    rounded_mean(kpis.iter().filter_map(|k| attainment(k).map(|a| a.pct)))
}
