//! Hotspot roll-ups: severity bucketing, top-N extraction and per-KPI
//! flattening for the usage-analytics views.

use crate::model::{Dimension, EntityId, Hotspot, Kpi, Severity, TaskCompletion};
use serde::Serialize;

/// Hotspots partitioned by severity, original relative order preserved
/// within each bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeverityBuckets {
    pub high: Vec<Hotspot>,
    pub medium: Vec<Hotspot>,
    pub low: Vec<Hotspot>,
}

impl SeverityBuckets {
    pub fn total(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }
}

/// Stable partition of a flat hotspot list into severity buckets.
pub fn bucket_by_severity(hotspots: &[Hotspot]) -> SeverityBuckets {
    let mut buckets = SeverityBuckets::default();
    for h in hotspots {
        match h.severity {
            Severity::High => buckets.high.push(h.clone()),
            Severity::Medium => buckets.medium.push(h.clone()),
            Severity::Low => buckets.low.push(h.clone()),
        }
    }
    buckets
}

/// The `n` hotspots with greatest time, descending; ties keep input order.
pub fn top_by_time(hotspots: &[Hotspot], n: usize) -> Vec<Hotspot> {
    let mut sorted: Vec<Hotspot> = hotspots.to_vec();
    sorted.sort_by(|a, b| b.time.partial_cmp(&a.time).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// A hotspot annotated with the KPI it was observed under.
#[derive(Debug, Clone, Serialize)]
pub struct KpiHotspot {
    pub kpi_id: EntityId,
    pub kpi_name: String,
    pub dimension: Dimension,
    pub area: String,
    pub severity: Severity,
    pub time: f64,
}

/// Expand every KPI's embedded hotspot list into one flat annotated list.
pub fn flatten_kpi_hotspots(kpis: &[Kpi]) -> Vec<KpiHotspot> {
    kpis.iter()
        .flat_map(|kpi| {
            kpi.hotspots.iter().map(move |h| KpiHotspot {
                kpi_id: kpi.id,
                kpi_name: kpi.name.clone(),
                dimension: kpi.dimension,
                area: h.area.clone(),
                severity: h.severity,
                time: h.time,
            })
        })
        .collect()
}

/// A tracked task whose measured completion time exceeds its benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOverrun {
    pub task: String,
    pub time: f64,
    pub benchmark: f64,
    /// Percentage over benchmark, e.g. 23.3 for a 18.5s task against 15s.
    pub overrun_pct: f64,
}

/// Keep only the tasks running over benchmark, worst first.
pub fn task_overruns(tasks: &[TaskCompletion]) -> Vec<TaskOverrun> {
    let mut overruns: Vec<TaskOverrun> = tasks
        .iter()
        .filter(|t| t.benchmark > 0.0 && t.time > t.benchmark)
        .map(|t| TaskOverrun {
            task: t.task.clone(),
            time: t.time,
            benchmark: t.benchmark,
            overrun_pct: (t.time / t.benchmark - 1.0) * 100.0,
        })
        .collect();
    overruns.sort_by(|a, b| {
        b.overrun_pct
            .partial_cmp(&a.overrun_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    overruns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(area: &str, severity: Severity, time: f64) -> Hotspot {
        Hotspot {
            area: area.into(),
            severity,
            time,
        }
    }

    #[test]
    fn severity_partition_is_stable() {
        let input = vec![
            spot("A", Severity::High, 10.0),
            spot("B", Severity::Medium, 20.0),
            spot("C", Severity::High, 5.0),
        ];
        let buckets = bucket_by_severity(&input);
        let high: Vec<&str> = buckets.high.iter().map(|h| h.area.as_str()).collect();
        assert_eq!(high, vec!["A", "C"]);
        let medium: Vec<&str> = buckets.medium.iter().map(|h| h.area.as_str()).collect();
        assert_eq!(medium, vec!["B"]);
        assert!(buckets.low.is_empty());
        assert_eq!(buckets.total(), 3);
    }

    #[test]
    fn top_by_time_descending_with_stable_ties() {
        let input = vec![
            spot("A", Severity::Low, 10.0),
            spot("B", Severity::Low, 30.0),
            spot("C", Severity::Low, 10.0),
            spot("D", Severity::Low, 20.0),
        ];
        let top = top_by_time(&input, 3);
        let areas: Vec<&str> = top.iter().map(|h| h.area.as_str()).collect();
        // A comes before C: same time, input order preserved.
        assert_eq!(areas, vec!["B", "D", "A"]);
    }

    #[test]
    fn top_by_time_handles_short_input() {
        let input = vec![spot("A", Severity::Low, 1.0)];
        assert_eq!(top_by_time(&input, 5).len(), 1);
        assert!(top_by_time(&[], 5).is_empty());
    }

    #[test]
    fn flatten_annotates_with_parent_kpi() {
        let kpis = vec![
            Kpi {
                id: 7,
                name: "Search Efficiency".into(),
                goal: String::new(),
                critical_success: String::new(),
                metric: String::new(),
                target: "< 3 minutes".into(),
                current: 5.8,
                dimension: Dimension::Technical,
                conditioning_factors: Vec::new(),
                trend: Vec::new(),
                corrective_actions: Vec::new(),
                hotspots: vec![
                    spot("search bar", Severity::High, 45.0),
                    spot("filters", Severity::Medium, 12.0),
                ],
            },
        ];
        let flat = flatten_kpi_hotspots(&kpis);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].kpi_id, 7);
        assert_eq!(flat[0].kpi_name, "Search Efficiency");
        assert_eq!(flat[1].area, "filters");
    }

    #[test]
    fn task_overruns_filters_and_orders() {
        let tasks = vec![
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
        ];
        let overruns = task_overruns(&tasks);
        assert_eq!(overruns.len(), 2);
        // 28.5% over beats 23.3% over.
        assert_eq!(overruns[0].task, "Identify Hotspots");
        assert!((overruns[1].overrun_pct - 23.333333333333332).abs() < 1e-9);
    }
}
