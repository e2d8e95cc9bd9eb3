//! Navigation-flow processing: turns raw usage-log records into the three
//! chart-ready hotspot metrics.

use crate::model::NavigationFlow;
use serde::Serialize;

/// Step separator inside a flow path ("dashboard->guidelines->technical").
pub const PATH_SEPARATOR: &str = "->";

/// How many of the highest-count paths to surface.
pub const TOP_PATHS: usize = 5;

/// One labelled value for a bar/pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Derived views over a navigation-flow log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowMetrics {
    /// Highest-count flows, descending, truncated to `TOP_PATHS`.
    pub top_paths: Vec<ChartPoint>,
    /// Visit tally per distinct final path segment, first-seen order.
    pub frequency_by_destination: Vec<ChartPoint>,
    /// Average dwell time per flow, one-to-one with input.
    pub time_by_path: Vec<ChartPoint>,
}

/// Final segment of a flow path. A path without separators is its own
/// destination.
fn destination(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

/// Derive the three hotspot metrics from a flow log. Input is never
/// mutated; empty input yields three empty outputs.
pub fn process_navigation_flows(flows: &[NavigationFlow]) -> FlowMetrics {
    if flows.is_empty() {
        return FlowMetrics::default();
    }

    // Tally destinations in first-seen order so output stays deterministic.
    let mut destinations: Vec<(String, u64)> = Vec::new();
    for flow in flows {
        let dest = destination(&flow.path);
        match destinations.iter_mut().find(|(name, _)| name == dest) {
            Some((_, count)) => *count += 1,
            None => destinations.push((dest.to_string(), 1)),
        }
    }
    let frequency_by_destination = destinations
        .into_iter()
        .map(|(name, count)| ChartPoint::new(name, count as f64))
        .collect();

    let time_by_path = flows
        .iter()
        .map(|f| ChartPoint::new(f.path.clone(), f.avg_time))
        .collect();

    let mut by_count: Vec<&NavigationFlow> = flows.iter().collect();
    by_count.sort_by(|a, b| b.count.cmp(&a.count));
    let top_paths = by_count
        .into_iter()
        .take(TOP_PATHS)
        .map(|f| ChartPoint::new(f.path.clone(), f.count as f64))
        .collect();

    FlowMetrics {
        top_paths,
        frequency_by_destination,
        time_by_path,
    }
}
