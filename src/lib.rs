//! Evaluation core for SECO transparency dashboards.
//!
//! A provider supplies an immutable catalog of KPIs, guidelines, factors
//! and usage logs; the modules here derive the chart-ready views from it:
//! status tiers, compliance and attainment roll-ups, hotspot buckets and
//! navigation-flow metrics. Rendering is someone else's job.

pub mod catalog;
pub mod flows;
pub mod hotspots;
pub mod logging;
pub mod model;
pub mod provider;
pub mod score;
pub mod state;
pub mod status;
