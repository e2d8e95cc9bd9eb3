//! Headless evaluation loop: fetch the catalog, run every derivation, emit
//! the results as structured JSON for whatever renders them.

use anyhow::Result;
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

use seco_transparency::catalog::EvaluationCatalog;
use seco_transparency::flows::process_navigation_flows;
use seco_transparency::hotspots::{
    bucket_by_severity, flatten_kpi_hotspots, task_overruns, top_by_time,
};
use seco_transparency::logging::{
    json_log, log_audit, obj, v_num, v_opt_pct, v_str, Domain,
};
use seco_transparency::model::Hotspot;
use seco_transparency::provider::retry::{retry_async, RetryConfig};
use seco_transparency::provider::ProviderKind;
use seco_transparency::score::{attainment, guideline_compliance, overall_score};
use seco_transparency::state::{Config, DashboardState};
use seco_transparency::status::{health_label, StatusTier};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let kind = ProviderKind::from_env();
    let provider = kind.build(&cfg)?;
    let mut state = DashboardState::new();
    let retry_cfg = RetryConfig::default();

    json_log(
        Domain::System,
        "startup",
        obj(&[
            ("provider", v_str(&format!("{:?}", kind).to_lowercase())),
            ("api_base", v_str(&cfg.api_base)),
            ("refresh_secs", json!(cfg.refresh_secs)),
        ]),
    );

    loop {
        let ticket = state.begin_catalog_fetch();
        match retry_async(&retry_cfg, "fetch_catalog", || provider.fetch_catalog()).await {
            Ok(catalog) => {
                if state.apply_catalog(ticket, catalog) {
                    if let Some(catalog) = state.catalog() {
                        derive_and_log(&cfg, catalog);
                    }
                }
            }
            Err(e) => {
                state.fail_catalog_fetch(ticket);
                json_log(
                    Domain::Provider,
                    "catalog_unavailable",
                    obj(&[("error", v_str(&e.to_string()))]),
                );
            }
        }

        sleep(Duration::from_secs(cfg.refresh_secs)).await;
    }
}

fn derive_and_log(cfg: &Config, catalog: &EvaluationCatalog) {
    let hash = catalog.content_hash();
    log_audit(
        "catalog_loaded",
        &hash,
        &[
            ("kpis", json!(catalog.kpis.len())),
            ("guidelines", json!(catalog.guidelines.len())),
            ("navigation_flows", json!(catalog.navigation_flows.len())),
        ],
    );

    if catalog.is_empty() {
        // Explicit "no data yet" instead of a stream of empty derivations.
        json_log(Domain::Derive, "no_data", obj(&[]));
        return;
    }

    let score = overall_score(&catalog.kpis);
    json_log(
        Domain::Derive,
        "overall_score",
        obj(&[
            ("score", v_opt_pct(score)),
            (
                "tier",
                score
                    .map(|s| v_str(StatusTier::from_score(f64::from(s)).as_str()))
                    .unwrap_or(Value::Null),
            ),
        ]),
    );

    for summary in catalog.dimension_summaries() {
        json_log(
            Domain::Derive,
            "dimension_summary",
            obj(&[
                ("dimension", v_str(summary.dimension.as_str())),
                ("guidelines", json!(summary.guideline_count)),
                ("compliance", v_opt_pct(summary.compliance)),
                (
                    "tier",
                    summary
                        .tier
                        .map(|t| v_str(t.as_str()))
                        .unwrap_or(Value::Null),
                ),
            ]),
        );
    }

    for guideline in &catalog.guidelines {
        let compliance = guideline_compliance(guideline);
        let tier = compliance.map(|c| StatusTier::from_score(f64::from(c)));
        json_log(
            Domain::Derive,
            "guideline_compliance",
            obj(&[
                ("guideline_id", json!(guideline.id)),
                ("name", v_str(&guideline.name)),
                ("dimension", v_str(guideline.dimension.as_str())),
                ("compliance", v_opt_pct(compliance)),
                ("tier", tier.map(|t| v_str(t.as_str())).unwrap_or(Value::Null)),
                (
                    "label",
                    tier.map(|t| v_str(health_label(t))).unwrap_or(Value::Null),
                ),
            ]),
        );
    }

    for kpi in &catalog.kpis {
        match attainment(kpi) {
            Some(a) => {
                let tier = StatusTier::from_score(a.pct);
                json_log(
                    Domain::Derive,
                    "kpi_attainment",
                    obj(&[
                        ("kpi_id", json!(kpi.id)),
                        ("name", v_str(&kpi.name)),
                        ("target", v_str(&kpi.target)),
                        ("current", v_num(kpi.current)),
                        ("attainment", v_num(a.pct)),
                        ("direction", json!(a.direction)),
                        ("tier", v_str(tier.as_str())),
                        ("label", v_str(health_label(tier))),
                    ]),
                );
            }
            None => {
                json_log(
                    Domain::Derive,
                    "kpi_invalid_target",
                    obj(&[("kpi_id", json!(kpi.id)), ("target", v_str(&kpi.target))]),
                );
            }
        }
    }

    let flat = flatten_kpi_hotspots(&catalog.kpis);
    let spots: Vec<Hotspot> = flat
        .iter()
        .map(|h| Hotspot {
            area: h.area.clone(),
            severity: h.severity,
            time: h.time,
        })
        .collect();
    let buckets = bucket_by_severity(&spots);
    let top = top_by_time(&spots, cfg.top_hotspots);
    let mut fields = obj(&[
        ("high", json!(buckets.high.len())),
        ("medium", json!(buckets.medium.len())),
        ("low", json!(buckets.low.len())),
        ("top_by_time", json!(top)),
    ]);
    if let Some(worst) = top.first() {
        fields.insert("worst_area".to_string(), v_str(&worst.area));
        fields.insert("worst_severity".to_string(), v_str(worst.severity.as_str()));
    }
    json_log(Domain::Derive, "hotspot_buckets", fields);

    let flows = process_navigation_flows(&catalog.navigation_flows);
    json_log(
        Domain::Derive,
        "flow_metrics",
        obj(&[
            ("top_paths", json!(flows.top_paths)),
            (
                "frequency_by_destination",
                json!(flows.frequency_by_destination),
            ),
            ("time_by_path", json!(flows.time_by_path)),
        ]),
    );

    let overruns = task_overruns(&catalog.task_completion_times);
    if !overruns.is_empty() {
        json_log(
            Domain::Derive,
            "task_overruns",
            obj(&[("tasks", json!(overruns))]),
        );
    }
}
