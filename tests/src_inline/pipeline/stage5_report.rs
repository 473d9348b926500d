use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::input::{CaloParticleEvent, ClusterEvents, LayerClusterEvent, ParticleEvents};
use crate::model::{SCORE_THRESHOLD, StyleConfig};
use crate::pipeline::session::PurityPlots;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("calo_purityqc_report_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_write_reports() {
    let dir = make_temp_dir();
    let particles: Vec<ParticleEvents> = vec![
        std::iter::once(CaloParticleEvent {
            energy: vec![10.0, 700.0],
            eta: vec![0.1, 0.0],
            phi: vec![0.1, 0.0],
            scores: vec![vec![0.1, 0.15], vec![0.9]],
        })
        .collect(),
    ];
    let clusters: Vec<ClusterEvents> =
        vec![std::iter::once(LayerClusterEvent::default()).collect()];
    let output = PurityPlots::new(&particles, &clusters)
        .legend(Some(vec!["nominal".to_string()]))
        .run()
        .unwrap();

    let style = StyleConfig::default();
    let data = SummaryData {
        tool_name: "calo-purityqc".to_string(),
        tool_version: "0.0.0".to_string(),
        style: &style,
        score_threshold: SCORE_THRESHOLD,
        annotation: Some("note"),
        tables: &output.tables,
    };
    let prefix = format!("{}/out/run_", dir.display());
    let written = write_reports(&data, &prefix).unwrap();
    assert_eq!(written.len(), 2);
    assert!(dir.join("out/run_summary.json").exists());
    assert!(dir.join("out/run_report.txt").exists());

    let json = std::fs::read_to_string(dir.join("out/run_summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "calo-purityqc");
    assert_eq!(value["cmsText"], "Simulation Preliminary");
    assert_eq!(value["annotation"], "note");
    assert_eq!(value["n_datasets"], 1);
    assert_eq!(value["metrics"][0]["metric"], "purity");
    assert_eq!(value["metrics"][1]["metric"], "duplicate");
    let dataset = &value["metrics"][0]["datasets"][0];
    assert_eq!(dataset["label"], "nominal");
    assert!(dataset.get("rgb").is_none());
    assert_eq!(dataset["overall"]["counted"], 2);
    let axes = dataset["axes"].as_array().unwrap();
    assert_eq!(axes.len(), 3);
    assert_eq!(axes[0]["axis"], "eta");
    assert_eq!(axes[0]["edges"].as_array().unwrap().len(), 10);
    assert_eq!(axes[0]["bins"].as_array().unwrap().len(), 9);
    // 700 GeV lies outside the energy range.
    let energy_den: u64 = axes[2]["bins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["denominator"].as_u64().unwrap())
        .sum();
    assert_eq!(energy_den, 1);

    let text = std::fs::read_to_string(dir.join("out/run_report.txt")).unwrap();
    assert!(text.contains("CaloParticle Purity & Duplicate Rate Report"));
    assert!(text.contains("nominal: counted=2 matched=1 duplicated=1"));
    assert!(text.contains("2. Purity by axis"));
    assert!(text.contains("3. Duplicate by axis"));
    assert!(text.contains("Annotation: note"));
    assert!(text.contains("n/a"));
}
