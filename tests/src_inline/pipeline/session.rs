use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::input::{CaloParticleEvent, LayerClusterEvent};
use crate::model::KinematicAxis;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("calo_purityqc_session_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn particles(scores: Vec<Vec<f64>>) -> ParticleEvents {
    let n = scores.len();
    std::iter::once(CaloParticleEvent {
        energy: (0..n).map(|i| 100.0 + i as f64 * 50.0).collect(),
        eta: (0..n).map(|i| -1.0 + i as f64 * 0.4).collect(),
        phi: (0..n).map(|i| -2.5 + i as f64 * 1.0).collect(),
        scores,
    })
    .collect()
}

fn clusters(n_events: usize) -> ClusterEvents {
    vec![LayerClusterEvent::default(); n_events]
        .into_iter()
        .collect()
}

#[test]
fn test_run_without_prefix_returns_tables_only() {
    let cp = vec![particles(vec![
        vec![0.1, 0.1],
        vec![0.1, 0.5],
        vec![0.5],
        vec![],
    ])];
    let lc = vec![clusters(1)];
    let output = PurityPlots::new(&cp, &lc).run().unwrap();

    assert!(output.figures.is_empty());
    assert_eq!(output.tables.len(), 2);
    assert_eq!(output.tables[0].metric, Metric::Purity);
    assert_eq!(output.tables[1].metric, Metric::Duplicate);

    let purity = &output.tables[0].datasets[0];
    assert_eq!(purity.label, "dataset 1");
    assert_eq!(purity.color, "red");
    assert_eq!(purity.overall.counted, 3);
    assert_eq!(purity.overall.matched, 2);
    assert_eq!(purity.overall.duplicated, 1);
    assert!((purity.overall.purity - 2.0 / 3.0).abs() < 1e-12);
    assert!((purity.overall.duplicate_rate - 1.0 / 3.0).abs() < 1e-12);

    assert_eq!(purity.axes.len(), 3);
    assert_eq!(purity.axes[0].axis, KinematicAxis::Eta);
    assert_eq!(purity.axes[1].bins.len(), 11);
    let num = purity.axes[2].bins.iter().map(|b| b.numerator).sum::<u64>();
    let den = purity.axes[2].bins.iter().map(|b| b.denominator).sum::<u64>();
    assert_eq!((num, den), (2, 3));

    let duplicate = &output.tables[1].datasets[0];
    let num = duplicate.axes[0].bins.iter().map(|b| b.numerator).sum::<u64>();
    assert_eq!(num, 1);
}

#[test]
fn test_comparison_files_written() {
    let dir = make_temp_dir();
    let prefix = format!("{}/cmp_", dir.display());
    let cp = vec![
        particles(vec![vec![0.1], vec![0.3]]),
        particles(vec![vec![0.1, 0.05], vec![0.1]]),
    ];
    let lc = vec![clusters(1), clusters(1)];

    let output = PurityPlots::new(&cp, &lc)
        .legend(Some(vec!["v1".to_string(), "v2".to_string()]))
        .annotate(Some("two photons".to_string()))
        .save(Some(prefix.clone()))
        .run()
        .unwrap();

    let expected = vec![
        PathBuf::from(format!("{prefix}purity_comparison.pdf")),
        PathBuf::from(format!("{prefix}duplicate_comparison.pdf")),
    ];
    assert_eq!(output.figures, expected);
    for path in &expected {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "not a PDF: {}", path.display());
    }
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);
    assert_eq!(output.tables[0].datasets[1].label, "v2");
    assert_eq!(output.tables[0].datasets[1].color, "black");
}

#[test]
fn test_single_dataset_file_names() {
    let dir = make_temp_dir();
    let prefix = format!("{}/single_", dir.display());
    let cp = vec![particles(vec![vec![0.1]])];
    let lc = vec![clusters(1)];

    let output = PurityPlots::new(&cp, &lc)
        .colors(vec!["#336699".to_string()])
        .save(Some(prefix.clone()))
        .run()
        .unwrap();

    assert!(dir.join("single_purity.pdf").exists());
    assert!(dir.join("single_duplicate.pdf").exists());
    assert!(!dir.join("single_purity_comparison.pdf").exists());
    assert_eq!(output.figures.len(), 2);
}

#[test]
fn test_empty_denominators_do_not_fail() {
    let cp = vec![particles(vec![vec![], vec![]])];
    let lc = vec![clusters(1)];
    let output = PurityPlots::new(&cp, &lc).run().unwrap();
    for table in &output.tables {
        let dataset = &table.datasets[0];
        assert_eq!(dataset.overall.counted, 0);
        assert_eq!(dataset.overall.purity, 0.0);
        for axis in &dataset.axes {
            assert!(axis.bins.iter().all(|b| !b.defined && b.ratio == 0.0));
        }
    }
}

#[test]
fn test_shape_errors() {
    let none: Vec<ParticleEvents> = Vec::new();
    let no_lc: Vec<ClusterEvents> = Vec::new();
    assert!(matches!(
        PurityPlots::new(&none, &no_lc).run(),
        Err(PlotError::Shape(_))
    ));

    let cp = vec![particles(vec![vec![0.1]])];
    assert!(matches!(
        PurityPlots::new(&cp, &no_lc).run(),
        Err(PlotError::Shape(_))
    ));

    let three = vec![
        particles(vec![vec![0.1]]),
        particles(vec![vec![0.1]]),
        particles(vec![vec![0.1]]),
    ];
    let three_lc = vec![clusters(1), clusters(1), clusters(1)];
    assert!(matches!(
        PurityPlots::new(&three, &three_lc).run(),
        Err(PlotError::Shape(_))
    ));
    assert!(matches!(
        PurityPlots::new(&three, &three_lc)
            .colors(vec!["red".into(), "blue".into(), "green".into()])
            .legend(Some(vec!["a".into()]))
            .run(),
        Err(PlotError::Shape(_))
    ));
    assert!(
        PurityPlots::new(&three, &three_lc)
            .colors(vec!["red".into(), "blue".into(), "green".into()])
            .run()
            .is_ok()
    );
}

#[test]
fn test_invalid_color() {
    let cp = vec![particles(vec![vec![0.1]])];
    let lc = vec![clusters(1)];
    let err = PurityPlots::new(&cp, &lc)
        .colors(vec!["not-a-color".to_string()])
        .run()
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidColor(name) if name == "not-a-color"));
}

#[test]
fn test_event_count_mismatch_is_tolerated() {
    let cp = vec![particles(vec![vec![0.1]])];
    let lc = vec![clusters(4)];
    let output = PurityPlots::new(&cp, &lc).run().unwrap();
    assert_eq!(output.tables[0].datasets[0].overall.counted, 1);
}
