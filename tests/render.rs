extern crate mandelzoom;
extern crate num;
extern crate tempfile;

use mandelzoom::{
    iterations_at_point, render_sequence, ImageFileEncoder, PathTemplate, SequenceConfig,
    WorkerOutcome,
};
use num::Complex;
use std::fs;

fn config(dir: &std::path::Path, workers: usize) -> SequenceConfig {
    let template = dir.join("frame%d.ppm");
    SequenceConfig {
        template: PathTemplate::parse(template.to_str().unwrap()).unwrap(),
        center: Complex::new(-0.746415, -0.184298),
        width: 12,
        height: 9,
        max_iterations: 64,
        workers,
        quiet: true,
        ..SequenceConfig::default()
    }
}

#[test]
fn every_worker_count_writes_each_frame_once() {
    for workers in &[1, 2, 3, 7, 13, 49, 50, 64] {
        let dir = tempfile::tempdir().unwrap();
        let report = render_sequence(&config(dir.path(), *workers), &ImageFileEncoder::default())
            .unwrap();
        assert!(report.succeeded());
        assert_eq!(report.workers.len(), *workers);
        assert_eq!(report.frames_written(), 50);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 50);
    }
}

#[test]
fn workers_finish_even_when_one_fails() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on frame 20's path makes that one write fail.
    fs::create_dir(dir.path().join("frame20.ppm")).unwrap();
    let report = render_sequence(&config(dir.path(), 5), &ImageFileEncoder::default()).unwrap();
    assert!(!report.succeeded());
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].partition.frames, 20..30);
    match failures[0].outcome {
        WorkerOutcome::Failed { frame, completed, .. } => {
            assert_eq!(frame, 20);
            assert_eq!(completed, 0);
        }
        ref other => panic!("unexpected {:?}", other),
    }
    // Everyone else wrote their ten frames.
    assert_eq!(report.frames_written(), 40);
    assert!(dir.path().join("frame49.ppm").exists());
    assert!(!dir.path().join("frame21.ppm").exists());
}

#[test]
fn frames_zoom_in_on_the_center() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), 1);
    let first = config.frame(0);
    let last = config.frame(49);
    assert!(last.viewport.xmax - last.viewport.xmin < first.viewport.xmax - first.viewport.xmin);
    assert!(last.viewport.xmin > first.viewport.xmin);
    assert!(last.viewport.xmax < first.viewport.xmax);
    assert_eq!(last.scale, 4.0 * 0.85f64.powf(49.0));
}

#[test]
fn origin_is_in_the_set() {
    assert_eq!(iterations_at_point(0.0, 0.0, 1000), 1000);
    assert_eq!(iterations_at_point(3.0, 0.0, 1000), 0);
}
