#![allow(dead_code)]

use std::path::PathBuf;

use labelimg2train::label::PixelBox;
use labelimg2train::manifest::ManifestLine;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// `n` distinct manifest lines, each with a single box.
pub fn manifest_lines(n: usize) -> Vec<ManifestLine> {
    (0..n)
        .map(|i| ManifestLine {
            label_path: PathBuf::from(format!("labels/img{i}.txt")),
            boxes: vec![PixelBox {
                x1: i as i64 + 1,
                y1: i as i64 + 1,
                x2: i as i64,
                y2: i as i64,
                class_id: (i % 3).to_string(),
            }],
            label_missing: false,
        })
        .collect()
}

/// Normalized box components within the usual `[0, 1]` range.
pub fn arb_unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}
