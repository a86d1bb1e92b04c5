//! Rule fixtures written to temporary artifacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// The three-rule scenario: two rules for A pass the default thresholds,
/// D -> E does not.
pub const SCENARIO: &str = r#"[
    {"antecedent": "A", "consequent": "B", "support": 0.05, "confidence": 0.4, "lift": 1.2},
    {"antecedent": "A", "consequent": "C", "support": 0.05, "confidence": 0.9, "lift": 2.0},
    {"antecedent": "D", "consequent": "E", "support": 0.01, "confidence": 0.1, "lift": 0.9}
]"#;

/// A small grocery basket using the plural column names some miners emit.
pub const GROCERIES: &str = r#"[
    {"antecedents": "whole milk", "consequents": "yogurt", "support": 0.056, "confidence": 0.22, "lift": 1.57},
    {"antecedents": "yogurt", "consequents": "whole milk", "support": 0.056, "confidence": 0.40, "lift": 1.57},
    {"antecedents": "rolls/buns", "consequents": "whole milk", "support": 0.057, "confidence": 0.31, "lift": 1.21},
    {"antecedents": "root vegetables", "consequents": "other vegetables", "support": 0.047, "confidence": 0.43, "lift": 2.25},
    {"antecedents": "whipped/sour cream", "consequents": "whole milk", "support": 0.032, "confidence": 0.45, "lift": 1.76},
    {"antecedents": "tropical fruit", "consequents": "yogurt", "support": 0.029, "confidence": 0.28, "lift": 2.0}
]"#;

/// Writes `contents` as `rules.json` inside a fresh temporary directory.
pub fn artifact(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("rules.json");
    fs::write(&path, contents).expect("write rules");
    (dir, path)
}

/// A path inside a fresh temporary directory that does not exist yet.
pub fn missing_artifact() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("rules.json");
    (dir, path)
}

/// Pin a file's modification time.
pub fn set_mtime(path: &Path, secs: u64) {
    let file = fs::File::options()
        .write(true)
        .open(path)
        .expect("open for mtime");
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .expect("set mtime");
}
