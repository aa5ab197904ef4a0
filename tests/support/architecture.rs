//! Source-tree scanning helpers for the architecture contract tests.

use std::fs;
use std::path::{Path, PathBuf};

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Collect `file:line: text` entries for lines under `relative_dir` that
/// contain any of the given needles.
pub fn find_lines_containing(relative_dir: &str, needles: &[&str]) -> Vec<String> {
    let mut hits = Vec::new();
    visit(&crate_root().join(relative_dir), &mut |path, line_no, line| {
        for needle in needles {
            if line.contains(needle) {
                hits.push(format!("{}:{line_no}: {}", path.display(), line.trim()));
            }
        }
    });
    hits
}

fn visit(dir: &Path, found: &mut impl FnMut(&Path, usize, &str)) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit(&path, found);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            if let Ok(contents) = fs::read_to_string(&path) {
                for (index, line) in contents.lines().enumerate() {
                    found(&path, index + 1, line);
                }
            }
        }
    }
}
