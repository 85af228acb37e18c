//! Shared utilities for jxref benchmarks.

// Benchmark utilities - pedantic lints not critical here
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Create a temporary repository with the given files.
/// Returns the temp directory (must be kept alive) and the repository path.
pub fn create_repo(files: &[(String, String)]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("failed to write file");
    }

    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Generate a Java class that calls into the previous package, both through
/// an import the scanner resolves and through a bare name left for the
/// import heuristic.
pub fn generate_java_class(package: usize, class: usize, methods: usize) -> String {
    let mut code = format!("package org.bench.p{package};\n\n");
    if package > 0 {
        let previous = package - 1;
        code.push_str(&format!("import org.bench.p{previous}.Class0;\n"));
        code.push_str(&format!("import org.bench.p{previous}.util.Marker;\n"));
    }
    code.push_str("import java.util.List;\n\n");
    code.push_str(&format!("public class Class{class} {{\n"));

    for m in 0..methods {
        code.push_str(&format!("    public int method{m}(List<String> items) {{\n"));
        code.push_str("        int total = items.size();\n");
        if package > 0 {
            code.push_str("        total += Class0.method0(items);\n");
            code.push_str(&format!("        total += Class{}.FIELD;\n", (class + 1) % 3));
        }
        code.push_str("        System.out.println(total);\n");
        code.push_str("        return total;\n    }\n\n");
    }

    code.push_str("    public static final int FIELD = 1;\n}\n");
    code
}

/// Generate a repository of `packages` packages with `classes` classes each.
pub fn generate_java_repo(packages: usize, classes: usize) -> Vec<(String, String)> {
    let mut files = Vec::new();
    for p in 0..packages {
        for c in 0..classes {
            files.push((
                format!("src/main/java/org/bench/p{p}/Class{c}.java"),
                generate_java_class(p, c, 4),
            ));
        }
    }
    files
}
