//! Integration tests for file-extension statistics.

use std::fs;

use jxref::{Config, Jxref};

#[test]
fn counts_extensions_across_the_tree() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (path, content) in [
        ("src/A.java", "class A {}"),
        ("src/B.java", "class B {}"),
        ("src/nested/C.java", "class C {}"),
        ("docs/readme.md", "# docs"),
        ("Makefile", "all:"),
        (".git/objects/pack.idx", "binary"),
    ] {
        let full_path = dir.path().join(path);
        fs::create_dir_all(full_path.parent().expect("has parent")).expect("mkdir");
        fs::write(full_path, content).expect("write");
    }

    let jxref = Jxref::new(dir.path(), Config::default()).expect("failed to create Jxref");
    let stats = jxref.extension_stats();

    assert_eq!(stats.count("java"), 3);
    assert_eq!(stats.count("md"), 1);
    assert_eq!(stats.count("idx"), 0);
    assert_eq!(stats.total(), 4);
    assert_eq!(stats.top_by_count(1), vec![("java", 3)]);

    let ratios = stats.ratios();
    assert!((ratios["java"] - 75.0).abs() < 1e-9);
}

#[test]
fn hidden_directories_are_skipped_but_dotfiles_count() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for path in [".git/config.lock", ".idea/workspace.xml", ".gitignore", "src/A.java"] {
        let full_path = dir.path().join(path);
        fs::create_dir_all(full_path.parent().expect("has parent")).expect("mkdir");
        fs::write(full_path, "x").expect("write");
    }

    let jxref = Jxref::new(dir.path(), Config::default()).expect("failed to create Jxref");
    let stats = jxref.extension_stats();

    assert_eq!(stats.count("lock"), 0);
    assert_eq!(stats.count("xml"), 0);
    assert_eq!(stats.count("gitignore"), 1);
    assert_eq!(stats.total(), 2);
}
