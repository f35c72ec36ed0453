//! Scanning real directories into the model.

use quarry_core::Config;
use quarry_scanner::{ScanReport, Scanner};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn touch(path: &Path, secs: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn config_for(root: &Path) -> Config {
    Config {
        index_roots: vec![root.to_path_buf()],
        exclusions: vec!["skip".to_string()],
        performance: quarry_core::config::PerformanceConfig { indexer_threads: 2 },
        ..Default::default()
    }
}

fn corpus() -> TempDir {
    let root = TempDir::new().unwrap();
    write_file(
        &root.path().join("gl/glClear.xhtml"),
        "<html><body><h1>glClear</h1><p>clear buffers to preset values</p></body></html>",
    );
    write_file(
        &root.path().join("gl/glEnable.xhtml"),
        "<html><body><h1>glEnable</h1><p>enable server-side GL capabilities</p></body></html>",
    );
    write_file(&root.path().join("notes/hashmap.md"), "A hashmap maps keys to values.");
    write_file(&root.path().join("notes/logo.png"), "not really a png");
    write_file(&root.path().join("skip/secret.txt"), "hashmap hashmap hashmap");
    root
}

#[test]
fn full_scan_indexes_supported_documents_only() {
    let root = corpus();
    let (model, report) = Scanner::new(config_for(root.path())).scan().unwrap();

    assert_eq!(model.len(), 3);
    assert_eq!(report.indexed, 3);
    assert_eq!(report.skipped, 0);
    assert!(!model.contains(&root.path().join("notes/logo.png")));
    assert!(!model.contains(&root.path().join("skip/secret.txt")));

    let hits = model.search("hashmap", 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, root.path().join("notes/hashmap.md"));
}

#[test]
fn rescan_only_touches_changed_files() {
    let root = corpus();
    let scanner = Scanner::new(config_for(root.path()));
    let (mut model, _) = scanner.scan().unwrap();

    let report = scanner.scan_into(&mut model).unwrap();
    assert_eq!(
        report,
        ScanReport {
            indexed: 0,
            unchanged: 3,
            removed: 0,
            skipped: 0,
        }
    );

    let notes = root.path().join("notes/hashmap.md");
    write_file(&notes, "A btree keeps keys sorted.");
    touch(&notes, 1_000);

    let report = scanner.scan_into(&mut model).unwrap();
    assert_eq!(report.indexed, 1);
    assert_eq!(report.unchanged, 2);
    assert!(model.search("hashmap", 10).is_empty());
    assert_eq!(model.search("btree", 10).len(), 1);
}

#[test]
fn rescan_drops_deleted_files() {
    let root = corpus();
    let scanner = Scanner::new(config_for(root.path()));
    let (mut model, _) = scanner.scan().unwrap();

    std::fs::remove_file(root.path().join("gl/glEnable.xhtml")).unwrap();
    let report = scanner.scan_into(&mut model).unwrap();

    assert_eq!(report.removed, 1);
    assert_eq!(model.len(), 2);
    assert!(model.search("capabilities", 10).is_empty());
}

#[test]
fn rescan_keeps_documents_outside_scanned_roots() {
    let root = corpus();
    let scanner = Scanner::new(config_for(root.path()));
    let (mut model, _) = scanner.scan().unwrap();
    model.insert_doc(
        PathBuf::from("/elsewhere/other.txt"),
        quarry_index::Doc::from_text("unrelated", SystemTime::UNIX_EPOCH),
    );

    let report = scanner.scan_into(&mut model).unwrap();
    assert_eq!(report.removed, 0);
    assert!(model.contains(Path::new("/elsewhere/other.txt")));
}

#[test]
fn unreadable_documents_are_skipped_not_fatal() {
    let root = corpus();
    std::fs::write(root.path().join("notes/broken.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let (model, report) = Scanner::new(config_for(root.path())).scan().unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(model.len(), 3);
}

#[test]
fn missing_root_is_an_error() {
    let root = TempDir::new().unwrap();
    let config = config_for(&root.path().join("does-not-exist"));
    let err = Scanner::new(config).scan().unwrap_err();
    assert!(matches!(err, quarry_core::Error::Scanner(_)));
}

#[test]
fn root_inside_excluded_directory_is_still_scanned() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("target/doc");
    write_file(&root.join("hashmap.html"), "<p>hashmap buckets</p>");
    write_file(&root.join("target/nested.md"), "hashmap nested");

    // Default exclusions contain `target`.
    let config = Config {
        index_roots: vec![root.clone()],
        ..Default::default()
    };
    let scanner = Scanner::new(config);

    let (mut model, report) = scanner.scan().unwrap();
    assert_eq!(report.indexed, 1);
    assert!(model.contains(&root.join("hashmap.html")));
    assert!(!model.contains(&root.join("target/nested.md")));

    let report = scanner.scan_into(&mut model).unwrap();
    assert_eq!(report.removed, 0);
    assert_eq!(report.unchanged, 1);
    assert!(model.contains(&root.join("hashmap.html")));
}
