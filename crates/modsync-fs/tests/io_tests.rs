use modsync_fs::io::{self, RobustnessConfig};
use modsync_fs::{Error, NormalizedPath};
use std::fs;
use tempfile::TempDir;

#[test]
fn write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("var/lib/modsync/pkg.json"));

    io::write_atomic(&path, b"{}", RobustnessConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated", RobustnessConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.txt"));

    io::write_atomic(&path, b"content", RobustnessConfig::default()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
}

#[test]
fn write_atomic_failure_keeps_previous_content() {
    let temp = TempDir::new().unwrap();
    // A directory at the target path makes the final rename fail
    let target = temp.path().join("record.json");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("inner"), "keep").unwrap();

    let path = NormalizedPath::new(&target);
    let config = RobustnessConfig {
        enable_fsync: false,
        max_retry: std::time::Duration::from_millis(50),
    };
    assert!(io::write_atomic(&path, b"new", config).is_err());

    assert_eq!(fs::read_to_string(target.join("inner")).unwrap(), "keep");
    let leftovers = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn read_text_nonexistent_file_names_path() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    match io::read_text(&path) {
        Err(Error::Io { path, .. }) => assert!(path.ends_with("file.txt")),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn copy_file_creates_target_directories() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source.txt");
    fs::write(&source, "payload").unwrap();
    let target = temp.path().join("deep/nested/target.txt");

    let copied = io::copy_file(&source, &target).unwrap();

    assert_eq!(copied, 7);
    assert_eq!(fs::read_to_string(&target).unwrap(), "payload");
}

#[test]
fn copy_file_missing_source_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result = io::copy_file(&temp.path().join("missing"), &temp.path().join("out"));
    assert!(matches!(result, Err(Error::Io { .. })));
}
