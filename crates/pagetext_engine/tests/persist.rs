use std::fs;
use std::path::Path;

use pagetext_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_creates_nested_dirs_and_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let relative = Path::new("example.com/blog/post.txt");

    let first = writer.write(relative, "hello").unwrap();
    assert_eq!(first, temp.path().join(relative));
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write(relative, "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn refuses_paths_outside_the_root() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("root"));

    let err = writer
        .write(Path::new("../escape.txt"), "data")
        .unwrap_err();
    assert!(matches!(err, PersistError::EscapesRoot(_)));
    assert!(!temp.path().join("escape.txt").exists());
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write(Path::new("doc.txt"), "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("doc.txt").exists());
}

#[cfg(unix)]
#[test]
fn overwrite_swaps_in_the_new_file_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let relative = Path::new("example.com/post.txt");
    let target = writer.write(relative, "old").unwrap();

    let reader = fs::File::open(&target).unwrap();
    writer.write(relative, "new").unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    assert_eq!(std::io::read_to_string(reader).unwrap(), "old");
    let entries: Vec<_> = fs::read_dir(temp.path().join("example.com"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("post.txt")]);
}
