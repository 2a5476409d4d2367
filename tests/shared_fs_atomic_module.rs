use orgmap::shared::fs_atomic::{atomic_write_file, canonicalize_existing, remove_file_if_exists};
use std::fs;

#[test]
fn shared_fs_atomic_writes_and_canonicalizes_paths() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("nested/output.txt");

    atomic_write_file(&target, b"first").expect("write first");
    assert_eq!(fs::read_to_string(&target).expect("read first"), "first");

    atomic_write_file(&target, b"second").expect("write second");
    assert_eq!(fs::read_to_string(&target).expect("read second"), "second");

    let canonical = canonicalize_existing(&target).expect("canonicalize");
    assert!(canonical.is_absolute());
    assert!(canonical.ends_with("nested/output.txt"));

    let leftovers = fs::read_dir(target.parent().expect("parent"))
        .expect("read dir")
        .count();
    assert_eq!(leftovers, 1, "temp files must not survive a write");
}

#[test]
fn shared_fs_atomic_remove_reports_whether_file_existed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("entry.json");
    fs::write(&target, "{}").expect("seed");

    assert!(remove_file_if_exists(&target).expect("remove existing"));
    assert!(!target.exists());
    assert!(!remove_file_if_exists(&target).expect("remove missing"));
}
