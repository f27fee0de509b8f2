use super::*;

#[test]
fn creates_unique_directories_under_a_missing_root() {
    let base = tempfile::tempdir().unwrap();
    let root = base.path().join("videos");

    let a = ScratchDir::create_in(&root).unwrap();
    let b = ScratchDir::create_in(&root).unwrap();
    assert_ne!(a.path(), b.path());
    assert!(a.path().starts_with(&root));
    assert!(
        a.path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("_frames_")
    );
}

#[test]
fn close_removes_directory_and_contents() {
    let base = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::create_in(base.path()).unwrap();
    let dir = scratch.path().to_path_buf();
    std::fs::write(dir.join("frame_000000.png"), b"png").unwrap();

    scratch.close();
    assert!(!dir.exists());
}

#[test]
fn drop_removes_directory_too() {
    let base = tempfile::tempdir().unwrap();
    let dir = {
        let scratch = ScratchDir::create_in(base.path()).unwrap();
        std::fs::write(scratch.path().join("frame_000001.png"), b"png").unwrap();
        scratch.path().to_path_buf()
    };
    assert!(!dir.exists());
}

#[test]
fn root_that_is_a_file_is_a_filesystem_error() {
    let base = tempfile::tempdir().unwrap();
    let file = base.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();
    assert!(matches!(
        ScratchDir::create_in(&file),
        Err(ReelError::Filesystem { .. })
    ));
}
