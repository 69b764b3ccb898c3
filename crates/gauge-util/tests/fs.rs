use gauge_util::fs::{
    absolutize, dir_exists, ensure_dir, file_exists, find_ancestor_with, FileSystem, OsFs,
};
use gauge_util::memfs::MemoryFs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("manifest.json"), "").unwrap();
    let result = find_ancestor_with(&OsFs, tmp.path(), "manifest.json");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("manifest.json"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&OsFs, &nested, "manifest.json");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(&OsFs, tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_find_ancestor_with_nearest_wins() {
    let fs = MemoryFs::new();
    fs.add_file("/outer/manifest.json", "")
        .add_file("/outer/inner/manifest.json", "")
        .add_dir("/outer/inner/specs");
    let result = find_ancestor_with(&fs, Path::new("/outer/inner/specs"), "manifest.json");
    assert_eq!(result, Some(PathBuf::from("/outer/inner")));
}

#[test]
fn test_find_ancestor_with_marker_at_root() {
    let fs = MemoryFs::new();
    fs.add_file("/manifest.json", "").add_dir("/a/b");
    let result = find_ancestor_with(&fs, Path::new("/a/b"), "manifest.json");
    assert_eq!(result, Some(PathBuf::from("/")));
}

#[test]
fn test_find_ancestor_with_missing_start_dir() {
    let fs = MemoryFs::new();
    fs.add_file("/proj/manifest.json", "");
    let result = find_ancestor_with(&fs, Path::new("/proj/not/there"), "manifest.json");
    assert_eq!(result, Some(PathBuf::from("/proj")));
}

#[test]
fn test_absolutize_relative_against_cwd() {
    let fs = MemoryFs::new();
    fs.add_dir("/work/proj");
    fs.set_current_dir("/work").unwrap();
    let abs = absolutize(&fs, Path::new("proj/./specs/../specs/")).unwrap();
    assert_eq!(abs, PathBuf::from("/work/proj/specs"));
}

#[test]
fn test_absolutize_keeps_absolute() {
    let fs = MemoryFs::new();
    let abs = absolutize(&fs, Path::new("/x/y/../z")).unwrap();
    assert_eq!(abs, PathBuf::from("/x/z"));
}

#[test]
fn test_file_exists_for_files_and_dirs() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("manifest.json");
    std::fs::write(&file, "{}").unwrap();
    assert!(file_exists(&file));
    assert!(file_exists(tmp.path()));
    assert!(!file_exists(&tmp.path().join("invalid")));
}

#[test]
fn test_dir_exists_only_for_dirs() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("f.txt");
    std::fs::write(&file, "").unwrap();
    assert!(dir_exists(tmp.path()));
    assert!(!dir_exists(&file));
}

#[test]
fn test_os_fs_append_creates_and_appends() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("out.txt");
    OsFs.append(&file, "one\n").unwrap();
    OsFs.append(&file, "two\n").unwrap();
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "one\ntwo\n");
}

#[test]
fn test_os_fs_append_missing_parent_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("missing").join("out.txt");
    let err = OsFs.append(&file, "x").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_os_fs_write_creates_parents() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("a").join("b").join("c.txt");
    OsFs.write(&file, "hello").unwrap();
    assert_eq!(OsFs.read_to_string(&file).unwrap(), "hello");
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("x").join("y").join("z");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_ensure_dir_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("already");
    std::fs::create_dir(&dir).unwrap();
    ensure_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_os_fs_read_dir_lists_every_child() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("a.spec"), "").unwrap();
    std::fs::create_dir(tmp.path().join("sub")).unwrap();
    let mut children = OsFs.read_dir(tmp.path()).unwrap();
    children.sort();
    assert_eq!(
        children,
        vec![tmp.path().join("a.spec"), tmp.path().join("sub")]
    );
}

#[cfg(unix)]
#[test]
fn test_os_fs_read_dir_keeps_siblings_of_unreadable_entry() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let locked = tmp.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::write(tmp.path().join("first.spec"), "").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    let children = OsFs.read_dir(tmp.path());

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    let children = children.unwrap();
    assert!(children.contains(&tmp.path().join("first.spec")));
    assert!(children.contains(&locked));
}

#[test]
fn test_os_fs_read_dir_missing_is_error() {
    let tmp = TempDir::new().unwrap();
    assert!(OsFs.read_dir(&tmp.path().join("nope")).is_err());
}
