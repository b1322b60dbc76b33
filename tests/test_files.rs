//! Tests for the static file handler

use relay_http::http::request::{Method, RequestBuilder};
use relay_http::http::response::StatusCode;
use relay_http::routes::{FileError, StaticFiles};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "relay-http-files-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_resolve_joins_name_onto_base() {
    let files = StaticFiles::new(Some(PathBuf::from("/srv/data")));

    assert_eq!(files.resolve("a.txt").unwrap(), PathBuf::from("/srv/data/a.txt"));
    assert_eq!(files.resolve("sub/b.txt").unwrap(), PathBuf::from("/srv/data/sub/b.txt"));
    assert_eq!(files.resolve("./c.txt").unwrap(), PathBuf::from("/srv/data/c.txt"));
}

#[test]
fn test_resolve_rejects_traversal() {
    let files = StaticFiles::new(Some(PathBuf::from("/srv/data")));

    for name in ["../etc/passwd", "a/../../b", "..", "/etc/passwd", "", "."] {
        assert!(
            matches!(files.resolve(name), Err(FileError::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn test_resolve_without_base_dir() {
    let files = StaticFiles::disabled();

    assert!(files.base_dir().is_none());
    assert!(matches!(files.resolve("a.txt"), Err(FileError::NotConfigured)));
}

#[test]
fn test_file_error_status() {
    assert_eq!(FileError::NotConfigured.status(), StatusCode::NotFound);
    assert_eq!(FileError::InvalidName("..".into()).status(), StatusCode::NotFound);
    assert_eq!(FileError::NotFound(PathBuf::from("x")).status(), StatusCode::NotFound);
    let storage = FileError::Storage {
        path: PathBuf::from("x"),
        source: std::io::Error::other("disk full"),
    };
    assert_eq!(storage.status(), StatusCode::InternalServerError);
}

#[tokio::test]
async fn test_read_existing_file() {
    let dir = scratch_dir();
    std::fs::write(dir.join("a.txt"), b"hello").unwrap();
    let files = StaticFiles::new(Some(dir.clone()));

    assert_eq!(files.read("a.txt").await.unwrap(), b"hello".to_vec());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_read_missing_file_and_directory_are_not_found() {
    let dir = scratch_dir();
    std::fs::create_dir(dir.join("nested")).unwrap();
    let files = StaticFiles::new(Some(dir.clone()));

    assert!(matches!(files.read("missing.txt").await, Err(FileError::NotFound(_))));
    assert!(matches!(files.read("nested").await, Err(FileError::NotFound(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_write_creates_and_truncates() {
    let dir = scratch_dir();
    let files = StaticFiles::new(Some(dir.clone()));

    files.write("new.txt", b"a longer first version").await.unwrap();
    files.write("new.txt", b"short").await.unwrap();

    assert_eq!(std::fs::read(dir.join("new.txt")).unwrap(), b"short".to_vec());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_write_sets_owner_read_write() {
    use std::os::unix::fs::PermissionsExt;

    let dir = scratch_dir();
    let files = StaticFiles::new(Some(dir.clone()));
    files.write("perm.txt", b"x").await.unwrap();

    let mode = std::fs::metadata(dir.join("perm.txt")).unwrap().permissions().mode();
    assert_eq!(mode & 0o600, 0o600);
    assert_eq!(mode & 0o111, 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_write_into_missing_subdirectory_is_storage_failure() {
    let dir = scratch_dir();
    let files = StaticFiles::new(Some(dir.clone()));

    let result = files.write("no/such/dir.txt", b"x").await;
    assert!(matches!(result, Err(FileError::Storage { .. })));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_serve_write_then_read() {
    let dir = scratch_dir();
    let files = StaticFiles::new(Some(dir.clone()));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/new.txt")
        .header("Content-Length", "5")
        .body(b"hello".to_vec())
        .build()
        .unwrap();
    let created = files.serve_write(&post, "new.txt").await;
    assert_eq!(created.status, StatusCode::Created);
    assert!(created.body().is_empty());

    let get = RequestBuilder::new()
        .method(Method::GET)
        .path("/files/new.txt")
        .build()
        .unwrap();
    let read = files.serve_read(&get, "new.txt").await;
    assert_eq!(read.status, StatusCode::Ok);
    assert_eq!(read.content_type.as_deref(), Some("application/octet-stream"));
    assert_eq!(read.body(), b"hello");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_serve_write_storage_failure_is_500() {
    let dir = scratch_dir();
    let files = StaticFiles::new(Some(dir.clone()));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/missing/x.txt")
        .body(b"x".to_vec())
        .build()
        .unwrap();
    let response = files.serve_write(&post, "missing/x.txt").await;
    assert_eq!(response.status, StatusCode::InternalServerError);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_serve_without_base_dir_is_404_for_both_modes() {
    let files = StaticFiles::disabled();
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a.txt")
        .build()
        .unwrap();

    assert_eq!(files.serve_read(&req, "a.txt").await.status, StatusCode::NotFound);
    assert_eq!(files.serve_write(&req, "a.txt").await.status, StatusCode::NotFound);
}
