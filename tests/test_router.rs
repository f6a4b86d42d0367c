use std::io::Read;

use flate2::read::GzDecoder;
use tinyhttp::config::Config;
use tinyhttp::files::FileStore;
use tinyhttp::http::request::{Method, RequestBuilder};
use tinyhttp::http::response::StatusCode;
use tinyhttp::router::Router;

fn get(path: &str) -> RequestBuilder {
    RequestBuilder::new().method(Method::GET).path(path)
}

#[tokio::test]
async fn test_root() {
    let resp = Router::default().handle(&get("/").build().unwrap()).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert!(!resp.has_header_block());
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_user_agent() {
    let req = get("/user-agent")
        .header("User-Agent", "test-client/1.0")
        .build()
        .unwrap();
    let resp = Router::default().handle(&req).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header.content_type, "text/plain");
    assert_eq!(resp.body, b"test-client/1.0");
}

#[tokio::test]
async fn test_user_agent_missing_header() {
    let resp = Router::default().handle(&get("/user-agent").build().unwrap()).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header.content_length, 0);
}

#[tokio::test]
async fn test_echo() {
    let resp = Router::default().handle(&get("/echo/abc").build().unwrap()).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header.content_type, "text/plain");
    assert_eq!(resp.header.content_encoding, "");
    assert_eq!(resp.body, b"abc");
}

#[tokio::test]
async fn test_echo_gzip() {
    let req = get("/echo/hello")
        .header("Accept-Encoding", "encoding-1, gzip, encoding-2")
        .build()
        .unwrap();
    let resp = Router::default().handle(&req).await;

    assert_eq!(resp.header.content_encoding, "gzip");
    assert_eq!(resp.header.content_length, resp.body.len());

    let mut decoded = String::new();
    GzDecoder::new(&resp.body[..]).read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, "hello");
}

#[tokio::test]
async fn test_echo_gzip_space_separated_accept() {
    let req = get("/echo/abc")
        .header("Accept-Encoding", "deflate gzip")
        .build()
        .unwrap();
    let resp = Router::default().handle(&req).await;

    assert_eq!(resp.header.content_encoding, "gzip");
    assert_ne!(resp.body, b"abc");

    let mut decoded = String::new();
    GzDecoder::new(&resp.body[..]).read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, "abc");
}

#[tokio::test]
async fn test_unknown_routes() {
    let router = Router::default();
    for path in ["/nonexistent", "/echo", "/foo/bar", "/echo/a/b", "/files/a/b"] {
        let resp = router.handle(&get(path).build().unwrap()).await;
        assert_eq!(resp.status, StatusCode::NotFound, "{path}");
        assert!(!resp.has_header_block(), "{path}");
    }
}

#[tokio::test]
async fn test_files_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(FileStore::new(Some(dir.path().to_path_buf())));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/data.bin")
        .body(b"\x01binary\xffdata".to_vec())
        .build()
        .unwrap();
    let resp = router.handle(&post).await;
    assert_eq!(resp.status, StatusCode::Created);
    assert_eq!(resp.body, b"\x01binary\xffdata");

    let first = router.handle(&get("/files/data.bin").build().unwrap()).await;
    let second = router.handle(&get("/files/data.bin").build().unwrap()).await;
    assert_eq!(first.status, StatusCode::Ok);
    assert_eq!(first.header.content_type, "application/octet-stream");
    assert_eq!(first.body, b"\x01binary\xffdata");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_files_without_directory() {
    let resp = Router::default().handle(&get("/files/x").build().unwrap()).await;
    assert_eq!(resp.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_files_missing() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(FileStore::new(Some(dir.path().to_path_buf())));

    let resp = router.handle(&get("/files/missing.txt").build().unwrap()).await;
    assert_eq!(resp.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_close_decision_on_every_status() {
    let router = Router::default();

    let ok = get("/echo/x").header("Connection", "close").build().unwrap();
    assert!(router.handle(&ok).await.header.close_connection);

    let missing = get("/nope").header("Connection", "close").build().unwrap();
    assert!(router.handle(&missing).await.header.close_connection);

    let keep = get("/echo/x").build().unwrap();
    assert!(!router.handle(&keep).await.header.close_connection);
}

#[test]
fn test_router_from_config_uses_directory() {
    let cfg = Config::from_yaml_str("directory: /srv/files\n").unwrap();
    let router = Router::from_config(&cfg);
    assert_eq!(router.files().root(), Some(std::path::Path::new("/srv/files")));

    assert_eq!(Router::from_config(&Config::default()).files().root(), None);
}
