use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fcschool::config::Config;
use fcschool::domain::PlatformTarget;
use fcschool::server;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::util::ServiceExt; // for `oneshot`

const INDEX: &str = "<!doctype html><div id=\"root\"></div>";

// Helper to lay out a build output directory inside `root`
fn setup_dist(root: &Path) -> Config {
    let dist = root.join("dist");
    std::fs::create_dir_all(dist.join("assets/fonts")).unwrap();
    std::fs::write(dist.join("index.html"), INDEX).unwrap();
    std::fs::write(dist.join("assets/app.js"), "console.log('fc')").unwrap();
    std::fs::write(dist.join("assets/fonts/Inter-Regular.ttf"), [0u8, 1, 0, 0]).unwrap();
    // Outside the output directory, must never be served
    std::fs::write(root.join("secret.txt"), "DB_PASSWORD=hunter2").unwrap();

    Config {
        port: 0,
        dist_dir: dist,
        entry_document: "index.html".to_string(),
        target: PlatformTarget::Web,
        connectivity_probe: "127.0.0.1:9".to_string(),
        connectivity_interval: std::time::Duration::from_secs(30),
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn test_serves_existing_assets() {
    let root = tempfile::tempdir().unwrap();
    let app = server::build_router(&setup_dist(root.path()));

    let (status, body) = get(&app, "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('fc')");

    let req = Request::builder()
        .uri("/assets/fonts/Inter-Regular.ttf")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), &[0u8, 1, 0, 0]);
}

#[tokio::test]
async fn test_root_serves_entry_document() {
    let root = tempfile::tempdir().unwrap();
    let app = server::build_router(&setup_dist(root.path()));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_entry_document() {
    let root = tempfile::tempdir().unwrap();
    let app = server::build_router(&setup_dist(root.path()));

    for uri in ["/schedule", "/teams/u12/attendance", "/assets/missing.png"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "status for {}", uri);
        assert_eq!(body, INDEX, "body for {}", uri);
    }
}

#[tokio::test]
async fn test_never_serves_outside_output_directory() {
    let root = tempfile::tempdir().unwrap();
    let app = server::build_router(&setup_dist(root.path()));

    for uri in ["/../secret.txt", "/assets/../../secret.txt", "/%2e%2e/secret.txt"] {
        let (_, body) = get(&app, uri).await;
        assert!(!body.contains("hunter2"), "leaked file through {}", uri);
    }
}

#[tokio::test]
async fn test_start_server_binds_and_serves() {
    let root = tempfile::tempdir().unwrap();
    let config = setup_dist(root.path());
    let addr = server::start_server(&config).await.unwrap();
    assert_ne!(addr.port(), 0);

    let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", addr.port()))
        .await
        .unwrap();
    stream
        .write_all(b"GET /news/42 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let response = String::from_utf8_lossy(&raw);

    assert!(response.starts_with("HTTP/1.1 200"), "got: {}", response);
    assert!(response.contains(INDEX));
}
