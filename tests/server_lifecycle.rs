use snaplink::config::{Config, StorageBackend};
use tempfile::tempdir;

#[tokio::test]
async fn test_failed_bind_still_flushes_file_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    // Occupy a port so the server cannot bind it.
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap();

    let config = Config {
        listen_addr: addr.to_string(),
        base_url: "http://localhost:8080".to_string(),
        backend: StorageBackend::File { path: path.clone() },
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 10,
        db_connect_timeout: 30,
    };

    let err = snaplink::server::run(config).await.unwrap_err();
    assert!(err.to_string().contains("Failed to bind"));

    // The store was still closed on the error path: the final flush wrote
    // the snapshot file.
    assert!(tokio::fs::metadata(&path).await.is_ok());
}
