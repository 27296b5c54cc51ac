use snaplink::domain::entities::ShortUrlRecord;
use snaplink::domain::repositories::{CreateOutcome, UrlRepository};
use snaplink::infrastructure::persistence::FileUrlRepository;
use tempfile::tempdir;

#[tokio::test]
async fn test_open_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    let repo = FileUrlRepository::open(&path).await.unwrap();
    assert!(repo.get_original_url("anything").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mapping_survives_close_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    {
        let repo = FileUrlRepository::open(&path).await.unwrap();
        repo.create(ShortUrlRecord::new("abc12345", "https://example.com/"))
            .await
            .unwrap();
        repo.close().await.unwrap();
    }

    let reopened = FileUrlRepository::open(&path).await.unwrap();
    assert_eq!(
        reopened
            .get_original_url("abc12345")
            .await
            .unwrap()
            .as_deref(),
        Some("https://example.com/")
    );
}

#[tokio::test]
async fn test_duplicate_detection_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    {
        let repo = FileUrlRepository::open(&path).await.unwrap();
        repo.create(ShortUrlRecord::new("first123", "https://example.com/"))
            .await
            .unwrap();
        repo.close().await.unwrap();
    }

    let reopened = FileUrlRepository::open(&path).await.unwrap();
    let outcome = reopened
        .create(ShortUrlRecord::new("second45", "https://example.com/"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CreateOutcome::Duplicate {
            code: "first123".to_string()
        }
    );
}

#[tokio::test]
async fn test_batch_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    {
        let repo = FileUrlRepository::open(&path).await.unwrap();
        repo.create_batch(vec![
            ShortUrlRecord::new("aaaa1111", "https://a.test/"),
            ShortUrlRecord::new("bbbb2222", "https://b.test/"),
        ])
        .await
        .unwrap();
        // No explicit close: every mutation already rewrote the snapshot.
    }

    let reopened = FileUrlRepository::open(&path).await.unwrap();
    assert_eq!(
        reopened
            .get_original_url("aaaa1111")
            .await
            .unwrap()
            .as_deref(),
        Some("https://a.test/")
    );
    assert_eq!(
        reopened
            .get_original_url("bbbb2222")
            .await
            .unwrap()
            .as_deref(),
        Some("https://b.test/")
    );
}

#[tokio::test]
async fn test_failed_batch_leaves_snapshot_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    {
        let repo = FileUrlRepository::open(&path).await.unwrap();
        repo.create(ShortUrlRecord::new("taken123", "https://existing.test/"))
            .await
            .unwrap();

        let err = repo
            .create_batch(vec![
                ShortUrlRecord::new("fresh111", "https://a.test/"),
                ShortUrlRecord::new("taken123", "https://b.test/"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, snaplink::AppError::Conflict { .. }));
    }

    let reopened = FileUrlRepository::open(&path).await.unwrap();
    assert!(reopened.get_original_url("fresh111").await.unwrap().is_none());
    assert_eq!(
        reopened
            .get_original_url("taken123")
            .await
            .unwrap()
            .as_deref(),
        Some("https://existing.test/")
    );
}

#[tokio::test]
async fn test_corrupt_snapshot_fails_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    tokio::fs::write(&path, b"{ not json").await.unwrap();

    let err = FileUrlRepository::open(&path).await.unwrap_err();
    assert!(matches!(err, snaplink::AppError::Unavailable { .. }));
}

#[tokio::test]
async fn test_unknown_snapshot_version_fails_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    tokio::fs::write(&path, br#"{"version": 99, "records": []}"#)
        .await
        .unwrap();

    let err = FileUrlRepository::open(&path).await.unwrap_err();
    assert!(matches!(err, snaplink::AppError::Unavailable { .. }));
}
