use catalog_admin_api::storage::{LocalObjectStore, ObjectStore, StorageError};
use uuid::Uuid;

#[tokio::test]
async fn local_store_writes_resolves_and_removes_files() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("catalog-media-{}", Uuid::new_v4()));
    let store = LocalObjectStore::open(&root, "http://localhost:3000/media/").await?;
    assert!(root.is_dir());

    store.put("P1-1-abcd1234.png", vec![7, 8, 9], "image/png").await?;
    assert_eq!(tokio::fs::read(root.join("P1-1-abcd1234.png")).await?, vec![7, 8, 9]);
    assert_eq!(
        store.public_url("P1-1-abcd1234.png"),
        "http://localhost:3000/media/P1-1-abcd1234.png"
    );

    store.remove(&["P1-1-abcd1234.png".to_string()]).await?;
    assert!(!root.join("P1-1-abcd1234.png").exists());

    let err = store
        .remove(&["P1-1-abcd1234.png".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}

#[tokio::test]
async fn local_store_refuses_keys_outside_its_directory() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("catalog-media-{}", Uuid::new_v4()));
    let store = LocalObjectStore::open(&root, "http://localhost:3000/media").await?;

    for key in ["../escape.png", "nested/a.png", ".hidden", "..", ""] {
        let err = store.put(key, vec![1], "image/png").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
    }
    let err = store.remove(&["../escape.png".to_string()]).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));

    let mut entries = tokio::fs::read_dir(&root).await?;
    assert!(entries.next_entry().await?.is_none());

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}
