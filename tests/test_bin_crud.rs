//! Integration tests for bin record CRUD, fill-level updates, fleet
//! statistics, and the notification token registry.

mod common;

use binwatch::core::db::{BinDb, BinRepository, BinUpdate, NewBin, NotifyTokenRepository};
use common::create_test_db;

fn test_bin(location: &str) -> NewBin {
    NewBin {
        location: location.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_add_and_retrieve_bin() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let bin = db.add_bin(test_bin("Lobby")).await?;
    assert!(!bin.id.is_empty());
    assert_eq!(bin.location, "Lobby");
    assert_eq!(bin.bin_type, "General");
    assert_eq!(bin.capacity, 100);
    assert_eq!(bin.fill_level, 0);

    let fetched = db.get_bin(&bin.id).await?.expect("bin should exist");
    assert_eq!(fetched.id, bin.id);
    assert_eq!(fetched.location, "Lobby");

    let all = db.get_bins().await?;
    assert_eq!(all.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_get_missing_bin_is_none() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    assert!(db.get_bin("no-such-id").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_bin_metadata() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let bin = db.add_bin(test_bin("Kitchen")).await?;

    let updated = db
        .update_bin(
            &bin.id,
            &BinUpdate {
                location: Some("Kitchen 2F".to_string()),
                capacity: Some(240),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.location, "Kitchen 2F");
    assert_eq!(updated.capacity, 240);
    // Untouched fields carry over
    assert_eq!(updated.bin_type, "General");
    assert_eq!(updated.fill_level, 0);

    let refetched = db.get_bin(&bin.id).await?.unwrap();
    assert_eq!(refetched.location, "Kitchen 2F");

    Ok(())
}

#[tokio::test]
async fn test_update_fill_level_stamps_timestamp() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let bin = db.add_bin(test_bin("Dock")).await?;

    db.update_fill_level(&bin.id, 73).await?;

    let updated = db.get_bin(&bin.id).await?.unwrap();
    assert_eq!(updated.fill_level, 73);
    assert!(updated.last_updated >= bin.last_updated);

    // Unknown bins are an error, not a silent no-op
    assert!(db.update_fill_level("no-such-id", 10).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_delete_bin() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let bin = db.add_bin(test_bin("Yard")).await?;

    db.delete_bin(&bin.id).await?;
    assert!(db.get_bin(&bin.id).await?.is_none());
    assert_eq!(db.get_bins().await?.len(), 0);

    assert!(db.delete_bin(&bin.id).await.is_err(), "double delete should fail");

    Ok(())
}

#[tokio::test]
async fn test_statistics_bucket_boundaries() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    for (location, level) in [("a", 95), ("b", 80), ("c", 79), ("d", 50), ("e", 0)] {
        let bin = db.add_bin(test_bin(location)).await?;
        db.update_fill_level(&bin.id, level).await?;
    }

    let stats = db.bin_statistics().await?;
    assert_eq!(stats.total, 5);
    assert_eq!(stats.full, 2); // 95 and 80
    assert_eq!(stats.half, 2); // 79 and 50
    assert_eq!(stats.empty, 1);

    Ok(())
}

#[tokio::test]
async fn test_bins_persist_across_reopen() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("persist.db");

    let bin_id = {
        let db = BinDb::new(&db_path).await?;
        let bin = db.add_bin(test_bin("Persistent")).await?;
        db.update_fill_level(&bin.id, 42).await?;
        bin.id
    };

    let db = BinDb::new(&db_path).await?;
    let bin = db.get_bin(&bin_id).await?.expect("bin should survive reopen");
    assert_eq!(bin.location, "Persistent");
    assert_eq!(bin.fill_level, 42);

    Ok(())
}

#[tokio::test]
async fn test_notify_token_roundtrip() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    assert!(db.get_token("admin").await?.is_none());

    db.save_token("admin", "token-1").await?;
    assert_eq!(db.get_token("admin").await?.as_deref(), Some("token-1"));

    // Saving again replaces the previous token
    db.save_token("admin", "token-2").await?;
    assert_eq!(db.get_token("admin").await?.as_deref(), Some("token-2"));

    Ok(())
}
