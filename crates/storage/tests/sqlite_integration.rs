use storage::repository::NameStore;
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_name_store_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_names?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get_taker_name().await.unwrap(), None);

    repo.save_taker_name(Some("Ada")).await.unwrap();
    repo.save_taker_name(Some("Grace")).await.unwrap();
    assert_eq!(
        repo.get_taker_name().await.unwrap().as_deref(),
        Some("Grace")
    );

    repo.save_taker_name(None).await.unwrap();
    assert_eq!(repo.get_taker_name().await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.save_taker_name(Some("Lin")).await.unwrap();
    assert_eq!(repo.get_taker_name().await.unwrap().as_deref(), Some("Lin"));
}
