//! PgCafeStore against a real Postgres.
//!
//! Skipped unless DATABASE_URL is set (e.g. via `.env`). Rows created here use
//! per-run unique names and are removed again at the end.

use cafe_api::{CafeStore, NewCafe, PgCafeStore, StoreError};
use std::time::{SystemTime, UNIX_EPOCH};

fn new_cafe(name: &str, location: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        map_url: "https://maps.example/pg".to_string(),
        img_url: "https://img.example/pg.jpg".to_string(),
        location: location.to_string(),
        seats: "0-10".to_string(),
        has_toilet: false,
        has_wifi: true,
        has_sockets: true,
        can_take_calls: false,
        coffee_price: Some("£2.20".to_string()),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_store_contract() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping postgres store test");
        return Ok(());
    };

    let store = PgCafeStore::connect(&database_url, 2).await?;
    store.ping().await?;

    let run = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let location = format!("pg-test-{}", run);

    let count_before = store.count().await?;
    let first = store
        .insert(new_cafe(&format!("pg-first-{}", run), &location))
        .await?;
    let second = store
        .insert(new_cafe(&format!("pg-second-{}", run), &location))
        .await?;
    assert!(second.id > first.id);
    assert_eq!(store.count().await?, count_before + 2);

    // Unique name.
    let dup = store
        .insert(new_cafe(&first.name, "elsewhere"))
        .await
        .unwrap_err();
    assert!(matches!(dup, StoreError::ConstraintViolation(_)));

    // Over-long values are rejected as invalid, not as a database failure.
    let too_long = store
        .update_price(first.id, Some("9".repeat(300)))
        .await
        .unwrap_err();
    assert!(matches!(too_long, StoreError::InvalidValue(_)));

    // Lowest id wins on a shared location.
    let found = store.find_by_location(&location).await?.unwrap();
    assert_eq!(found, first);

    store.update_price(second.id, None).await?;
    let updated = store.find_by_id(second.id).await?.unwrap();
    assert_eq!(updated.coffee_price, None);
    assert_eq!(updated.name, second.name);

    let all = store.list_all().await?;
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert!(all.iter().any(|c| c.id == second.id));

    store.delete(first.id).await?;
    store.delete(second.id).await?;
    assert!(matches!(
        store.delete(first.id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.update_price(first.id, Some("£1".to_string())).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(store.find_by_location(&location).await?.is_none());
    Ok(())
}
