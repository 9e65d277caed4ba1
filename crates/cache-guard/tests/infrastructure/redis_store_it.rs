// crates/cache-guard/tests/infrastructure/redis_store_it.rs

use std::time::Duration;
use cache_guard::domain::repositories::{DistributedLock, KeyValueStore};
use cache_guard::errors::CacheError;
use cache_guard::infrastructure::locking::StoreLock;
use cache_guard::infrastructure::redis::factories::RedisConfig;
use cache_guard::infrastructure::redis::repositories::RedisKeyValueStore;

use crate::common::setup_redis_test_cache;

#[tokio::test]
#[ignore = "requires docker"]
async fn test_put_get_round_trip_and_expiry() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();

    store.put("gw:it:k", b"{\"a\":1}", Duration::from_millis(200)).await.unwrap();
    assert_eq!(store.get("gw:it:k").await.unwrap(), Some(b"{\"a\":1}".to_vec()));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(store.get("gw:it:k").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_missing_key_is_none_not_error() {
    let ctx = setup_redis_test_cache().await;

    assert_eq!(ctx.store().get("gw:it:absent").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_zero_ttl_is_rejected_before_redis() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();

    let put = store.put("gw:it:k", b"v", Duration::ZERO).await;
    let nx = store.set_if_absent("gw:it:k", b"v", Duration::ZERO).await;

    assert!(matches!(put, Err(CacheError::Config { .. })));
    assert!(matches!(nx, Err(CacheError::Config { .. })));
    assert_eq!(store.get("gw:it:k").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_set_if_absent_elects_one_writer() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();

    let (a, b) = tokio::join!(
        store.set_if_absent("gw:it:lock", b"a", Duration::from_secs(5)),
        store.set_if_absent("gw:it:lock", b"b", Duration::from_secs(5)),
    );

    assert!(a.unwrap() ^ b.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_delete_if_equals_only_removes_matching_token() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();
    store.put("gw:it:lock", b"token-a", Duration::from_secs(5)).await.unwrap();

    assert!(!store.delete_if_equals("gw:it:lock", b"token-b").await.unwrap());
    assert!(store.get("gw:it:lock").await.unwrap().is_some());

    assert!(store.delete_if_equals("gw:it:lock", b"token-a").await.unwrap());
    assert!(store.get("gw:it:lock").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_bulk_delete_and_set_operations() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();

    store.put("gw:it:a", b"1", Duration::from_secs(5)).await.unwrap();
    store.put("gw:it:b", b"2", Duration::from_secs(5)).await.unwrap();
    assert_eq!(store.delete(&["gw:it:a", "gw:it:b", "gw:it:c"]).await.unwrap(), 2);

    assert_eq!(store.set_add("gw:it:online", &["u1", "u2", "u1"]).await.unwrap(), 2);
    assert_eq!(store.set_cardinality("gw:it:online").await.unwrap(), 2);
    assert_eq!(store.set_remove("gw:it:online", &["u1", "u9"]).await.unwrap(), 1);
    assert_eq!(store.set_cardinality("gw:it:online").await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_store_lock_round_trip_on_redis() {
    let ctx = setup_redis_test_cache().await;
    let lock = StoreLock::new(ctx.store());

    let lease = lock
        .try_acquire("gw:it:k:lock", Duration::from_secs(5))
        .await
        .unwrap()
        .into_lease()
        .expect("first caller should be elected");

    let second = lock.try_acquire("gw:it:k:lock", Duration::from_secs(5)).await.unwrap();
    assert!(!second.is_acquired());

    lock.release(lease).await.unwrap();
    let third = lock.try_acquire("gw:it:k:lock", Duration::from_secs(5)).await.unwrap();
    assert!(third.is_acquired());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_commands_fail_after_shutdown() {
    let ctx = setup_redis_test_cache().await;
    let store = ctx.store();

    store.shutdown().await;

    let result = store.get("gw:it:k").await;
    assert!(result.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_unreachable_redis_is_transport_error() {
    // Port fermé : la connexion échoue sans docker
    let config = RedisConfig {
        url: "redis://127.0.0.1:1".to_string(),
        connection_timeout: Duration::from_millis(200),
        command_timeout: Duration::from_millis(200),
        ..RedisConfig::default()
    };

    let result = tokio::time::timeout(Duration::from_secs(5), RedisKeyValueStore::new(&config)).await;
    match result {
        Ok(Ok(_)) => panic!("store should not connect to a closed port"),
        Ok(Err(e)) => assert!(e.is_transport()),
        Err(_) => {}
    }
}
