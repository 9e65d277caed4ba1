// crates/cache-guard/tests/infrastructure/stampede_guard_it.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use cache_guard::application::stampede_guard::GuardConfig;
use cache_guard::domain::repositories::KeyValueStore;
use cache_guard::domain::value_objects::CacheKey;
use cache_guard::errors::CacheError;
use cache_guard::infrastructure::bootstrap::connect_stampede_guard;
use cache_guard::infrastructure::redis::factories::RedisConfig;

use crate::common::{setup_guarded_redis, setup_redis_test_cache};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Timeline {
    user_id: u64,
    posts: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("timeline service unavailable")]
struct TimelineDown;

fn timeline() -> Timeline {
    Timeline {
        user_id: 42,
        posts: vec!["hello".to_string(), "world".to_string()],
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_guarded_fetch_populates_both_tiers_on_redis() {
    let config = GuardConfig::default().with_cache_ttl(Duration::from_secs(30));
    let ctx = setup_guarded_redis(config).await;
    let guard = ctx.guard();
    assert_eq!(ctx.guard_config(), config);
    assert_eq!(guard.config(), &config);
    let key = CacheKey::compose("gw", ["timeline", "42"]).unwrap();

    let value: Timeline = guard
        .fetch(&key, || async { Ok::<_, TimelineDown>(timeline()) })
        .await
        .unwrap();

    assert_eq!(value, timeline());

    let store = ctx.store();
    assert!(store.get(key.as_str()).await.unwrap().is_some());
    assert!(store.get(&key.slow_tier()).await.unwrap().is_some());
    assert!(store.get(&key.lock()).await.unwrap().is_none());

    // Second appel servi par le tier rapide
    let calls = AtomicUsize::new(0);
    let again: Timeline = guard
        .fetch(&key, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, TimelineDown>(timeline())
        })
        .await
        .unwrap();
    assert_eq!(again, timeline());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_loader_failure_leaves_redis_untouched() {
    let ctx = setup_redis_test_cache().await;
    let guard = ctx.guard();
    let key = CacheKey::compose("gw", ["timeline", "7"]).unwrap();

    let result: Result<Timeline, CacheError> = guard
        .fetch(&key, || async { Err(TimelineDown) })
        .await;

    assert!(matches!(result, Err(CacheError::Loader { .. })));

    let store = ctx.store();
    assert!(store.get(key.as_str()).await.unwrap().is_none());
    assert!(store.get(&key.slow_tier()).await.unwrap().is_none());
    assert!(store.get(&key.lock()).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires docker"]
async fn test_hot_key_expiry_triggers_a_single_refresh_across_callers() {
    const CALLERS: usize = 20;
    let ctx = setup_redis_test_cache().await;
    let key = CacheKey::compose("gw", ["timeline", "hot"]).unwrap();

    // Tier rapide expiré, tier lent encore chaud
    ctx.store()
        .put(&key.slow_tier(), &serde_json::to_vec(&timeline()).unwrap(), Duration::from_secs(60))
        .await
        .unwrap();

    let guard = Arc::new(ctx.guard());
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(tokio::sync::Barrier::new(CALLERS));

    let tasks = (0..CALLERS).map(|_| {
        let guard = guard.clone();
        let calls = calls.clone();
        let barrier = barrier.clone();
        let key = key.clone();
        tokio::spawn(async move {
            barrier.wait().await;
            guard
                .fetch(&key, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Ok::<_, TimelineDown>(timeline())
                })
                .await
        })
    });

    for result in futures::future::join_all(tasks).await {
        assert_eq!(result.unwrap().unwrap(), timeline());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_invalidate_clears_both_tiers_on_redis() {
    let ctx = setup_redis_test_cache().await;
    let guard = ctx.guard();
    let key = CacheKey::compose("gw", ["timeline", "9"]).unwrap();

    let _: Timeline = guard
        .fetch(&key, || async { Ok::<_, TimelineDown>(timeline()) })
        .await
        .unwrap();

    assert_eq!(guard.invalidate(&[key.clone()]).await.unwrap(), 2);
    assert!(ctx.store().get(key.as_str()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_bootstrap_wires_guard_from_config() {
    let ctx = setup_redis_test_cache().await;
    let redis = RedisConfig {
        url: ctx.url(),
        max_clients: 2,
        ..RedisConfig::default()
    };

    let guard = connect_stampede_guard(&redis, GuardConfig::default()).await.unwrap();
    let key = CacheKey::compose("gw", ["timeline", "boot"]).unwrap();

    let value: Timeline = guard
        .fetch(&key, || async { Ok::<_, TimelineDown>(timeline()) })
        .await
        .unwrap();

    assert_eq!(value, timeline());
    assert!(ctx.store().get(&key.slow_tier()).await.unwrap().is_some());
}
