// crates/cache-guard/src/infrastructure/redis/repositories/redis_key_value_store.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::interfaces::{KeysInterface, LuaInterface, SetsInterface};
use fred::prelude::*;
use fred::types::{Builder, Expiration, SetOptions};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::domain::repositories::KeyValueStore;
use crate::domain::value_objects::Ttl;
use crate::errors::{CacheError, Result};
use crate::infrastructure::redis::factories::RedisConfig;

/// Compare-and-delete atomique côté Redis (relâchement du verrou par token)
const DELETE_IF_EQUALS_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

pub struct RedisKeyValueStore {
    pool: Pool,
    command_timeout: Duration,
    shutdown: CancellationToken,
}

impl RedisKeyValueStore {
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let fred_config = Config::from_url(&config.url).map_err(|e| CacheError::config(e.to_string()))?;
        let connection_timeout = config.connection_timeout;

        let pool = Builder::from_config(fred_config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = connection_timeout;
                cfg.internal_command_timeout = connection_timeout;
                // Une seule tentative : la politique de retry appartient à l'appelant
                cfg.max_command_attempts = 1;
            })
            // La reconnexion reste gérée par le transport
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(config.max_clients)
            .map_err(|e| CacheError::transport("CONNECT", &config.url, e))?;

        pool.init()
            .await
            .map_err(|e| CacheError::transport("CONNECT", &config.url, e))?;

        // On attend que TOUS les clients du pool soient connectés
        pool.wait_for_connect()
            .await
            .map_err(|e| CacheError::transport("CONNECT", &config.url, e))?;

        tracing::info!(max_clients = config.max_clients, "✅ Redis pool connected");

        Ok(Self {
            pool,
            command_timeout: config.command_timeout,
            shutdown: CancellationToken::new(),
        })
    }

    /// Interrompt toutes les commandes en vol puis ferme le pool
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if let Err(e) = self.pool.quit().await {
            tracing::warn!(error = %e, "Redis pool did not quit cleanly");
        }
    }

    fn map_expiration(ttl: Ttl) -> Expiration {
        let d = ttl.as_duration();
        if d < Duration::from_secs(1) || d.subsec_nanos() != 0 {
            Expiration::PX(ttl.as_store_millis())
        } else {
            Expiration::EX(i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        }
    }

    /// Exécute une commande avec timeout et annulation, en gardant le contexte de l'opération
    async fn run<T, E, Fut>(&self, operation: &'static str, key: &str, command: Fut) -> Result<T>
    where
        E: Display,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let outcome = tokio::select! {
            _ = self.shutdown.cancelled() => {
                return Err(CacheError::transport(operation, key, "store client is shutting down"));
            }
            outcome = tokio::time::timeout(self.command_timeout, command) => outcome,
        };

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(operation, key, error = %e, "Redis command failed");
                Err(CacheError::transport(operation, key, e))
            }
            Err(_) => {
                tracing::error!(operation, key, timeout = ?self.command_timeout, "Redis command timed out");
                Err(CacheError::transport(operation, key, "command timed out"))
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.run("GET", key, self.pool.get::<Option<Vec<u8>>, _>(key)).await
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let ttl = Ttl::try_new(ttl)?;

        self.run(
            "SET",
            key,
            self.pool
                .set::<(), _, _>(key, value.to_vec(), Some(Self::map_expiration(ttl)), None, false),
        )
        .await
    }

    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool> {
        let ttl = Ttl::try_new(ttl)?;

        // SET NX répond "OK" si la clé est créée, nil sinon
        let reply: Option<String> = self
            .run(
                "SET NX",
                key,
                self.pool.set::<Option<String>, _, _>(
                    key,
                    value.to_vec(),
                    Some(Self::map_expiration(ttl)),
                    Some(SetOptions::NX),
                    false,
                ),
            )
            .await?;

        Ok(reply.is_some())
    }

    async fn delete(&self, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let owned: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let label = keys.join(",");

        let removed: i64 = self.run("DEL", &label, self.pool.del::<i64, _>(owned)).await?;
        Ok(removed.max(0) as u64)
    }

    async fn delete_if_equals(&self, key: &str, expected: &[u8]) -> Result<bool> {
        let removed: i64 = self
            .run(
                "EVAL DEL IFEQ",
                key,
                self.pool
                    .eval::<i64, _, _, _>(DELETE_IF_EQUALS_SCRIPT, key, vec![expected.to_vec()]),
            )
            .await?;

        Ok(removed > 0)
    }

    async fn set_add(&self, key: &str, members: &[&str]) -> Result<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let added: i64 = self
            .run("SADD", key, self.pool.sadd::<i64, _, _>(key, members.to_vec()))
            .await?;
        Ok(added.max(0) as u64)
    }

    async fn set_remove(&self, key: &str, members: &[&str]) -> Result<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let removed: i64 = self
            .run("SREM", key, self.pool.srem::<i64, _, _>(key, members.to_vec()))
            .await?;
        Ok(removed.max(0) as u64)
    }

    async fn set_cardinality(&self, key: &str) -> Result<u64> {
        let count: i64 = self.run("SCARD", key, self.pool.scard::<i64, _>(key)).await?;
        Ok(count.max(0) as u64)
    }
}
