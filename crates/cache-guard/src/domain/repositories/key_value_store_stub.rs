// crates/cache-guard/src/domain/repositories/key_value_store_stub.rs

use crate::domain::repositories::KeyValueStore;
use crate::domain::value_objects::Ttl;
use crate::errors::{CacheError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum StoredValue {
    Bytes(Vec<u8>),
    Set(HashSet<String>),
}

#[derive(Debug, Clone)]
struct Slot {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl Slot {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Store en mémoire, fidèle au contrat du port (expiration passive, SET NX atomique).
/// Sert de fake déterministe pour les tests du guard et de backend local.
#[derive(Default)]
pub struct KeyValueStoreStub {
    storage: Mutex<HashMap<String, Slot>>,
    fail_all: AtomicBool,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    pub set_if_absent_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl KeyValueStoreStub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simule un Redis injoignable : toutes les opérations renvoient une TransportError
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Écrit directement sans ttl ni compteur (seed de tests)
    pub fn seed(&self, key: &str, value: &[u8]) {
        self.storage().insert(
            key.to_string(),
            Slot {
                value: StoredValue::Bytes(value.to_vec()),
                expires_at: None,
            },
        );
    }

    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.storage().get(key).is_some_and(|slot| slot.is_live(now))
    }

    /// TTL restant d'une clé vivante
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.storage()
            .get(key)
            .filter(|slot| slot.is_live(now))
            .and_then(|slot| slot.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Un test qui panique en tenant le verrou ne doit pas empoisonner les suivants
        self.storage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self, operation: &'static str, key: &str) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(CacheError::transport(operation, key, "Cache Down"));
        }
        Ok(())
    }

    fn live_set<'a>(map: &'a mut HashMap<String, Slot>, key: &str, now: Instant) -> Result<Option<&'a mut HashSet<String>>> {
        match map.get_mut(key) {
            Some(slot) if slot.is_live(now) => match &mut slot.value {
                StoredValue::Set(set) => Ok(Some(set)),
                StoredValue::Bytes(_) => Err(CacheError::transport(
                    "SET",
                    key,
                    "WRONGTYPE Operation against a key holding the wrong kind of value",
                )),
            },
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl KeyValueStore for KeyValueStoreStub {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("GET", key)?;

        let now = Instant::now();
        let mut map = self.storage();
        // Expiration passive : la clé morte disparaît à la lecture
        if map.get(key).is_some_and(|slot| !slot.is_live(now)) {
            map.remove(key);
            return Ok(None);
        }

        match map.get(key).map(|slot| &slot.value) {
            Some(StoredValue::Bytes(bytes)) => Ok(Some(bytes.clone())),
            Some(StoredValue::Set(_)) => Err(CacheError::transport(
                "GET",
                key,
                "WRONGTYPE Operation against a key holding the wrong kind of value",
            )),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let ttl = Ttl::try_new(ttl)?;
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("SET", key)?;

        self.storage().insert(
            key.to_string(),
            Slot {
                value: StoredValue::Bytes(value.to_vec()),
                expires_at: Some(Instant::now() + ttl.as_duration()),
            },
        );
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool> {
        let ttl = Ttl::try_new(ttl)?;
        self.set_if_absent_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("SET NX", key)?;

        // Check-and-insert sous le même verrou : équivalent du SET NX atomique
        let now = Instant::now();
        let mut map = self.storage();
        if map.get(key).is_some_and(|slot| slot.is_live(now)) {
            return Ok(false);
        }
        map.insert(
            key.to_string(),
            Slot {
                value: StoredValue::Bytes(value.to_vec()),
                expires_at: Some(now + ttl.as_duration()),
            },
        );
        Ok(true)
    }

    async fn delete(&self, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("DEL", keys[0])?;

        let now = Instant::now();
        let mut map = self.storage();
        let removed = keys
            .iter()
            .filter_map(|key| map.remove(*key))
            .filter(|slot| slot.is_live(now))
            .count();
        Ok(removed as u64)
    }

    async fn delete_if_equals(&self, key: &str, expected: &[u8]) -> Result<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available("DEL IFEQ", key)?;

        let now = Instant::now();
        let mut map = self.storage();
        let matches = match map.get(key) {
            Some(slot) if slot.is_live(now) => {
                matches!(&slot.value, StoredValue::Bytes(bytes) if bytes.as_slice() == expected)
            }
            _ => false,
        };
        if matches {
            map.remove(key);
        }
        Ok(matches)
    }

    async fn set_add(&self, key: &str, members: &[&str]) -> Result<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        self.check_available("SADD", key)?;

        let now = Instant::now();
        let mut map = self.storage();
        if Self::live_set(&mut map, key, now)?.is_none() {
            map.insert(
                key.to_string(),
                Slot {
                    value: StoredValue::Set(HashSet::new()),
                    expires_at: None,
                },
            );
        }
        let added = match Self::live_set(&mut map, key, now)? {
            Some(set) => members.iter().filter(|m| set.insert(m.to_string())).count(),
            None => 0,
        };
        Ok(added as u64)
    }

    async fn set_remove(&self, key: &str, members: &[&str]) -> Result<u64> {
        self.check_available("SREM", key)?;

        let now = Instant::now();
        let mut map = self.storage();
        let removed = match Self::live_set(&mut map, key, now)? {
            Some(set) => members.iter().filter(|m| set.remove(**m)).count(),
            None => 0,
        };
        Ok(removed as u64)
    }

    async fn set_cardinality(&self, key: &str) -> Result<u64> {
        self.check_available("SCARD", key)?;

        let now = Instant::now();
        let mut map = self.storage();
        Ok(Self::live_set(&mut map, key, now)?.map_or(0, |set| set.len() as u64))
    }
}
