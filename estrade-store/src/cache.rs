//! Cache primitives shared by every store
//!
//! A [`CacheSlot`] holds one value together with its load lifecycle; a
//! [`KeyedCache`] holds one slot per key. Slots stamp every load with a
//! generation so that of two overlapping loads only the latest-issued
//! outcome is ever written back.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Load lifecycle of a cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Nothing loaded yet
    Idle,
    /// A load is in flight
    Loading,
    /// Holds the latest known server state
    Fresh,
    /// Holds a value, but the last load failed or it was invalidated
    Stale,
}

/// Value and bookkeeping held by a slot
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: Option<T>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub status: CacheStatus,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
            status: CacheStatus::Idle,
        }
    }
}

/// Single cached value with stale-response protection
///
/// `issued` counts the loads ever started on this slot. A finished load is
/// applied only when its own generation still equals `issued`, so a slow
/// response cannot overwrite the result of a load issued after it. Local
/// writes (`set`, `mutate`, `clear`) also bump the counter and therefore
/// win over any load still in flight.
pub struct CacheSlot<T> {
    entry: RwLock<CacheEntry<T>>,
    issued: AtomicU64,
}

impl<T: Clone> CacheSlot<T> {
    pub fn new() -> Self {
        Self {
            entry: RwLock::new(CacheEntry::default()),
            issued: AtomicU64::new(0),
        }
    }

    /// Cached value, fresh or stale
    pub async fn value(&self) -> Option<T> {
        self.entry.read().await.value.clone()
    }

    pub async fn status(&self) -> CacheStatus {
        self.entry.read().await.status
    }

    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.fetched_at
    }

    pub async fn is_fresh(&self) -> bool {
        self.entry.read().await.status == CacheStatus::Fresh
    }

    /// Return the cached value, fetching when empty, stale or forced
    ///
    /// On success the slot turns `Fresh`; on failure it keeps its previous
    /// value and turns `Stale` (`Idle` when it never held one). The outcome
    /// is returned to the caller either way, but one belonging to an
    /// outdated generation is never written to the slot.
    pub async fn get_or_fetch<F, Fut, E>(&self, force_refresh: bool, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !force_refresh {
            let entry = self.entry.read().await;
            if entry.status == CacheStatus::Fresh {
                if let Some(value) = entry.value.clone() {
                    return Ok(value);
                }
            }
        }

        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.entry.write().await.status = CacheStatus::Loading;

        // No lock is held while the fetch runs.
        let outcome = fetch().await;

        let mut entry = self.entry.write().await;
        if self.issued.load(Ordering::SeqCst) != generation {
            return outcome;
        }
        match &outcome {
            Ok(value) => {
                entry.value = Some(value.clone());
                entry.fetched_at = Some(Utc::now());
                entry.status = CacheStatus::Fresh;
            }
            Err(_) => {
                entry.status = if entry.value.is_some() {
                    CacheStatus::Stale
                } else {
                    CacheStatus::Idle
                };
            }
        }
        outcome
    }

    /// Store a server-provided value directly, marking the slot fresh
    pub async fn set(&self, value: T) {
        self.issued.fetch_add(1, Ordering::SeqCst);
        let mut entry = self.entry.write().await;
        entry.value = Some(value);
        entry.fetched_at = Some(Utc::now());
        entry.status = CacheStatus::Fresh;
    }

    /// Patch the cached value in place; returns false when nothing is cached
    pub async fn mutate<F>(&self, patch: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut entry = self.entry.write().await;
        match entry.value.as_mut() {
            Some(value) => {
                self.issued.fetch_add(1, Ordering::SeqCst);
                patch(value);
                true
            }
            None => false,
        }
    }

    /// Keep the value but mark it stale so the next read refetches
    pub async fn invalidate(&self) {
        let mut entry = self.entry.write().await;
        if entry.status != CacheStatus::Idle {
            entry.status = CacheStatus::Stale;
        }
    }

    /// Drop the value and return to `Idle`
    pub async fn clear(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
        *self.entry.write().await = CacheEntry::default();
    }
}

impl<T: Clone> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-key collection of cache slots, created lazily on first access
pub struct KeyedCache<K: Eq + Hash, V> {
    slots: DashMap<K, Arc<CacheSlot<V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> KeyedCache<K, V> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Slot for the key, created idle when absent
    pub fn slot(&self, key: &K) -> Arc<CacheSlot<V>> {
        self.slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(CacheSlot::new()))
            .value()
            .clone()
    }

    /// Cached value for the key, if any
    pub async fn get(&self, key: &K) -> Option<V> {
        // Clone the slot out so no map guard is held across the await.
        let slot = self.slots.get(key).map(|entry| entry.value().clone());
        match slot {
            Some(slot) => slot.value().await,
            None => None,
        }
    }

    /// Patch the cached value for the key; returns false when absent
    pub async fn mutate<F>(&self, key: &K, patch: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let slot = self.slots.get(key).map(|entry| entry.value().clone());
        match slot {
            Some(slot) => slot.mutate(patch).await,
            None => false,
        }
    }

    /// Drop the slot for the key entirely
    pub fn remove(&self, key: &K) {
        self.slots.remove(key);
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_fetches_once_then_serves_from_cache() {
        let slot: CacheSlot<String> = CacheSlot::new();
        assert_eq!(slot.status().await, CacheStatus::Idle);

        let first = slot
            .get_or_fetch(false, || async { Ok::<_, String>("a".to_string()) })
            .await
            .unwrap();
        assert_eq!(first, "a");
        assert_eq!(slot.status().await, CacheStatus::Fresh);
        assert!(slot.fetched_at().await.is_some());

        // Fresh slot: the fetch closure must not run.
        let second = slot
            .get_or_fetch(false, || async { Err::<String, String>("fetch ran".into()) })
            .await
            .unwrap();
        assert_eq!(second, "a");

        // Forced: calls through and replaces the value.
        let third = slot
            .get_or_fetch(true, || async { Ok::<_, String>("b".to_string()) })
            .await
            .unwrap();
        assert_eq!(third, "b");
        assert_eq!(slot.value().await, Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_the_previous_value() {
        let slot: CacheSlot<i32> = CacheSlot::new();

        let err = slot
            .get_or_fetch(false, || async { Err::<i32, String>("boom".into()) })
            .await
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(slot.status().await, CacheStatus::Idle);
        assert_eq!(slot.value().await, None);

        slot.set(7).await;
        slot.get_or_fetch(true, || async { Err::<i32, String>("boom".into()) })
            .await
            .unwrap_err();
        assert_eq!(slot.status().await, CacheStatus::Stale);
        assert_eq!(slot.value().await, Some(7));
    }

    #[tokio::test]
    async fn test_invalidate_keeps_value_but_forces_refetch() {
        let slot: CacheSlot<i32> = CacheSlot::new();
        slot.set(1).await;
        slot.invalidate().await;
        assert_eq!(slot.status().await, CacheStatus::Stale);
        assert_eq!(slot.value().await, Some(1));

        let v = slot
            .get_or_fetch(false, || async { Ok::<_, String>(2) })
            .await
            .unwrap();
        assert_eq!(v, 2);
        assert_eq!(slot.status().await, CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn test_mutate_patches_only_loaded_values() {
        let slot: CacheSlot<Vec<i32>> = CacheSlot::new();
        assert!(!slot.mutate(|v| v.push(1)).await);

        slot.set(vec![1, 2]).await;
        assert!(slot.mutate(|v| v.push(3)).await);
        assert_eq!(slot.value().await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_outdated_generation_is_discarded() {
        let slot: Arc<CacheSlot<String>> = Arc::new(CacheSlot::new());

        let (started_a_tx, started_a_rx) = oneshot::channel::<()>();
        let (gate_a_tx, gate_a_rx) = oneshot::channel::<()>();
        let (started_b_tx, started_b_rx) = oneshot::channel::<()>();
        let (gate_b_tx, gate_b_rx) = oneshot::channel::<()>();

        let slot_a = slot.clone();
        let load_a = tokio::spawn(async move {
            slot_a
                .get_or_fetch(true, move || async move {
                    let _ = started_a_tx.send(());
                    let _ = gate_a_rx.await;
                    Ok::<_, String>("old".to_string())
                })
                .await
        });
        started_a_rx.await.unwrap();

        let slot_b = slot.clone();
        let load_b = tokio::spawn(async move {
            slot_b
                .get_or_fetch(true, move || async move {
                    let _ = started_b_tx.send(());
                    let _ = gate_b_rx.await;
                    Ok::<_, String>("new".to_string())
                })
                .await
        });
        started_b_rx.await.unwrap();

        // Finish the newer load first, then release the older one.
        gate_b_tx.send(()).unwrap();
        assert_eq!(load_b.await.unwrap().unwrap(), "new");

        gate_a_tx.send(()).unwrap();
        assert_eq!(load_a.await.unwrap().unwrap(), "old");

        // The slot kept the latest-issued outcome, not the last writer.
        assert_eq!(slot.value().await, Some("new".to_string()));
        assert_eq!(slot.status().await, CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn test_clear_outdates_inflight_loads() {
        let slot: Arc<CacheSlot<i32>> = Arc::new(CacheSlot::new());
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let (gate_tx, gate_rx) = oneshot::channel::<()>();

        let task_slot = slot.clone();
        let load = tokio::spawn(async move {
            task_slot
                .get_or_fetch(true, move || async move {
                    let _ = started_tx.send(());
                    let _ = gate_rx.await;
                    Ok::<_, String>(42)
                })
                .await
        });
        started_rx.await.unwrap();

        slot.clear().await;
        gate_tx.send(()).unwrap();
        assert_eq!(load.await.unwrap().unwrap(), 42);

        // The load finished after the clear; the slot must stay empty.
        assert_eq!(slot.value().await, None);
        assert_eq!(slot.status().await, CacheStatus::Idle);
    }

    #[tokio::test]
    async fn test_keyed_cache_slots_are_independent() {
        let cache: KeyedCache<i64, Vec<&'static str>> = KeyedCache::new();
        cache.slot(&1).set(vec!["a"]).await;
        cache.slot(&2).set(vec!["b"]).await;

        assert_eq!(cache.get(&1).await, Some(vec!["a"]));
        assert_eq!(cache.get(&2).await, Some(vec!["b"]));
        assert_eq!(cache.get(&3).await, None);
        assert_eq!(cache.len(), 2);

        assert!(cache.mutate(&1, |v| v.push("c")).await);
        assert_eq!(cache.get(&1).await, Some(vec!["a", "c"]));
        assert!(!cache.mutate(&3, |v| v.push("x")).await);

        cache.remove(&1);
        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
