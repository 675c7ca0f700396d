//! In-memory result cache with time-based expiry
//!
//! A [`ResultCache`] is constructed once and handed to whoever needs
//! memoized lookups. Entries are fresh while `now - inserted_at < ttl`;
//! stale entries are treated as absent, recomputed on demand, and
//! reclaimed whenever a new slot is inserted. All insertion goes
//! through [`ResultCache::get_or_compute`] (or its fallible sibling), and
//! concurrent callers asking for the same key share one in-flight
//! computation.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

/// Default time-to-live for cached lookups
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Time source for expiry decisions
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        self.origin + *offset
    }
}

struct Stamped<V> {
    value: V,
    inserted_at: Instant,
}

struct Slot<V> {
    cell: OnceCell<Stamped<V>>,
}

impl<V> Slot<V> {
    fn empty() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// An in-flight slot is never stale
    fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        self.cell
            .get()
            .is_some_and(|stamped| now.saturating_duration_since(stamped.inserted_at) >= ttl)
    }
}

/// Memoizes values per key for a fixed time-to-live
pub struct ResultCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<K, Arc<Slot<V>>>>,
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Cache backed by the wall clock
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh value for `key`, or run `compute` and store its result.
    #[tracing::instrument(name = "cache_get_or_compute", level = "debug", skip(self, compute))]
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let slot = self.slot_for(&key);
        let stamped = slot
            .cell
            .get_or_init(move || async move {
                tracing::debug!("Computing value");
                let value = compute().await;
                Stamped {
                    value,
                    inserted_at: self.clock.now(),
                }
            })
            .await;
        stamped.value.clone()
    }

    /// Like [`ResultCache::get_or_compute`], but an `Err` from `compute` is
    /// returned to the caller and nothing is stored.
    #[tracing::instrument(name = "cache_try_get_or_compute", level = "debug", skip(self, compute))]
    pub async fn try_get_or_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot_for(&key);
        let stamped = slot
            .cell
            .get_or_try_init(move || async move {
                tracing::debug!("Computing value");
                let value = compute().await?;
                Ok(Stamped {
                    value,
                    inserted_at: self.clock.now(),
                })
            })
            .await?;
        Ok(stamped.value.clone())
    }

    /// Number of slots, including in-flight ones and stale ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slot a caller should wait on: the existing one unless it is stale.
    fn slot_for(&self, key: &K) -> Arc<Slot<V>> {
        let now = self.clock.now();
        let mut slots = self.lock();

        if let Some(slot) = slots.get(key) {
            if !slot.is_stale(now, self.ttl) {
                if slot.cell.initialized() {
                    tracing::debug!("Key found and still fresh");
                } else {
                    tracing::debug!("Key in flight, joining");
                }
                return Arc::clone(slot);
            }
            tracing::debug!("Key found but expired");
        } else {
            tracing::debug!("Key not found");
        }

        let reclaimed = Self::reclaim(&mut slots, now, self.ttl);
        if reclaimed > 0 {
            tracing::debug!("Reclaimed {} stale slots", reclaimed);
        }

        let slot = Arc::new(Slot::empty());
        slots.insert(key.clone(), Arc::clone(&slot));
        slot
    }

    /// Drop stale slots and slots whose computation failed with nobody waiting.
    /// Runs on every insertion, so the map never outgrows one TTL window.
    fn reclaim(slots: &mut HashMap<K, Arc<Slot<V>>>, now: Instant, ttl: Duration) -> usize {
        let before = slots.len();
        slots.retain(|_, slot| {
            let abandoned = !slot.cell.initialized() && Arc::strong_count(slot) == 1;
            !abandoned && !slot.is_stale(now, ttl)
        });
        before - slots.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Arc<Slot<V>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Debug for ResultCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
