use std::{
    collections::{HashMap, VecDeque},
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Store of classification results keyed by raw user-agent
pub trait VerdictCache: fmt::Debug + Send + Sync {
    fn get(&self, user_agent: &str) -> Option<bool>;

    fn insert(&self, user_agent: &str, is_bot: bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capacity-bounded cache evicting the oldest inserted entry when full
#[derive(Debug)]
pub struct BoundedVerdictCache {
    capacity: usize,
    inner: Mutex<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    verdicts: HashMap<String, bool>,
    insertion_order: VecDeque<String>,
}

impl BoundedVerdictCache {
    /// Default number of distinct user-agents remembered
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Entries::default()),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        // Entries stay consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BoundedVerdictCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl VerdictCache for BoundedVerdictCache {
    fn get(&self, user_agent: &str) -> Option<bool> {
        self.entries().verdicts.get(user_agent).copied()
    }

    fn insert(&self, user_agent: &str, is_bot: bool) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries();
        if let Some(verdict) = entries.verdicts.get_mut(user_agent) {
            *verdict = is_bot;
            return;
        }

        if entries.verdicts.len() >= self.capacity
            && let Some(oldest) = entries.insertion_order.pop_front()
        {
            entries.verdicts.remove(&oldest);
            tracing::trace!(user_agent = %oldest, "Evicted bot verdict");
        }

        entries.verdicts.insert(user_agent.to_owned(), is_bot);
        entries.insertion_order.push_back(user_agent.to_owned());
    }

    fn len(&self) -> usize {
        self.entries().verdicts.len()
    }
}
