use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use crate::contract::model::{Examination, StaffPatientAssignment, User};
use crate::domain::seed::SeedData;

/// Anything kept in the fallback store is addressed by its string id.
pub trait Record: Clone + Send + Sync {
    fn record_id(&self) -> &str;
}

impl Record for User {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Examination {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for StaffPatientAssignment {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Ordered, id-addressed collection. Insertion order is preserved.
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn append(&self, item: T) {
        self.items.write().push(item);
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| pred(item)).cloned()
    }

    /// Apply `apply` to the record with `id` and return the merged record.
    /// Returns `None` when no record matches.
    pub fn update_by_id(&self, id: &str, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.items.write();
        let item = items.iter_mut().find(|item| item.record_id() == id)?;
        apply(item);
        Some(item.clone())
    }

    pub fn remove_by_id(&self, id: &str) -> Option<T> {
        self.remove_first(|item| item.record_id() == id)
    }

    pub fn remove_first(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let mut items = self.items.write();
        let index = items.iter().position(pred)?;
        Some(items.remove(index))
    }
}

/// In-memory stand-in for the remote service.
///
/// Owned and injected into each façade; nothing here is process-global.
/// Every fallback operation awaits [`FallbackStore::simulate_latency`] first.
pub struct FallbackStore {
    users: Collection<User>,
    examinations: Collection<Examination>,
    assignments: Collection<StaffPatientAssignment>,
    delay: Duration,
}

impl FallbackStore {
    pub fn with_seed(seed: SeedData, delay: Duration) -> Self {
        Self {
            users: Collection::new(seed.users),
            examinations: Collection::new(seed.examinations),
            assignments: Collection::new(seed.assignments),
            delay,
        }
    }

    /// Store pre-filled with the demo records.
    pub fn seeded(delay: Duration) -> Self {
        Self::with_seed(SeedData::demo(), delay)
    }

    pub fn empty(delay: Duration) -> Self {
        Self::with_seed(SeedData::default(), delay)
    }

    pub async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating fallback latency");
            tokio::time::sleep(self.delay).await;
        }
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn examinations(&self) -> &Collection<Examination> {
        &self.examinations
    }

    pub fn assignments(&self) -> &Collection<StaffPatientAssignment> {
        &self.assignments
    }
}
