use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::store::LearnerKey;

/// One mutex per learner-scenario pair; different learners never contend.
#[derive(Debug, Default)]
pub(crate) struct LearnerLocks {
    locks: Mutex<HashMap<LearnerKey, Arc<Mutex<()>>>>,
}

impl LearnerLocks {
    pub(crate) fn for_key(&self, key: &LearnerKey) -> Arc<Mutex<()>> {
        self.locks.lock().entry(key.clone()).or_default().clone()
    }

    /// Drops the entry for `key` once no caller holds or waits on it.
    /// Callers must drop their own `Arc` first.
    pub(crate) fn release(&self, key: &LearnerKey) {
        let mut locks = self.locks.lock();
        if locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(key);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().len()
    }
}
