use bs_runtime::EngineEvent;
use parking_lot::Mutex;

use crate::store::LearnerKey;

pub trait EventSink: Send + Sync {
    fn publish(&self, key: &LearnerKey, event: &EngineEvent);
}

#[derive(Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _key: &LearnerKey, _event: &EngineEvent) {}
}

#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<(LearnerKey, EngineEvent)>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<(LearnerKey, EngineEvent)> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, key: &LearnerKey, event: &EngineEvent) {
        self.events.lock().push((key.clone(), event.clone()));
    }
}
