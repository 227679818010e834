use std::sync::{Condvar, Mutex};

// ---------------------------------------------------------------------------
// One-shot value handoff between simulation passes
// ---------------------------------------------------------------------------

/// A one-shot, single-producer rendezvous: one thread releases a value once,
/// any number of threads block in `wait` until it arrives. Releases after the
/// first are ignored, so the producer can release unconditionally on every
/// exit path without double-publishing.
#[derive(Debug, Default)]
pub struct Handoff<T> {
    slot: Mutex<Option<T>>,
    ready: Condvar,
}

impl<T: Clone> Handoff<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Publish the value and wake all waiters. First call wins.
    pub fn release(&self, value: T) {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_none() {
            *slot = Some(value);
            self.ready.notify_all();
        }
    }

    /// Block until a value has been released, then return a clone of it.
    pub fn wait(&self) -> T {
        let mut slot = self.slot.lock().unwrap();
        loop {
            if let Some(value) = slot.as_ref() {
                return value.clone();
            }
            slot = self.ready.wait(slot).unwrap();
        }
    }

    /// Non-blocking read of the released value, if any.
    pub fn try_get(&self) -> Option<T> {
        self.slot.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
