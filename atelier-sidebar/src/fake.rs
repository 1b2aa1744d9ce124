//! In-memory [`EntryHost`] for tests and demos.
//!
//! Records every host call in order, can reject writes or publishes, can
//! hold a write in flight until released, and pushes external changes to
//! registered listeners.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;

use atelier_core::AvailabilityStatus;

use crate::error::HostError;
use crate::host::{AvailabilityField, ChangeCallback, EntryHost, Unsubscribe};

/// A call the widget made against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    SetValue(AvailabilityStatus),
    Publish,
}

type Listener = Arc<dyn Fn(Option<AvailabilityStatus>) + Send + Sync>;

#[derive(Default)]
struct FakeState {
    has_field: bool,
    value: Option<AvailabilityStatus>,
    listeners: BTreeMap<u64, Listener>,
    next_listener: u64,
    calls: Vec<HostCall>,
    write_error: Option<String>,
    publish_error: Option<String>,
    write_gate: Option<oneshot::Receiver<()>>,
}

/// Shared handle to a fake entry; clones observe the same state.
#[derive(Clone, Default)]
pub struct FakeEntry {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEntry {
    /// Entry with an `availability` field holding `value`.
    pub fn with_value(value: Option<AvailabilityStatus>) -> Self {
        let fake = Self::default();
        {
            let mut s = fake.lock();
            s.has_field = true;
            s.value = value;
        }
        fake
    }

    /// Entry whose content type has no `availability` field.
    pub fn without_field() -> Self {
        Self::default()
    }

    pub fn host(&self) -> Arc<dyn EntryHost> {
        Arc::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject subsequent writes with `message`.
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().write_error = Some(message.into());
    }

    /// Reject subsequent publishes with `message`.
    pub fn fail_publishes(&self, message: impl Into<String>) {
        self.lock().publish_error = Some(message.into());
    }

    pub fn clear_failures(&self) {
        let mut s = self.lock();
        s.write_error = None;
        s.publish_error = None;
    }

    /// Remove the field, as if the content type changed under the editor.
    pub fn remove_field(&self) {
        self.lock().has_field = false;
    }

    /// Keep the next `set_value` pending until the returned sender fires
    /// (or is dropped).
    pub fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().write_gate = Some(rx);
        tx
    }

    /// Simulate another editor changing the field.
    pub fn push_external(&self, value: Option<AvailabilityStatus>) {
        let listeners: Vec<Listener> = {
            let mut s = self.lock();
            s.value = value;
            s.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener(value);
        }
    }

    pub fn value(&self) -> Option<AvailabilityStatus> {
        self.lock().value
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

#[async_trait]
impl AvailabilityField for FakeEntry {
    fn get_value(&self) -> Option<AvailabilityStatus> {
        self.lock().value
    }

    async fn set_value(&self, status: AvailabilityStatus) -> Result<(), HostError> {
        let gate = {
            let mut s = self.lock();
            s.calls.push(HostCall::SetValue(status));
            s.write_gate.take()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let mut s = self.lock();
        if let Some(message) = s.write_error.clone() {
            return Err(HostError::new(message));
        }
        s.value = Some(status);
        Ok(())
    }

    fn on_value_changed(&self, callback: ChangeCallback) -> Unsubscribe {
        let id = {
            let mut s = self.lock();
            let id = s.next_listener;
            s.next_listener += 1;
            s.listeners.insert(id, Arc::from(callback));
            id
        };
        let fake = self.clone();
        Box::new(move || {
            fake.lock().listeners.remove(&id);
        })
    }
}

#[async_trait]
impl EntryHost for FakeEntry {
    fn availability_field(&self) -> Option<Arc<dyn AvailabilityField>> {
        if !self.lock().has_field {
            return None;
        }
        Some(Arc::new(self.clone()))
    }

    async fn publish(&self) -> Result<(), HostError> {
        let mut s = self.lock();
        s.calls.push(HostCall::Publish);
        match s.publish_error.clone() {
            Some(message) => Err(HostError::new(message)),
            None => Ok(()),
        }
    }
}
