//! Host environment contract and the field binding built on it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use atelier_core::AvailabilityStatus;

use crate::error::{HostError, UpdateError};

/// Listener invoked by the host when the field changes outside this widget.
/// `None` means the field was cleared.
pub type ChangeCallback = Box<dyn Fn(Option<AvailabilityStatus>) + Send + Sync>;

/// Deregisters a [`ChangeCallback`]; called at most once.
pub type Unsubscribe = Box<dyn FnOnce() + Send>;

/// One enumerated field on the entry open in the editor.
#[async_trait]
pub trait AvailabilityField: Send + Sync {
    /// Current value; `None` when the field is unset.
    fn get_value(&self) -> Option<AvailabilityStatus>;

    async fn set_value(&self, status: AvailabilityStatus) -> Result<(), HostError>;

    fn on_value_changed(&self, callback: ChangeCallback) -> Unsubscribe;
}

/// The entry open in the editor.
#[async_trait]
pub trait EntryHost: Send + Sync {
    /// The `availability` field handle, or `None` when the content type has
    /// no such field.
    fn availability_field(&self) -> Option<Arc<dyn AvailabilityField>>;

    /// Publish the entry's current draft.
    async fn publish(&self) -> Result<(), HostError>;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Owned change subscription; deregisters exactly once, on [`release`] or drop.
///
/// [`release`]: Subscription::release
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    pub fn new(unsubscribe: Unsubscribe) -> Self {
        Self {
            unsubscribe: Some(unsubscribe),
        }
    }

    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FieldBinding
// ---------------------------------------------------------------------------

/// Live link between the widget and the remote field.
///
/// Holds the field handle acquired at mount and, once [`subscribe`] ran, the
/// change subscription. Writes re-check that the field still exists.
///
/// [`subscribe`]: FieldBinding::subscribe
pub struct FieldBinding {
    host: Arc<dyn EntryHost>,
    field: Arc<dyn AvailabilityField>,
    subscription: Option<Subscription>,
}

impl FieldBinding {
    /// Acquire the field handle; `None` when the entry has no such field.
    pub fn acquire(host: Arc<dyn EntryHost>) -> Option<Self> {
        let field = host.availability_field()?;
        Some(Self {
            host,
            field,
            subscription: None,
        })
    }

    pub fn read(&self) -> Option<AvailabilityStatus> {
        self.field.get_value()
    }

    /// Register `callback` for external changes. A previous subscription on
    /// this binding is released first.
    pub fn subscribe(&mut self, callback: ChangeCallback) {
        drop(self.subscription.take());
        self.subscription = Some(Subscription::new(self.field.on_value_changed(callback)));
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub async fn write(&self, status: AvailabilityStatus) -> Result<(), UpdateError> {
        let field = self
            .host
            .availability_field()
            .ok_or(UpdateError::FieldAbsent)?;
        field
            .set_value(status)
            .await
            .map_err(|source| UpdateError::WriteFailed { source })
    }

    pub async fn publish(&self) -> Result<(), UpdateError> {
        self.host
            .publish()
            .await
            .map_err(|source| UpdateError::PublishFailed { source })
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
