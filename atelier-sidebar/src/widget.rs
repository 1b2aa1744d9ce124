//! The availability widget: local state, change subscription, and the
//! save-then-publish update path.
//!
//! ## Update protocol
//!
//! 1. Mark busy and clear the previous error (the busy flag is owned by a
//!    guard, so it is cleared on every exit path).
//! 2. Re-check that the field exists, then write the new value.
//! 3. Apply the value locally unless an external change arrived meanwhile.
//! 4. Publish the entry.
//! 5. On any failure keep whatever was applied and show the error text.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use atelier_core::AvailabilityStatus;

use crate::error::UpdateError;
use crate::host::{EntryHost, FieldBinding};
use crate::view::{self, BadgeVariant, SidebarAction, SidebarView, FIELD_MISSING_MESSAGE};

#[derive(Debug, Default)]
struct SidebarState {
    field_missing: bool,
    status: Option<AvailabilityStatus>,
    busy: bool,
    error: Option<String>,
    /// Bumped on every external change notification.
    revision: u64,
}

type SharedState = Arc<Mutex<SidebarState>>;

fn lock(state: &Mutex<SidebarState>) -> MutexGuard<'_, SidebarState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the busy flag when dropped.
struct BusyGuard {
    state: SharedState,
}

impl BusyGuard {
    /// Set busy, clear the last error, and return the revision seen at start.
    fn engage(state: &SharedState) -> (Self, u64) {
        let revision = {
            let mut s = lock(state);
            s.busy = true;
            s.error = None;
            s.revision
        };
        (
            Self {
                state: state.clone(),
            },
            revision,
        )
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.state).busy = false;
    }
}

/// Sidebar widget bound to one entry's `availability` field.
///
/// Each mount owns an independent subscription; dropping the widget
/// releases it.
#[derive(Debug)]
pub struct AvailabilityWidget {
    state: SharedState,
    binding: Option<FieldBinding>,
}

impl AvailabilityWidget {
    /// Bind to `host`: read the current value and subscribe to changes.
    ///
    /// When the entry has no `availability` field the widget shows only an
    /// error and never offers controls.
    pub fn mount(host: Arc<dyn EntryHost>) -> Self {
        let state: SharedState = Arc::default();

        let Some(mut binding) = FieldBinding::acquire(host) else {
            tracing::warn!("availability field not found on entry");
            {
                let mut s = lock(&state);
                s.field_missing = true;
                s.error = Some(FIELD_MISSING_MESSAGE.to_string());
            }
            return Self {
                state,
                binding: None,
            };
        };

        let initial = binding.read();
        lock(&state).status = initial;

        let weak: Weak<Mutex<SidebarState>> = Arc::downgrade(&state);
        binding.subscribe(Box::new(move |value| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut s = lock(&state);
            s.status = value;
            s.revision += 1;
            tracing::debug!(status = ?value, "availability changed externally");
        }));

        Self {
            state,
            binding: Some(binding),
        }
    }

    /// Release the change subscription.
    pub fn unmount(self) {}

    pub fn status(&self) -> Option<AvailabilityStatus> {
        lock(&self.state).status
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.binding.as_ref().is_some_and(FieldBinding::is_subscribed)
    }

    pub fn view(&self) -> SidebarView {
        let s = lock(&self.state);
        if s.field_missing {
            return SidebarView::ErrorOnly {
                message: FIELD_MISSING_MESSAGE.to_string(),
            };
        }
        match (s.status, &s.error) {
            (Some(status), error) => SidebarView::Status {
                status,
                badge: BadgeVariant::for_status(status),
                buttons: view::buttons_for(status, !s.busy),
                busy: s.busy,
                error: error.clone(),
            },
            (None, Some(message)) => SidebarView::ErrorOnly {
                message: message.clone(),
            },
            (None, None) => SidebarView::Empty,
        }
    }

    /// Write `target` and publish the entry.
    ///
    /// The error is also kept for display; see [`UpdateError`] for how the
    /// message is shared between write and publish failures.
    pub async fn update(&self, target: AvailabilityStatus) -> Result<(), UpdateError> {
        let Some(binding) = self.binding.as_ref() else {
            return Err(UpdateError::FieldAbsent);
        };

        let (_busy, started_at) = BusyGuard::engage(&self.state);
        let result = self.write_and_publish(binding, target, started_at).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, status = %target, "availability update failed");
            lock(&self.state).error = Some(err.to_string());
        }
        result
    }

    async fn write_and_publish(
        &self,
        binding: &FieldBinding,
        target: AvailabilityStatus,
        started_at: u64,
    ) -> Result<(), UpdateError> {
        binding.write(target).await?;
        {
            let mut s = lock(&self.state);
            if s.revision == started_at {
                s.status = Some(target);
            }
        }
        binding.publish().await?;
        tracing::info!(status = %target, "availability updated and published");
        Ok(())
    }

    /// Flip `Available` ⇄ `Sold`. Returns the written status, or `None` when
    /// the current state offers no toggle.
    pub async fn toggle(&self) -> Result<Option<AvailabilityStatus>, UpdateError> {
        let Some(target) = self.status().and_then(view::toggle_target) else {
            return Ok(None);
        };
        self.update(target).await?;
        Ok(Some(target))
    }

    /// Run a control from the current view. Controls that are not rendered,
    /// or disabled while an update is in flight, do nothing.
    pub async fn perform(
        &self,
        action: SidebarAction,
    ) -> Result<Option<AvailabilityStatus>, UpdateError> {
        if !self.view().offers(action) {
            tracing::debug!(?action, "ignoring action not offered by the sidebar");
            return Ok(None);
        }
        match action {
            SidebarAction::Toggle => self.toggle().await,
            SidebarAction::Set(target) => self.update(target).await.map(|()| Some(target)),
        }
    }
}
