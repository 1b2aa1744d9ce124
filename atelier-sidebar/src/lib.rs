//! # atelier-sidebar
//!
//! Availability sidebar widget: mirrors one remote `availability` field into
//! local state, follows external change notifications, and writes back
//! through a save-then-publish sequence.
//!
//! Call [`AvailabilityWidget::mount`] with an [`EntryHost`] to bind the
//! widget; drop it (or call [`AvailabilityWidget::unmount`]) to release the
//! change subscription.

pub mod error;
pub mod fake;
pub mod host;
pub mod view;
mod widget;

pub use error::{HostError, UpdateError};
pub use host::{AvailabilityField, ChangeCallback, EntryHost, FieldBinding, Subscription, Unsubscribe};
pub use view::{toggle_target, ActionButton, BadgeVariant, SidebarAction, SidebarView};
pub use widget::AvailabilityWidget;
