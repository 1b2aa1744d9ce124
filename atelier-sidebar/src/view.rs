//! Render model for the sidebar and the transition table behind it.
//!
//! | status        | primary                         | secondary                       |
//! |---------------|---------------------------------|---------------------------------|
//! | Available     | "Mark as Sold" (toggle)         | "Not for Sale"                  |
//! | Sold          | "Mark as Available" (toggle)    | "Not for Sale"                  |
//! | Not for Sale  | "Mark Available"                | "Mark Sold"                     |
//! | unset         | —                               | —                               |

use std::fmt;

use atelier_core::AvailabilityStatus;

pub const FIELD_MISSING_MESSAGE: &str = "Availability field not found on this entry";
pub const NO_DATA_MESSAGE: &str = "No availability data found";

/// A user-triggerable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    /// Flip between `Available` and `Sold`.
    Toggle,
    /// Move to an explicit status.
    Set(AvailabilityStatus),
}

/// Badge colour for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Positive,
    Negative,
    Warning,
}

impl BadgeVariant {
    pub fn for_status(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Available => BadgeVariant::Positive,
            AvailabilityStatus::Sold => BadgeVariant::Negative,
            AvailabilityStatus::NotForSale => BadgeVariant::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: SidebarAction,
    pub label: &'static str,
    pub primary: bool,
    pub enabled: bool,
}

/// What the sidebar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    /// Only an error line; no badge, no controls.
    ErrorOnly { message: String },
    /// Field present but unset.
    Empty,
    /// Badge plus the controls offered for `status`.
    Status {
        status: AvailabilityStatus,
        badge: BadgeVariant,
        buttons: Vec<ActionButton>,
        busy: bool,
        error: Option<String>,
    },
}

impl SidebarView {
    pub fn status(&self) -> Option<AvailabilityStatus> {
        match self {
            SidebarView::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn buttons(&self) -> &[ActionButton] {
        match self {
            SidebarView::Status { buttons, .. } => buttons,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SidebarView::ErrorOnly { message } => Some(message),
            SidebarView::Status { error, .. } => error.as_deref(),
            SidebarView::Empty => None,
        }
    }

    /// True when `action` is rendered and clickable.
    pub fn offers(&self, action: SidebarAction) -> bool {
        self.buttons()
            .iter()
            .any(|button| button.action == action && button.enabled)
    }
}

impl fmt::Display for SidebarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidebarView::ErrorOnly { message } => write!(f, "Error: {message}"),
            SidebarView::Empty => f.write_str(NO_DATA_MESSAGE),
            SidebarView::Status {
                status,
                buttons,
                busy,
                error,
                ..
            } => {
                writeln!(f, "Status: {status}")?;
                let row = buttons
                    .iter()
                    .map(|b| format!("[{}]", b.label))
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "{row}")?;
                if *busy {
                    write!(f, " (saving…)")?;
                }
                if let Some(error) = error {
                    write!(f, "\nError: {error}")?;
                }
                Ok(())
            }
        }
    }
}

/// Target of the toggle control; `None` where no toggle is offered.
pub fn toggle_target(status: AvailabilityStatus) -> Option<AvailabilityStatus> {
    match status {
        AvailabilityStatus::Available => Some(AvailabilityStatus::Sold),
        AvailabilityStatus::Sold => Some(AvailabilityStatus::Available),
        AvailabilityStatus::NotForSale => None,
    }
}

pub(crate) fn buttons_for(status: AvailabilityStatus, enabled: bool) -> Vec<ActionButton> {
    let button = |action, label, primary| ActionButton {
        action,
        label,
        primary,
        enabled,
    };
    match status {
        AvailabilityStatus::Available => vec![
            button(SidebarAction::Toggle, "Mark as Sold", true),
            button(SidebarAction::Set(AvailabilityStatus::NotForSale), "Not for Sale", false),
        ],
        AvailabilityStatus::Sold => vec![
            button(SidebarAction::Toggle, "Mark as Available", true),
            button(SidebarAction::Set(AvailabilityStatus::NotForSale), "Not for Sale", false),
        ],
        AvailabilityStatus::NotForSale => vec![
            button(SidebarAction::Set(AvailabilityStatus::Available), "Mark Available", true),
            button(SidebarAction::Set(AvailabilityStatus::Sold), "Mark Sold", false),
        ],
    }
}
