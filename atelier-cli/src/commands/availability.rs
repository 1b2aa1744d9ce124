//! `atelier availability` — the sidebar widget, driven from the terminal.
//!
//! The entry is read once through the management API. A field write stores
//! a new draft version; publish activates whatever version the write left.
//! The management API has no push channel, so change subscriptions are
//! accepted and never fire.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::Args;
use serde_json::Value;

use atelier_content::{ContentError, ManagedEntry, ManagementClient, DEFAULT_LOCALE};
use atelier_core::{AvailabilityStatus, UnknownStatus};
use atelier_sidebar::{
    AvailabilityField, AvailabilityWidget, ChangeCallback, EntryHost, HostError, SidebarAction,
    Unsubscribe,
};

use super::{init_tracing, load_config, paint_status, runtime};

const AVAILABILITY_FIELD: &str = "availability";
const ARTWORK_TYPE: &str = "artwork";

/// Arguments for `atelier availability`.
#[derive(Args, Debug)]
pub struct AvailabilityArgs {
    /// Id of the artwork entry.
    pub entry_id: String,

    /// Write this status and publish: "Available", "Sold" or "Not for Sale".
    #[arg(long, value_parser = parse_status)]
    pub set: Option<AvailabilityStatus>,

    /// Flip Available and Sold, then publish.
    #[arg(long, conflicts_with = "set")]
    pub toggle: bool,

    /// Locale the field value is read from and written to.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,
}

fn parse_status(raw: &str) -> Result<AvailabilityStatus, String> {
    raw.parse().map_err(|err: UnknownStatus| err.to_string())
}

impl AvailabilityArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        init_tracing();
        let config = load_config(config_path)?;
        let client = ManagementClient::from_config(&config)
            .context("availability changes need a management token")?;
        runtime()?.block_on(self.drive(Arc::new(client)))
    }

    async fn drive(self, client: Arc<ManagementClient>) -> Result<()> {
        let host = ManagedEntryHost::fetch(client, &self.entry_id, self.locale).await?;
        let widget = AvailabilityWidget::mount(Arc::new(host));

        let outcome = if self.toggle {
            if !widget.view().offers(SidebarAction::Toggle) {
                println!("{}", widget.view());
                bail!("this entry offers no toggle");
            }
            widget.perform(SidebarAction::Toggle).await.map(|_| ())
        } else if let Some(target) = self.set {
            if widget.status() == Some(target) {
                println!("{}", widget.view());
                println!("Already {}.", paint_status(target));
                return Ok(());
            }
            widget.update(target).await
        } else {
            Ok(())
        };

        println!("{}", widget.view());
        widget.unmount();
        outcome.context("availability update failed")
    }
}

// ---------------------------------------------------------------------------
// Management-API host
// ---------------------------------------------------------------------------

type SharedEntry = Arc<Mutex<ManagedEntry>>;

fn lock(entry: &SharedEntry) -> MutexGuard<'_, ManagedEntry> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

fn host_error(err: impl std::fmt::Display) -> HostError {
    HostError::new(err.to_string())
}

/// Run a blocking management call off the async thread.
async fn blocking<T: Send + 'static>(
    call: impl FnOnce() -> Result<T, ContentError> + Send + 'static,
) -> Result<T, HostError> {
    tokio::task::spawn_blocking(call)
        .await
        .map_err(host_error)?
        .map_err(host_error)
}

struct ManagedEntryHost {
    client: Arc<ManagementClient>,
    entry: SharedEntry,
    locale: String,
}

impl ManagedEntryHost {
    async fn fetch(client: Arc<ManagementClient>, entry_id: &str, locale: String) -> Result<Self> {
        let id = entry_id.to_string();
        let entry = {
            let client = client.clone();
            tokio::task::spawn_blocking(move || client.get_entry(&id))
                .await
                .context("entry lookup task failed")?
                .with_context(|| format!("failed to load entry '{entry_id}'"))?
        };
        Ok(Self {
            client,
            entry: Arc::new(Mutex::new(entry)),
            locale,
        })
    }
}

#[async_trait]
impl EntryHost for ManagedEntryHost {
    fn availability_field(&self) -> Option<Arc<dyn AvailabilityField>> {
        let present = {
            let entry = lock(&self.entry);
            entry.has_field(AVAILABILITY_FIELD)
                || entry
                    .content_type
                    .as_ref()
                    .is_some_and(|ct| ct.0 == ARTWORK_TYPE)
        };
        if !present {
            return None;
        }
        Some(Arc::new(ManagedAvailabilityField {
            client: self.client.clone(),
            entry: self.entry.clone(),
            locale: self.locale.clone(),
        }))
    }

    async fn publish(&self) -> Result<(), HostError> {
        let (id, version) = {
            let entry = lock(&self.entry);
            (entry.id.clone(), entry.version)
        };
        let client = self.client.clone();
        let published = blocking(move || client.publish_entry(&id, version)).await?;
        lock(&self.entry).version = published.version;
        Ok(())
    }
}

struct ManagedAvailabilityField {
    client: Arc<ManagementClient>,
    entry: SharedEntry,
    locale: String,
}

#[async_trait]
impl AvailabilityField for ManagedAvailabilityField {
    fn get_value(&self) -> Option<AvailabilityStatus> {
        let entry = lock(&self.entry);
        let raw = entry.localized(AVAILABILITY_FIELD, &self.locale)?.as_str()?;
        match raw.parse() {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!(error = %err, entry = %entry.id, "ignoring unrecognised availability");
                None
            }
        }
    }

    async fn set_value(&self, status: AvailabilityStatus) -> Result<(), HostError> {
        let mut draft = lock(&self.entry).clone();
        draft.set_localized(
            AVAILABILITY_FIELD,
            &self.locale,
            Some(Value::String(status.label().to_string())),
        );
        let client = self.client.clone();
        let stored = blocking(move || client.update_entry(&draft)).await?;
        *lock(&self.entry) = stored;
        Ok(())
    }

    fn on_value_changed(&self, _callback: ChangeCallback) -> Unsubscribe {
        Box::new(|| {})
    }
}
