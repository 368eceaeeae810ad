//! Record store
//!
//! All mutations go through one lock. Id generation happens under that same
//! lock, so `append` is atomic with id assignment and no two records can
//! share an id. Every effective mutation bumps a revision published on a
//! `watch` channel for re-rendering.

use crate::modal::ModalVisibility;
use chrono::Utc;
use formdeck_core::{ModalId, RecordDraft, RecordId, SubmissionRecord, COUNTRIES};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use ulid::Ulid;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Monotonic ids overflowed within one millisecond
    #[error("record id space exhausted")]
    IdExhausted,
}

#[derive(Debug)]
struct StoreState {
    records: Vec<SubmissionRecord>,
    modals: ModalVisibility,
    last_id: Option<Ulid>,
}

impl StoreState {
    /// Strictly increasing ids, even within one millisecond
    fn next_id(&mut self) -> Result<RecordId, StoreError> {
        let fresh = Ulid::new();
        let id = match self.last_id {
            Some(last) if fresh <= last => last.increment().ok_or(StoreError::IdExhausted)?,
            _ => fresh,
        };
        self.last_id = Some(id);
        Ok(RecordId::from_ulid(id))
    }
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub records: Vec<SubmissionRecord>,
    pub modal_visibility: ModalVisibility,
    pub revision: u64,
}

/// In-memory record store
#[derive(Debug)]
pub struct RecordStore {
    state: Mutex<StoreState>,
    revision: watch::Sender<u64>,
    countries: Vec<String>,
}

impl RecordStore {
    /// Create an empty store with the default country suggestions
    #[must_use]
    pub fn new() -> Self {
        Self::with_countries(COUNTRIES.iter().map(ToString::to_string).collect())
    }

    /// Create an empty store with custom country suggestions
    #[must_use]
    pub fn with_countries(countries: Vec<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(StoreState {
                records: Vec::new(),
                modals: ModalVisibility::default(),
                last_id: None,
            }),
            revision,
            countries,
        }
    }

    /// Accept a validated draft, assigning its id and timestamp
    ///
    /// # Errors
    /// - `StoreError::IdExhausted` if the id generator overflows
    pub fn append(&self, draft: RecordDraft) -> Result<SubmissionRecord, StoreError> {
        let mut state = self.state.lock();
        let id = state.next_id()?;
        let record = draft.into_record(id, Utc::now());
        state.records.push(record.clone());
        self.bump();

        tracing::info!(
            id = %record.id,
            total = state.records.len(),
            "record appended"
        );
        Ok(record)
    }

    /// Remove every record; modal flags are untouched
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let removed = state.records.len();
        state.records.clear();
        self.bump();
        tracing::info!(removed, "records cleared");
    }

    /// Open a modal (no-op if already open)
    pub fn open_modal(&self, modal: ModalId) {
        self.set_modal(modal, true);
    }

    /// Close a modal (no-op if already closed)
    pub fn close_modal(&self, modal: ModalId) {
        self.set_modal(modal, false);
    }

    fn set_modal(&self, modal: ModalId, open: bool) {
        let mut state = self.state.lock();
        if state.modals.set(modal, open) {
            self.bump();
            tracing::info!(%modal, open, "modal toggled");
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Whether a modal is open
    #[must_use]
    pub fn is_modal_open(&self, modal: ModalId) -> bool {
        self.state.lock().modals.is_open(modal)
    }

    /// Current modal flags
    #[must_use]
    pub fn modal_visibility(&self) -> ModalVisibility {
        self.state.lock().modals
    }

    /// Accepted records in insertion order
    #[must_use]
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.state.lock().records.clone()
    }

    /// Number of accepted records
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    /// True when no record has been accepted (or after a clear)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Consistent copy of records, modal flags and revision
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            records: state.records.clone(),
            modal_visibility: state.modals,
            revision: *self.revision.borrow(),
        }
    }

    /// Country suggestions for the presentation layer
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Current revision number
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver notified after every effective mutation
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
