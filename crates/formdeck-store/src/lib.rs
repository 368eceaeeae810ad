//! formdeck Store
//!
//! Explicitly constructed state container holding accepted submissions and
//! the visibility of the two form modals.
//!
//! # Example
//!
//! ```rust
//! use formdeck_core::ModalId;
//! use formdeck_store::RecordStore;
//!
//! let store = RecordStore::new();
//! store.open_modal(ModalId::Schema);
//! assert!(store.is_modal_open(ModalId::Schema));
//! store.close_modal(ModalId::Schema);
//! store.close_modal(ModalId::Schema);
//! assert!(!store.is_modal_open(ModalId::Schema));
//! ```

#![warn(unreachable_pub)]

pub mod modal;
pub mod store;

pub use modal::ModalVisibility;
pub use store::{RecordStore, StoreError, StoreSnapshot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
