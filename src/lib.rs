//! In-memory lending catalog for a small library.
//!
//! This crate keeps books, audiobooks and e-magazines in a [`Catalog`],
//! drives each item through an `Available` / `Borrowed` state machine, and
//! computes fines for late returns.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod item;
pub mod item_status;
pub mod observers;
pub mod report;

pub use catalog::{Catalog, Fine, Overdue, Transition};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, LoanPolicy};
pub use error::{BorrowError, CatalogError, ConfigError, ReturnError};
pub use events::LoanEvent;
pub use item::{Item, ItemId, ItemKind};
pub use item_status::ItemStatus;
pub use observers::{LoanObserver, NotificationService, TransitionLogger};
pub use report::Report;
