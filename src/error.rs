use std::{io, path::PathBuf};

use thiserror::Error;

use crate::item::ItemId;

/// Why a borrow request was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowError {
    /// No item is catalogued under this id
    #[error("No item found with ID: {0}")]
    NotFound(ItemId),
    /// The item is already out on loan
    #[error("'{title}' is already borrowed")]
    AlreadyBorrowed {
        /// Requested item
        id: ItemId,
        /// Its title, for messages
        title: String,
    },
    /// today + days does not fit in the calendar
    #[error("a loan of {days} days for item {id} ends outside the supported calendar")]
    DueDateOutOfRange {
        /// Requested item
        id: ItemId,
        /// Requested loan length
        days: u32,
    },
}

/// Why a return was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    /// No item is catalogued under this id
    #[error("No item found with ID: {0}")]
    NotFound(ItemId),
    /// The item is on the shelf, there is nothing to return
    #[error("'{title}' is not currently borrowed")]
    NotReturnable {
        /// Requested item
        id: ItemId,
        /// Its title, for messages
        title: String,
    },
}

/// Errors from catalog maintenance and kind-specific actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No item is catalogued under this id
    #[error("No item found with ID: {0}")]
    NotFound(ItemId),
    /// Strict insertion found the id already taken
    #[error("an item with ID {0} is already catalogued")]
    DuplicateId(ItemId),
    /// The action only applies to another kind of item
    #[error("cannot {action} item {id}: it is a {kind}")]
    Unsupported {
        /// Requested item
        id: ItemId,
        /// Action that was attempted
        action: &'static str,
        /// Kind label of the item
        kind: &'static str,
    },
}

/// Failure to load a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },
    /// The file is not valid TOML for the expected layout
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Parser diagnostics
        source: toml::de::Error,
    },
}
