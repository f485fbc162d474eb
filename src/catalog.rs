use std::{collections::HashMap, fmt};

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    clock::{Clock, SystemClock},
    config::LoanPolicy,
    error::{BorrowError, CatalogError, ReturnError},
    events::LoanEvent,
    item::{Item, ItemId, ItemKind},
    item_status::ItemStatus,
    observers::LoanObserver,
};

/// Penalty reported when an item comes back late
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fine {
    /// Whole days past the due date
    pub days_overdue: u32,
    /// `days_overdue * fine_per_day`
    pub amount: f64,
}

impl Fine {
    /// Fine for an item due on `due_date` and returned on `returned_on`
    ///
    /// Returns `None` when the item is back on or before its due date.
    #[must_use]
    pub fn assess(due_date: NaiveDate, returned_on: NaiveDate, fine_per_day: f64) -> Option<Self> {
        let days_overdue = overdue_days(due_date, returned_on)?;
        Some(Self { days_overdue, amount: f64::from(days_overdue) * fine_per_day })
    }
}

/// Whole days strictly after `due_date`, or `None` if not late
fn overdue_days(due_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let days = today.signed_duration_since(due_date).num_days();
    if days > 0 { Some(u32::try_from(days).unwrap_or(u32::MAX)) } else { None }
}

/// Represents an applied status transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Item that changed status
    pub item_id: ItemId,
    /// The status before the transition
    pub from: ItemStatus,
    /// The status after the transition
    pub to: ItemStatus,
    /// The event that triggered the transition
    pub event: LoanEvent,
    /// Calendar date the clock reported
    pub on: NaiveDate,
}

/// A borrowed item whose due date has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overdue {
    /// Late item
    pub item_id: ItemId,
    /// When it should have come back
    pub due_date: NaiveDate,
    /// Days past the due date as of today
    pub days_overdue: u32,
}

/// In-memory catalog of lendable items
///
/// Owns every item record and the due date of every item currently on loan.
/// An item is borrowed exactly when it has a due date; both maps are only
/// changed together.
pub struct Catalog {
    /// All items, in insertion order
    items: IndexMap<ItemId, Item>,
    /// Due date of each borrowed item
    due_dates: HashMap<ItemId, NaiveDate>,
    /// Fine and history rules
    policy: LoanPolicy,
    /// Source of "today"
    clock: Box<dyn Clock>,
    /// Applied transitions, oldest first
    history: Vec<Transition>,
    /// Registered transition observers
    observers: Vec<Box<dyn LoanObserver>>,
}

// Manual implementation of Debug for Catalog
impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items)
            .field("due_dates", &self.due_dates)
            .field("policy", &self.policy)
            .field("clock", &self.clock)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Catalog {
    /// Create an empty catalog with the given policy and calendar
    #[must_use]
    pub fn new(policy: LoanPolicy, clock: impl Clock + 'static) -> Self {
        Self {
            items: IndexMap::new(),
            due_dates: HashMap::new(),
            policy,
            clock: Box::new(clock),
            history: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Create an empty catalog that reads the local system date
    #[must_use]
    pub fn with_system_clock(policy: LoanPolicy) -> Self {
        Self::new(policy, SystemClock)
    }

    /// Register an observer to be notified of transitions
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// Add an item, replacing any item already stored under the same id
    ///
    /// Items always enter the catalog available. A replaced item keeps its
    /// listing position, and its due date is dropped if it was on loan.
    /// Returns the replaced item.
    pub fn add_item(&mut self, mut item: Item) -> Option<Item> {
        let id = item.id();
        item.set_borrowed(false);
        log::info!("Added '{}' to the library", item.title());

        let replaced = self.items.insert(id, item);
        if let Some(old) = &replaced {
            log::warn!("item {id} ('{}') was replaced by a new record", old.title());
            if let Some(due_date) = self.due_dates.remove(&id) {
                log::warn!("dropped loan of replaced item {id} due on {due_date}");
            }
        }
        replaced
    }

    /// Add an item only if its id is not taken yet
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if an item with the same id exists.
    pub fn try_add_item(&mut self, item: Item) -> Result<(), CatalogError> {
        if self.items.contains_key(&item.id()) {
            return Err(CatalogError::DuplicateId(item.id()));
        }
        self.add_item(item);
        Ok(())
    }

    /// Look up an item by id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no item has this id.
    pub fn get_item(&self, id: ItemId) -> Result<&Item, CatalogError> {
        self.items.get(&id).ok_or(CatalogError::NotFound(id))
    }

    /// All items in insertion order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All items in insertion order, collected
    #[must_use]
    pub fn list_items(&self) -> Vec<&Item> {
        self.items().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Status of an item, if it exists
    #[must_use]
    pub fn status(&self, id: ItemId) -> Option<ItemStatus> {
        self.items.get(&id).map(Item::status)
    }

    /// Due date of an item currently on loan
    #[must_use]
    pub fn due_date(&self, id: ItemId) -> Option<NaiveDate> {
        self.due_dates.get(&id).copied()
    }

    /// Number of items currently on loan
    #[must_use]
    pub fn on_loan(&self) -> usize {
        self.due_dates.len()
    }

    #[must_use]
    pub const fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// The date the catalog's clock reports right now
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Borrow an item for `duration_days` calendar days
    ///
    /// Returns the due date, `today + duration_days`.
    ///
    /// # Errors
    ///
    /// - [`BorrowError::NotFound`] if no item has this id
    /// - [`BorrowError::AlreadyBorrowed`] if the item is on loan
    /// - [`BorrowError::DueDateOutOfRange`] if the due date cannot be represented
    ///
    /// The catalog is unchanged on error.
    pub fn borrow(&mut self, id: ItemId, duration_days: u32) -> Result<NaiveDate, BorrowError> {
        let today = self.clock.today();
        log::debug!("borrow request for item {id} ({duration_days} days) on {today}");

        let item = self.items.get_mut(&id).ok_or(BorrowError::NotFound(id))?;
        if item.is_borrowed() {
            return Err(BorrowError::AlreadyBorrowed { id, title: item.title().to_owned() });
        }

        let due_date = today
            .checked_add_days(Days::new(u64::from(duration_days)))
            .ok_or(BorrowError::DueDateOutOfRange { id, days: duration_days })?;

        item.set_borrowed(true);
        log::info!("'{}' has been borrowed. It is due on {}", item.title(), due_date.format("%Y-%m-%d"));
        self.due_dates.insert(id, due_date);

        self.record(Transition {
            item_id: id,
            from: ItemStatus::Available,
            to: ItemStatus::Borrowed,
            event: LoanEvent::Borrow { days: duration_days },
            on: today,
        });
        Ok(due_date)
    }

    /// Return a borrowed item
    ///
    /// Returns the fine owed when the item is back after its due date, or
    /// `None` when it is on time.
    ///
    /// # Errors
    ///
    /// - [`ReturnError::NotFound`] if no item has this id
    /// - [`ReturnError::NotReturnable`] if the item is not on loan
    ///
    /// The catalog is unchanged on error.
    pub fn return_item(&mut self, id: ItemId) -> Result<Option<Fine>, ReturnError> {
        let today = self.clock.today();
        log::debug!("return request for item {id} on {today}");

        let item = self.items.get_mut(&id).ok_or(ReturnError::NotFound(id))?;
        if !item.is_borrowed() {
            return Err(ReturnError::NotReturnable { id, title: item.title().to_owned() });
        }

        let due_date = self.due_dates.remove(&id);
        if due_date.is_none() {
            log::warn!("borrowed item {id} had no due date; no fine assessed");
        }
        let fine_per_day = self.policy.fine_per_day;
        let fine = due_date.and_then(|due_date| Fine::assess(due_date, today, fine_per_day));
        if let Some(Fine { days_overdue, amount }) = fine {
            log::info!(
                "A fine of {amount:.2} is due for the late return of '{}' ({days_overdue} days)",
                item.title()
            );
        }

        item.set_borrowed(false);
        log::info!("'{}' has been successfully returned", item.title());

        self.record(Transition {
            item_id: id,
            from: ItemStatus::Borrowed,
            to: ItemStatus::Available,
            event: LoanEvent::Return,
            on: today,
        });
        Ok(fine)
    }

    /// Borrowed items past their due date, in catalog order
    #[must_use]
    pub fn overdue_items(&self) -> Vec<Overdue> {
        let today = self.clock.today();
        self.items
            .keys()
            .filter_map(|&item_id| {
                let due_date = *self.due_dates.get(&item_id)?;
                let days_overdue = overdue_days(due_date, today)?;
                Some(Overdue { item_id, due_date, days_overdue })
            })
            .collect()
    }

    /// Start playback of an audiobook
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids and
    /// [`CatalogError::Unsupported`] for items that are not audiobooks.
    pub fn play(&self, id: ItemId) -> Result<&Item, CatalogError> {
        let item = self.get_item(id)?;
        match item.kind() {
            ItemKind::Audiobook { .. } => {
                log::info!("Playing '{}'...", item.title());
                Ok(item)
            }
            kind => Err(CatalogError::Unsupported { id, action: "play", kind: kind.label() }),
        }
    }

    /// Move an e-magazine issue to the archive
    ///
    /// Archiving does not change lending status.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids and
    /// [`CatalogError::Unsupported`] for items that are not e-magazines.
    pub fn archive_issue(&mut self, id: ItemId) -> Result<(), CatalogError> {
        let item = self.items.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        if !item.archive() {
            return Err(CatalogError::Unsupported {
                id,
                action: "archive",
                kind: item.kind().label(),
            });
        }
        if let Some(issue) = item.issue_number() {
            log::info!("E-Magazine '{}' Issue {issue} has been archived", item.title());
        }
        Ok(())
    }

    /// Get the transition history, oldest first
    #[must_use]
    pub fn get_history(&self) -> &[Transition] {
        &self.history
    }

    /// Append to history and notify observers
    fn record(&mut self, transition: Transition) {
        if let Some(item) = self.items.get(&transition.item_id) {
            for observer in &self.observers {
                observer.on_transition(item, &transition);
            }
        }

        self.history.push(transition);

        // Maintain history size limit
        if self.history.len() > self.policy.max_history {
            self.history.remove(0); // Remove oldest entry
        }
    }
}

// Implementing display for nicer output
impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} items, {} on loan", self.len(), self.on_loan())
    }
}
