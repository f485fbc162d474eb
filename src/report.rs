use std::{collections::BTreeMap, fmt, fmt::Write as _};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    catalog::{Catalog, Overdue, Transition},
    events::LoanEvent,
    item::{Item, ItemId},
    item_status::ItemStatus,
};

/// Rendering helpers for catalog listings, history and statistics
#[derive(Debug)]
pub struct Report;

/// Serializable view of the whole catalog
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// Date the snapshot was taken
    pub today: NaiveDate,
    /// Every item with its due date, in catalog order
    pub items: Vec<SnapshotEntry<'a>>,
    /// Items past their due date
    pub overdue: Vec<Overdue>,
}

/// One item in a [`Snapshot`]
#[derive(Debug, Serialize)]
pub struct SnapshotEntry<'a> {
    /// The item record
    #[serde(flatten)]
    pub item: &'a Item,
    /// Due date while on loan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Summary counters for a catalog
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Items in the catalog
    pub total_items: usize,
    /// Items per kind label
    pub by_kind: BTreeMap<&'static str, usize>,
    /// Items currently on loan
    pub on_loan: usize,
    /// Items past their due date
    pub overdue: usize,
    /// History entries kept
    pub history_entries: usize,
    /// Borrow count per item, from the kept history
    pub borrows: BTreeMap<ItemId, usize>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Catalog Statistics ===")?;
        writeln!(f, "Total items: {}", self.total_items)?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "  {kind}: {count}")?;
        }
        writeln!(f, "On loan: {}", self.on_loan)?;
        writeln!(f, "Overdue: {}", self.overdue)?;
        writeln!(f, "History entries: {}", self.history_entries)?;

        if !self.borrows.is_empty() {
            writeln!(f, "\nBorrow counts:")?;
            for (id, count) in &self.borrows {
                writeln!(f, "  {id}: {count} times")?;
            }
        }
        Ok(())
    }
}

impl Report {
    /// Catalog listing, one `describe()` line per item
    #[must_use]
    pub fn catalog_listing(catalog: &Catalog) -> String {
        let mut listing = String::from("--- Catalog ---\n");
        for item in catalog.items() {
            listing.push_str(&item.describe());
            listing.push('\n');
        }
        listing.push_str("---------------\n");
        listing
    }

    /// Borrowed items with their due dates
    #[must_use]
    pub fn loans(catalog: &Catalog) -> String {
        let mut out = String::new();
        for item in catalog.items() {
            if let Some(due_date) = catalog.due_date(item.id()) {
                let _ = writeln!(out, "{} '{}' due {due_date}", item.id(), item.title());
            }
        }
        if out.is_empty() {
            out.push_str("No items on loan.\n");
        }
        out
    }

    /// Format a status for display
    fn format_status(status: ItemStatus) -> &'static str {
        match status {
            ItemStatus::Available => "📚 Available",
            ItemStatus::Borrowed => "📖 Borrowed",
        }
    }

    /// Format an event for display
    fn format_event(event: LoanEvent) -> String {
        match event {
            LoanEvent::Borrow { days } => format!("Borrow ({days}d)"),
            LoanEvent::Return => "Return".to_string(),
        }
    }

    /// Generate a markdown table of the history
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history_table(transitions: &[Transition]) -> String {
        if transitions.is_empty() {
            return "No transitions recorded yet.".to_string();
        }

        let mut table = String::from("| # | Date | Item | From | Event | To |\n");
        table.push_str("|---|------|------|------|-------|----|\n");

        for (i, transition) in transitions.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} |",
                i + 1,
                transition.on,
                transition.item_id,
                Self::format_status(transition.from),
                Self::format_event(transition.event),
                Self::format_status(transition.to)
            );
        }

        table
    }

    /// Collect summary counters for a catalog
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn stats(catalog: &Catalog) -> Stats {
        let mut stats = Stats {
            total_items: catalog.len(),
            on_loan: catalog.on_loan(),
            overdue: catalog.overdue_items().len(),
            history_entries: catalog.get_history().len(),
            ..Stats::default()
        };

        for item in catalog.items() {
            *stats.by_kind.entry(item.kind().label()).or_insert(0) += 1;
        }

        // Count how many times each item was borrowed
        for transition in catalog.get_history() {
            if matches!(transition.event, LoanEvent::Borrow { .. }) {
                *stats.borrows.entry(transition.item_id).or_insert(0) += 1;
            }
        }

        stats
    }

    /// Build a serializable view of the catalog
    #[must_use]
    pub fn snapshot(catalog: &Catalog) -> Snapshot<'_> {
        Snapshot {
            today: catalog.today(),
            items: catalog
                .items()
                .map(|item| SnapshotEntry { item, due_date: catalog.due_date(item.id()) })
                .collect(),
            overdue: catalog.overdue_items(),
        }
    }

    /// Pretty-printed JSON of [`Report::snapshot`]
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the snapshot cannot be encoded.
    pub fn snapshot_json(catalog: &Catalog) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::snapshot(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::FixedClock, config::LoanPolicy};

    /// Catalog with one book on loan since 2024-05-01
    #[allow(clippy::expect_used)]
    fn catalog_with_loan() -> (Catalog, FixedClock) {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid fixture date");
        let clock = FixedClock::new(start);
        let mut catalog = Catalog::new(LoanPolicy::default(), clock.clone());
        catalog.add_item(Item::book(1, "Dune", "Frank Herbert", 412));
        catalog.add_item(Item::e_magazine(2, "Wired", "Conde Nast", 12));
        assert!(catalog.borrow(1, 10).is_ok());
        (catalog, clock)
    }

    #[test]
    fn listing_has_one_line_per_item() {
        let (catalog, _clock) = catalog_with_loan();
        let listing = Report::catalog_listing(&catalog);

        assert!(listing.contains("[Book] ID: 1, Title: Dune, Author: Frank Herbert, Pages: 412, Status: Borrowed"));
        assert!(listing.contains("[E-Magazine] ID: 2, Title: Wired, Publisher: Conde Nast, Issue: 12, Status: Available"));
        assert_eq!(listing.lines().count(), 4);
    }

    #[test]
    fn loans_lists_due_dates() {
        let (catalog, _clock) = catalog_with_loan();
        assert_eq!(Report::loans(&catalog), "1 'Dune' due 2024-05-11\n");
    }

    #[test]
    fn history_table_rows() {
        let (catalog, _clock) = catalog_with_loan();
        let table = Report::history_table(catalog.get_history());

        assert!(table.starts_with("| # | Date | Item | From | Event | To |"));
        assert!(table.contains("| 1 | 2024-05-01 | 1 | 📚 Available | Borrow (10d) | 📖 Borrowed |"));
        assert_eq!(Report::history_table(&[]), "No transitions recorded yet.");
    }

    #[test]
    fn stats_count_kinds_loans_and_overdue() {
        let (catalog, clock) = catalog_with_loan();
        clock.advance(11);
        let stats = Report::stats(&catalog);

        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.by_kind.get("Book"), Some(&1));
        assert_eq!(stats.by_kind.get("E-Magazine"), Some(&1));
        assert_eq!(stats.on_loan, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.borrows.get(&1), Some(&1));
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn snapshot_json_includes_due_dates() {
        let (catalog, _clock) = catalog_with_loan();
        let json = Report::snapshot_json(&catalog).expect("snapshot serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("snapshot is valid JSON");

        assert_eq!(value["today"], "2024-05-01");
        assert_eq!(value["items"][0]["kind"], "book");
        assert_eq!(value["items"][0]["due_date"], "2024-05-11");
        assert_eq!(value["items"][1]["is_archived"], false);
        assert!(value["items"][1].get("due_date").is_none());
    }
}
