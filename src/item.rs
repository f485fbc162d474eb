//! Catalog item records.
//!
//! Every item shares an identity core (id, title, attribution, borrowed flag)
//! and carries a kind-specific payload in [`ItemKind`].

use std::fmt;

use serde::Serialize;

use crate::item_status::ItemStatus;

/// Identifier assigned to an item when it is catalogued
pub type ItemId = u32;

/// Kind-specific part of an item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Printed book
    Book {
        /// Number of pages
        page_count: u32,
    },
    /// Spoken-word recording
    Audiobook {
        /// Running time in minutes
        duration_minutes: u32,
    },
    /// Digital magazine issue
    EMagazine {
        /// Issue number within the publication
        issue_number: u32,
        /// Whether the issue has been moved to the archive
        is_archived: bool,
    },
}

impl ItemKind {
    /// Tag printed at the start of a catalog line
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Book { .. } => "Book",
            Self::Audiobook { .. } => "Audiobook",
            Self::EMagazine { .. } => "E-Magazine",
        }
    }

    /// What the attribution field means for this kind
    #[must_use]
    pub const fn attribution_label(&self) -> &'static str {
        match self {
            Self::Book { .. } | Self::Audiobook { .. } => "Author",
            Self::EMagazine { .. } => "Publisher",
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Catalog identifier, never reassigned
    id: ItemId,
    /// Display title
    title: String,
    /// Author, or publisher for magazines
    attribution: String,
    /// Set while the item is out on loan
    is_borrowed: bool,
    /// Kind-specific payload
    #[serde(flatten)]
    kind: ItemKind,
}

impl Item {
    /// Build an item from its parts; new items are always available
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        attribution: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Self { id, title: title.into(), attribution: attribution.into(), is_borrowed: false, kind }
    }

    /// A printed book
    #[must_use]
    pub fn book(
        id: ItemId,
        title: impl Into<String>,
        author: impl Into<String>,
        page_count: u32,
    ) -> Self {
        Self::new(id, title, author, ItemKind::Book { page_count })
    }

    /// An audiobook
    #[must_use]
    pub fn audiobook(
        id: ItemId,
        title: impl Into<String>,
        author: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self::new(id, title, author, ItemKind::Audiobook { duration_minutes })
    }

    /// A digital magazine issue, not yet archived
    #[must_use]
    pub fn e_magazine(
        id: ItemId,
        title: impl Into<String>,
        publisher: impl Into<String>,
        issue_number: u32,
    ) -> Self {
        Self::new(id, title, publisher, ItemKind::EMagazine { issue_number, is_archived: false })
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    #[must_use]
    pub const fn kind(&self) -> &ItemKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        self.is_borrowed
    }

    /// Current lending status
    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        ItemStatus::from_borrowed(self.is_borrowed)
    }

    /// Page count, for books
    #[must_use]
    pub const fn page_count(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Book { page_count } => Some(page_count),
            _ => None,
        }
    }

    /// Running time as `"{hours}h {minutes}m"`, for audiobooks
    #[must_use]
    pub fn duration(&self) -> Option<String> {
        match self.kind {
            ItemKind::Audiobook { duration_minutes } => Some(format_duration(duration_minutes)),
            _ => None,
        }
    }

    /// Issue number, for e-magazines
    #[must_use]
    pub const fn issue_number(&self) -> Option<u32> {
        match self.kind {
            ItemKind::EMagazine { issue_number, .. } => Some(issue_number),
            _ => None,
        }
    }

    /// Whether this is an archived e-magazine issue
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self.kind, ItemKind::EMagazine { is_archived: true, .. })
    }

    /// Render the kind-tagged catalog line for this item
    #[must_use]
    pub fn describe(&self) -> String {
        let Self { id, title, attribution, kind, .. } = self;
        let status = self.status();
        let tag = kind.label();
        let who = kind.attribution_label();
        let detail = match kind {
            ItemKind::Book { page_count } => format!("Pages: {page_count}"),
            ItemKind::Audiobook { duration_minutes } => {
                format!("Duration: {}", format_duration(*duration_minutes))
            }
            ItemKind::EMagazine { issue_number, .. } => format!("Issue: {issue_number}"),
        };
        format!("[{tag}] ID: {id}, Title: {title}, {who}: {attribution}, {detail}, Status: {status}")
    }

    /// Only the catalog's state machine flips the borrowed flag
    pub(crate) fn set_borrowed(&mut self, is_borrowed: bool) {
        self.is_borrowed = is_borrowed;
    }

    /// Mark an e-magazine issue as archived; returns false for other kinds
    pub(crate) fn archive(&mut self) -> bool {
        match &mut self.kind {
            ItemKind::EMagazine { is_archived, .. } => {
                *is_archived = true;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Split a minute count into `"{hours}h {minutes}m"`
#[must_use]
pub fn format_duration(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_kind() {
        let book = Item::book(105, "Death Note Vol. 1", "Tsugumi Ohba & Takeshi Obata", 195);
        assert_eq!(
            book.describe(),
            "[Book] ID: 105, Title: Death Note Vol. 1, Author: Tsugumi Ohba & Takeshi Obata, \
             Pages: 195, Status: Available"
        );

        let audio = Item::audiobook(204, "Attack on Titan Vol. 1", "Hajime Isayama", 240);
        assert_eq!(
            audio.describe(),
            "[Audiobook] ID: 204, Title: Attack on Titan Vol. 1, Author: Hajime Isayama, \
             Duration: 4h 0m, Status: Available"
        );

        let mag = Item::e_magazine(301, "National Geographic", "Nat Geo Society", 245);
        assert_eq!(
            mag.describe(),
            "[E-Magazine] ID: 301, Title: National Geographic, Publisher: Nat Geo Society, \
             Issue: 245, Status: Available"
        );
    }

    #[test]
    fn status_follows_borrowed_flag() {
        let mut book = Item::book(1, "Dune", "Frank Herbert", 412);
        assert_eq!(book.status(), ItemStatus::Available);

        book.set_borrowed(true);
        assert_eq!(book.status(), ItemStatus::Borrowed);
        assert!(book.describe().ends_with("Status: Borrowed"));
    }

    #[test]
    fn duration_splits_hours_and_minutes() {
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(135), "2h 15m");
    }

    #[test]
    fn kind_accessors_only_answer_for_their_kind() {
        let book = Item::book(1, "Dune", "Frank Herbert", 412);
        let audio = Item::audiobook(2, "Dune", "Frank Herbert", 1263);

        assert_eq!(book.page_count(), Some(412));
        assert_eq!(book.duration(), None);
        assert_eq!(audio.duration().as_deref(), Some("21h 3m"));
        assert_eq!(audio.issue_number(), None);
    }

    #[test]
    fn only_magazines_can_be_archived() {
        let mut mag = Item::e_magazine(3, "Wired", "Conde Nast", 12);
        let mut book = Item::book(4, "Dune", "Frank Herbert", 412);

        assert!(!mag.is_archived());
        assert!(mag.archive());
        assert!(mag.is_archived());
        assert!(!book.archive());
        assert!(!book.is_archived());
    }
}
