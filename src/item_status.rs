use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the lending state of a single catalog item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ItemStatus {
    /// Item is on the shelf and can be borrowed
    #[default]
    Available,
    /// Item is out on loan and has a due date
    Borrowed,
}

impl ItemStatus {
    /// Status derived from an item's borrowed flag
    #[must_use]
    pub const fn from_borrowed(is_borrowed: bool) -> Self {
        if is_borrowed { Self::Borrowed } else { Self::Available }
    }

    /// Short label used in catalog listings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed => "Borrowed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
