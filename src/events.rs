use serde::{Deserialize, Serialize};

/// Events that can cause an item status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanEvent {
    /// Lend an item out for the given number of calendar days
    Borrow {
        /// Loan length; zero means the item is due back today
        days: u32,
    },
    /// Bring a borrowed item back to the library
    Return,
}
