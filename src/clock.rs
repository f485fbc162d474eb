//! Calendar access for the lending state machine.
//!
//! The catalog never reads the system date directly; it asks a [`Clock`]
//! once per operation so tests and the demo can pin "today".

use std::{cell::Cell, fmt, rc::Rc};

use chrono::{Days, Local, NaiveDate};

/// Source of the current calendar date
pub trait Clock: fmt::Debug {
    /// The date to use as "today" for a borrow or return
    fn today(&self) -> NaiveDate;
}

/// Reads the local system calendar
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A calendar pinned to a chosen date
///
/// Clones share the same date, so a handle kept outside the catalog can move
/// time forward for the catalog's copy.
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// Shared current date
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    /// Pin the calendar to `today`
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Rc::new(Cell::new(today)) }
    }

    /// Jump to an arbitrary date
    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the calendar forward by whole days
    ///
    /// The date stays put if the result would leave the supported calendar.
    pub fn advance(&self, days: u32) {
        let today = self.today.get();
        let Some(next) = today.checked_add_days(Days::new(u64::from(days))) else {
            log::warn!("cannot advance {today} by {days} days; keeping the date");
            return;
        };
        self.today.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::expect_used)]
    fn clones_share_the_pinned_date() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).expect("valid fixture date");
        let clock = FixedClock::new(start);
        let handle = clock.clone();

        handle.advance(3);
        assert_eq!(Some(clock.today()), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(clock.today(), handle.today());
    }

    #[test]
    fn advance_past_calendar_end_is_rejected() {
        let clock = FixedClock::new(NaiveDate::MAX);
        clock.advance(1);
        assert_eq!(clock.today(), NaiveDate::MAX);
    }
}
