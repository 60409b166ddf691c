//! The trailing twelve month window used by the dashboard month selector and
//! the statistics chart. The window is generated client-side from today's
//! date; the backend only ever sees month and year numbers.

use time::{Date, Month, OffsetDateTime};

/// One calendar month in the trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    /// The calendar month number, 1 (January) through 12 (December).
    pub id: u8,
    pub year: i32,
    /// The month's English name, e.g. "January".
    pub name: String,
}

impl MonthBucket {
    fn new(month: Month, year: i32) -> Self {
        Self {
            id: month as u8,
            year,
            name: month.to_string(),
        }
    }

    /// A label for the month selector, e.g. "January 2026".
    pub(crate) fn label(&self) -> String {
        format!("{} {}", self.name, self.year)
    }
}

/// The last twelve months in ascending order, ending with the month of
/// `today`. Used by the statistics chart.
pub(crate) fn trailing_months(today: Date) -> Vec<MonthBucket> {
    let mut month = today.month();
    let mut year = today.year();
    let mut buckets = Vec::with_capacity(12);

    for _ in 0..12 {
        buckets.push(MonthBucket::new(month, year));

        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    buckets.reverse();
    buckets
}

/// The last twelve months with the current month first. Used by the dashboard
/// month selector so the default selection is the current month.
pub(crate) fn trailing_months_newest_first(today: Date) -> Vec<MonthBucket> {
    let mut buckets = trailing_months(today);
    buckets.reverse();
    buckets
}

/// The current date in UTC.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
