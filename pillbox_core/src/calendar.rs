//! Calendar-day keys.
//!
//! Timestamps are local wall-clock times. Two timestamps fall on the same
//! calendar day iff their year, month and day all match; the time of day
//! never takes part in grouping or ordering of days.

use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encode a timestamp's calendar day as `10000*year + 100*month + day`.
///
/// The encoding is monotonic for years 1 CE onward, so it can be used for
/// sorting, deduplication and as a map key. Earlier years all encode as
/// year 0; history files reject them when parsed.
pub fn day_number(ts: NaiveDateTime) -> u32 {
    CalendarDay::of(ts).number()
}

/// True iff both timestamps fall on the same calendar day
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    day_number(a) == day_number(b)
}

/// A date truncated to (year, month, day)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar day a timestamp falls on
    pub fn of(ts: NaiveDateTime) -> Self {
        Self(ts.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn number(&self) -> u32 {
        // Years before 0 CE are not meaningful for an inventory
        let year = self.0.year().max(0) as u32;
        10_000 * year + 100 * self.0.month() + self.0.day()
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        Self::of(ts) == *self
    }

    /// The following calendar day
    pub fn succ(&self) -> Result<Self> {
        self.0
            .succ_opt()
            .map(Self)
            .ok_or(Error::DateOutOfRange(self.0))
    }

    /// The last representable instant of this day (23:59:59.999999999).
    ///
    /// Any real timestamp on the same day compares less than or equal to it.
    pub fn end_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN) + Duration::nanoseconds(NANOS_PER_DAY - 1)
    }

    /// Every day from `first` through `last`, inclusive, without gaps.
    ///
    /// Empty when `last` precedes `first`.
    pub fn range_inclusive(first: Self, last: Self) -> DayRange {
        DayRange {
            next: Some(first),
            last,
        }
    }
}

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Iterator over a contiguous run of calendar days
#[derive(Clone, Debug)]
pub struct DayRange {
    next: Option<CalendarDay>,
    last: CalendarDay,
}

impl Iterator for DayRange {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        let current = self.next.filter(|day| *day <= self.last)?;
        self.next = current.0.succ_opt().map(CalendarDay);
        Some(current)
    }
}
