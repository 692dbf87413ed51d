//! Sequential fold of a normalized event sequence into a ledger.
//!
//! Events are consumed strictly left to right. Every event must fall on
//! the current day cursor; a mismatch means the sequence has a gap or is
//! out of order, and the fold aborts rather than repair it.

use crate::{Day, Error, Event, Ledger, Result, RunningState};

impl RunningState {
    /// Apply one event to the running state
    ///
    /// Returns the closed day's ledger entry for an end-of-day marker and
    /// `None` otherwise.
    ///
    /// # Errors
    /// Returns [`Error::SkippedDay`] if the event is not dated on `today`.
    pub fn apply(&mut self, event: &Event) -> Result<Option<Day>> {
        if event.day() != self.today {
            return Err(Error::SkippedDay {
                expected: self.today.date(),
                found: event.day().date(),
            });
        }

        match *event {
            Event::DoseChanged { per_day, .. } => {
                tracing::debug!("{}: dose changed to {} per day", self.today, per_day);
                self.dose_per_day = per_day;
                Ok(None)
            }
            Event::Restock { amount, .. } => {
                tracing::debug!("{}: restocked {} pills", self.today, amount);
                self.pills_left = self.adjusted(amount, self.pills_left.checked_add(amount))?;
                Ok(None)
            }
            Event::EndOfDay { .. } => {
                let dose = self.dose_per_day;
                self.pills_left = self.adjusted(dose, self.pills_left.checked_sub(dose))?;
                let closed = Day {
                    index: self.days_closed,
                    date: self.today.date(),
                    amount: self.pills_left,
                };
                self.today = self.today.succ()?;
                self.days_closed += 1;
                Ok(Some(closed))
            }
        }
    }

    fn adjusted(&self, change: i64, result: Option<i64>) -> Result<i64> {
        result.ok_or(Error::CountOutOfRange {
            day: self.today.date(),
            pills: self.pills_left,
            change,
        })
    }
}

/// Fold a normalized event sequence into a ledger
///
/// `state` is consumed; each call works on its own running state.
///
/// # Errors
/// Returns [`Error::SkippedDay`] when the sequence and the day cursor
/// diverge. No partial ledger is returned.
pub fn collapse_events<I>(mut state: RunningState, events: I) -> Result<Ledger>
where
    I: IntoIterator<Item = Event>,
{
    let mut ledger = Ledger::new();

    for event in events {
        if let Some(day) = state.apply(&event)? {
            ledger.push(day);
        }
    }

    if let Some(day) = ledger.first_shortfall() {
        tracing::warn!("Out of stock from {} (day {})", day.date, day.index);
    }

    Ok(ledger)
}
