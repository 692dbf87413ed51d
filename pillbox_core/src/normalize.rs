//! Event normalization.
//!
//! Turns a creation record and the raw events of a history into one
//! contiguous, deterministically ordered event sequence:
//! - exactly one synthesized end-of-day marker per calendar day, from the
//!   creation day through the last event's day
//! - raw events bucketed by day, input order preserved within a day
//! - each day's end-of-day marker last within that day

use crate::{CalendarDay, Created, Error, Event, RawEvent, Result};
use std::collections::BTreeMap;

/// Normalize raw events into the sequence consumed by the fold.
///
/// The input is only borrowed; every returned event is a new value.
///
/// # Errors
/// Returns [`Error::TemporalOrdering`] if any raw event falls on a day
/// before the creation day. No partial sequence is returned.
pub fn normalize_events(created: &Created, raw: &[RawEvent]) -> Result<Vec<Event>> {
    let first_day = created.day();

    if let Some(early) = raw.iter().find(|e| e.day() < first_day) {
        return Err(Error::TemporalOrdering {
            event_day: early.day().date(),
            created_day: first_day.date(),
        });
    }

    let last_day = raw.iter().map(RawEvent::day).max().unwrap_or(first_day);

    // One bucket per day in the span, so days without raw events still close
    let mut buckets: BTreeMap<CalendarDay, Vec<Event>> =
        CalendarDay::range_inclusive(first_day, last_day)
            .map(|day| (day, Vec::new()))
            .collect();

    for event in raw {
        buckets.entry(event.day()).or_default().push(Event::from(event));
    }

    let mut events = Vec::with_capacity(raw.len() + buckets.len());
    for (day, mut bucket) in buckets {
        bucket.push(Event::end_of_day(day));
        events.append(&mut bucket);
    }

    // Day first, its marker last, then time. Stable, so same-instant
    // events keep their bucket order.
    events.sort_by_key(|e| (e.day(), e.is_end_of_day(), e.date()));

    tracing::debug!(
        "Normalized {} raw events into {} events spanning {} through {}",
        raw.len(),
        events.len(),
        first_day,
        last_day
    );

    Ok(events)
}
