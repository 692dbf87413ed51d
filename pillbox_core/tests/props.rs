use chrono::{Duration, NaiveDate, NaiveDateTime};
use pillbox_core::{
    collapse_events, normalize_events, project_ledger, Created, Error, Event, RawEvent,
    RunningState,
};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn stamp(day: i64, minute: i64) -> NaiveDateTime {
    base() + Duration::days(day) + Duration::minutes(minute)
}

fn created(pills: i64, dose: i64) -> Created {
    Created {
        date: stamp(0, 9 * 60),
        amount: pills,
        per_day: dose,
    }
}

/// (day offset, minute of day, event)
fn arb_raw_event() -> impl Strategy<Value = (i64, i64, RawEvent)> {
    (0..20i64, 0..1440i64, any::<bool>(), 0..50i64).prop_map(|(day, minute, restock, n)| {
        let date = stamp(day, minute);
        let event = if restock {
            RawEvent::Restock { date, amount: n }
        } else {
            RawEvent::DoseChanged { date, per_day: n % 5 }
        };
        (day, minute, event)
    })
}

fn arb_history() -> impl Strategy<Value = Vec<(i64, i64, RawEvent)>> {
    proptest::collection::vec(arb_raw_event(), 0..40)
}

fn raw_events(history: &[(i64, i64, RawEvent)]) -> Vec<RawEvent> {
    history.iter().map(|(_, _, e)| e.clone()).collect()
}

fn last_day(history: &[(i64, i64, RawEvent)]) -> i64 {
    history.iter().map(|(day, _, _)| *day).max().unwrap_or(0)
}

/// Straightforward day-by-day replay used as an oracle
fn reference_amounts(pills: i64, dose: i64, history: &[(i64, i64, RawEvent)]) -> Vec<i64> {
    let mut pills = pills;
    let mut dose = dose;
    let mut amounts = Vec::new();

    for day in 0..=last_day(history) {
        let mut todays: Vec<&(i64, i64, RawEvent)> =
            history.iter().filter(|(d, _, _)| *d == day).collect();
        todays.sort_by_key(|(_, minute, _)| *minute);

        for (_, _, event) in todays {
            match event {
                RawEvent::Restock { amount, .. } => pills += amount,
                RawEvent::DoseChanged { per_day, .. } => dose = *per_day,
            }
        }
        pills -= dose;
        amounts.push(pills);
    }
    amounts
}

// Exactly one end-of-day marker per day from creation through the last
// event, in ascending order without gaps.
proptest! {
    #[test]
    fn prop_one_end_of_day_per_day(history in arb_history()) {
        let events = normalize_events(&created(10, 1), &raw_events(&history)).unwrap();

        let closed: Vec<NaiveDate> = events
            .iter()
            .filter(|e| e.is_end_of_day())
            .map(|e| e.day().date())
            .collect();

        let expected: Vec<NaiveDate> = (0..=last_day(&history))
            .map(|d| stamp(d, 0).date())
            .collect();
        prop_assert_eq!(closed, expected);
    }
}

// Every raw event appears once, before its own day's marker, and the
// sequence is chronological.
proptest! {
    #[test]
    fn prop_raw_events_kept_and_ordered(history in arb_history()) {
        let raw = raw_events(&history);
        let events = normalize_events(&created(10, 1), &raw).unwrap();

        prop_assert_eq!(events.len(), raw.len() + (last_day(&history) as usize + 1));

        for pair in events.windows(2) {
            prop_assert!(pair[0].date() <= pair[1].date());
            if pair[0].is_end_of_day() {
                prop_assert!(pair[1].day() > pair[0].day());
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_ledger_matches_day_by_day_replay(
        history in arb_history(),
        pills in 0..200i64,
        dose in 0..5i64,
    ) {
        let ledger = project_ledger(&created(pills, dose), &raw_events(&history)).unwrap();

        let amounts: Vec<i64> = ledger.iter().map(|d| d.amount).collect();
        prop_assert_eq!(amounts, reference_amounts(pills, dose, &history));

        let indices: Vec<u32> = ledger.iter().map(|d| d.index).collect();
        let expected: Vec<u32> = (0..ledger.len() as u32).collect();
        prop_assert_eq!(indices, expected);
    }
}

proptest! {
    #[test]
    fn prop_normalization_is_repeatable(history in arb_history()) {
        let raw = raw_events(&history);
        let snapshot = raw.clone();

        let first = normalize_events(&created(10, 1), &raw).unwrap();
        let second = normalize_events(&created(10, 1), &raw).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(raw, snapshot);
    }
}

// Restocks alone never touch the dose and add exactly their sum.
proptest! {
    #[test]
    fn prop_restocks_conserve_pills(amounts in proptest::collection::vec(0..100i64, 0..20)) {
        let seed = created(7, 3);
        let mut state = RunningState::from(&seed);

        for amount in &amounts {
            let emitted = state
                .apply(&Event::Restock { date: stamp(0, 600), amount: *amount })
                .unwrap();
            prop_assert!(emitted.is_none());
        }

        prop_assert_eq!(state.dose_per_day, 3);
        prop_assert_eq!(state.pills_left, 7 + amounts.iter().sum::<i64>());
    }
}

proptest! {
    #[test]
    fn prop_event_before_creation_rejected(
        history in arb_history(),
        days_early in 1..30i64,
        position in 0..40usize,
    ) {
        let mut raw = raw_events(&history);
        let early = RawEvent::Restock { date: stamp(-days_early, 720), amount: 1 };
        raw.insert(position.min(raw.len()), early);

        let result = project_ledger(&created(10, 1), &raw);
        let is_temporal_fault = matches!(result, Err(Error::TemporalOrdering { .. }));
        prop_assert!(is_temporal_fault);
    }
}

// Removing any one day's marker makes the fold fault instead of
// silently skipping it.
proptest! {
    #[test]
    fn prop_missing_day_faults(span in 2..15i64, gap in 0..14i64) {
        let gap = gap % (span - 1);
        let seed = created(100, 1);

        let events: Vec<Event> = (0..span)
            .filter(|d| *d != gap)
            .map(|d| Event::EndOfDay { date: stamp(d, 1439) })
            .collect();

        let result = collapse_events(RunningState::from(&seed), events);
        let is_skipped_day = matches!(result, Err(Error::SkippedDay { .. }));
        prop_assert!(is_skipped_day);
    }
}
