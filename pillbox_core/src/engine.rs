//! The normalize-then-fold pipeline.

use crate::{collapse_events, normalize_events, Created, Ledger, RawEvent, Result, RunningState};

/// Project the per-day ledger for a medication history
///
/// Pure and deterministic: the same inputs always produce the same ledger
/// or the same error. A fresh running state is seeded from `created` on
/// every call.
pub fn project_ledger(created: &Created, events: &[RawEvent]) -> Result<Ledger> {
    let normalized = normalize_events(created, events)?;
    let state = RunningState::from(created);

    let ledger = collapse_events(state, normalized)?;

    tracing::info!(
        "Projected {} days from {}, {:?} pills remaining",
        ledger.len(),
        created.day(),
        ledger.remaining()
    );

    Ok(ledger)
}
