//! Medication history loading.
//!
//! A history file is a JSON document holding the creation record and the
//! raw events supplied by the user:
//!
//! ```json
//! {
//!   "created": { "date": "2024-01-15T08:00:00", "amount": 60, "per_day": 2 },
//!   "events": [
//!     { "type": "restock", "date": "2024-01-20", "amount": 30 },
//!     { "type": "dose_changed", "date": "2024-01-22T09:00:00", "per_day": 1 }
//!   ]
//! }
//! ```

use crate::{project_ledger, Created, Error, Ledger, RawEvent, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete medication history: the seed record plus raw events
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct History {
    pub created: Created,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

impl History {
    /// Load a history from a JSON file
    ///
    /// Unlike optional inputs, a missing history is an error: there is
    /// nothing to project without it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::History(format!(
                "no medication history found at {:?}",
                path
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let history: History = serde_json::from_str(&contents)?;

        tracing::info!(
            "Loaded history from {:?}: created {}, {} events",
            path,
            history.created.day(),
            history.events.len()
        );

        Ok(history)
    }

    /// Run the pipeline over this history
    pub fn ledger(&self) -> Result<Ledger> {
        project_ledger(&self.created, &self.events)
    }
}
