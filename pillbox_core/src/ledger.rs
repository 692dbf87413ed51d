//! The ledger: one snapshot of remaining pills per simulated day.

use crate::{Day, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Ordered per-day snapshots, one per calendar day, ascending
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: Vec<Day>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are appended by the fold only, in day order.
    pub(crate) fn push(&mut self, day: Day) {
        self.days.push(day);
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Day> {
        self.days.iter()
    }

    pub fn last(&self) -> Option<&Day> {
        self.days.last()
    }

    /// Pills remaining at the close of the last day
    pub fn remaining(&self) -> Option<i64> {
        self.last().map(|d| d.amount)
    }

    /// The first day that closed with fewer than zero pills
    pub fn first_shortfall(&self) -> Option<&Day> {
        self.days.iter().find(|d| d.amount < 0)
    }

    /// Write the ledger as CSV (`index,date,amount`), replacing `path`
    ///
    /// The file is synced to disk before returning.
    pub fn write_csv(&self, path: &Path) -> Result<usize> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        for day in &self.days {
            writer.serialize(day)?;
        }

        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        file.sync_all()?;

        tracing::info!("Wrote {} ledger days to {:?}", self.days.len(), path);
        Ok(self.days.len())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Day;
    type IntoIter = std::slice::Iter<'a, Day>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

impl IntoIterator for Ledger {
    type Item = Day;
    type IntoIter = std::vec::IntoIter<Day>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}
