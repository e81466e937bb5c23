//! Per-item results for best-effort batch jobs (labels, lists).

use serde::Serialize;

use crate::error::{PrintError, PrintResult};

/// The result for one item in a batch.
#[derive(Debug)]
pub struct ItemOutcome {
    /// What identifies the item to an operator (barcode, product name)
    pub key: String,
    pub result: PrintResult<()>,
}

impl ItemOutcome {
    pub fn ok(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            result: Ok(()),
        }
    }

    pub fn failed(key: impl Into<String>, error: PrintError) -> Self {
        Self {
            key: key.into(),
            result: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

/// Counts for logging and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub printed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| o.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &PrintError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.key.as_str(), e)))
    }

    /// True when every item went through.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ItemOutcome::is_ok)
    }

    pub fn summary(&self) -> BatchSummary {
        let printed = self.succeeded().count();
        BatchSummary {
            printed,
            failed: self.outcomes.len() - printed,
        }
    }
}

impl Extend<ItemOutcome> for BatchReport {
    fn extend<I: IntoIterator<Item = ItemOutcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}
