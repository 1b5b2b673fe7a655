//! Aggregate statistics over sweep records.

use super::SweepRecord;
use crate::barrier::Classification;

/// Counts and rates over a completed sweep.
///
/// Rates are taken over the rows each check actually evaluated and are
/// `None` when no row was evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepSummary {
    /// Rows in the sweep.
    pub rows: usize,
    /// Rows with a determinate knock-out result.
    pub knock_out_evaluated: usize,
    /// Rows classified `KnockOut`.
    pub knock_outs: usize,
    /// Rows with a determinate neither result.
    pub neither_evaluated: usize,
    /// Rows classified `NeitherKnockInNorKnockOut`.
    pub neithers: usize,
}

impl SweepSummary {
    /// Tallies `records`.
    pub fn from_records(records: &[SweepRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.rows += 1;
            if !r.knock_out.is_indeterminate() {
                acc.knock_out_evaluated += 1;
            }
            if r.knock_out == Classification::KnockOut {
                acc.knock_outs += 1;
            }
            if !r.neither.is_indeterminate() {
                acc.neither_evaluated += 1;
            }
            if r.neither == Classification::NeitherKnockInNorKnockOut {
                acc.neithers += 1;
            }
            acc
        })
    }

    /// Share of evaluated rows that knocked out.
    pub fn knock_out_rate(&self) -> Option<f64> {
        ratio(self.knock_outs, self.knock_out_evaluated)
    }

    /// Share of evaluated rows that breached neither barrier.
    pub fn neither_rate(&self) -> Option<f64> {
        ratio(self.neithers, self.neither_evaluated)
    }
}

fn ratio(hits: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| hits as f64 / total as f64)
}
