//! Shared time axis for stage timelines rendered side by side.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDomain {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeDomain {
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Position of `instant` on the axis as a fraction of the span: 0 at
    /// `start`, 1 at `end`, outside [0, 1] beyond the bounds. A zero-length
    /// domain maps everything to 0.
    pub fn position(&self, instant: DateTime<Utc>) -> f64 {
        let span = self.span().num_milliseconds();
        if span <= 0 {
            return 0.0;
        }
        (instant - self.start).num_milliseconds() as f64 / span as f64
    }

    fn widen(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start.min(start),
            end: self.end.max(end),
        }
    }
}

/// A stage timeline together with whether the user has it expanded.
#[derive(Debug, Clone, Copy)]
pub struct OpenSnapshot<'a> {
    pub snapshot: &'a Snapshot,
    pub open: bool,
}

impl<'a> OpenSnapshot<'a> {
    pub fn new(snapshot: &'a Snapshot, open: bool) -> Self {
        Self { snapshot, open }
    }
}

/// Bounds over all records of the open snapshots. `None` when nothing is
/// open or the open snapshots hold no record with a usable timestamp;
/// callers then fall back to [`local_bounds`].
pub fn compute_domain<'a, I>(lanes: I) -> Option<TimeDomain>
where
    I: IntoIterator<Item = OpenSnapshot<'a>>,
{
    lanes
        .into_iter()
        .filter(|lane| lane.open)
        .filter_map(|lane| local_bounds(lane.snapshot))
        .reduce(|acc, bounds| acc.widen(bounds.start, bounds.end))
}

/// Bounds of a single snapshot's own records.
pub fn local_bounds(snapshot: &Snapshot) -> Option<TimeDomain> {
    snapshot
        .records()
        .iter()
        .filter_map(|record| record.interval())
        .fold(None, |acc: Option<TimeDomain>, (start, end)| {
            Some(match acc {
                Some(domain) => domain.widen(start, end),
                None => TimeDomain { start, end },
            })
        })
}

/// The shared domain when there is one, otherwise the snapshot's own bounds.
pub fn domain_or_local(shared: Option<TimeDomain>, snapshot: &Snapshot) -> Option<TimeDomain> {
    shared.or_else(|| local_bounds(snapshot))
}
