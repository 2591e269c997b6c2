use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Chart-wide unique bar identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarId(String);

impl BarId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BarId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BarId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Closed time interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl BarInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> GanttResult<Self> {
        if start > end {
            return Err(GanttError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn end(self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    /// Strict overlap: intervals that only touch do not overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Moves both ends by `delta`; `None` when either end leaves chrono's range.
    #[must_use]
    pub fn shifted(self, delta: TimeDelta) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add_signed(delta)?,
            end: self.end.checked_add_signed(delta)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    StartToStart,
    StartToFinish,
    FinishToStart,
    FinishToFinish,
}

impl Default for ConnectionKind {
    fn default() -> Self {
        Self::FinishToStart
    }
}

/// Directed dependency edge from the owning bar to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub target: BarId,
    #[serde(default)]
    pub kind: ConnectionKind,
}

impl Connection {
    #[must_use]
    pub fn new(target: impl Into<BarId>, kind: ConnectionKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub id: BarId,
    pub interval: BarInterval,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub immobile: bool,
    #[serde(default)]
    pub bundle: Option<String>,
    /// `None` means the chart-level policy applies.
    #[serde(default)]
    pub push_on_overlap: Option<bool>,
    #[serde(default)]
    pub push_on_connect: Option<bool>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub milestone: Option<String>,
}

impl Bar {
    pub fn new(
        id: impl Into<BarId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> GanttResult<Self> {
        Ok(Self {
            id: id.into(),
            interval: BarInterval::new(start, end)?,
            label: None,
            immobile: false,
            bundle: None,
            push_on_overlap: None,
            push_on_connect: None,
            connections: Vec::new(),
            milestone: None,
        })
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_immobile(mut self, immobile: bool) -> Self {
        self.immobile = immobile;
        self
    }

    #[must_use]
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    #[must_use]
    pub fn with_push_on_overlap(mut self, enabled: bool) -> Self {
        self.push_on_overlap = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_push_on_connect(mut self, enabled: bool) -> Self {
        self.push_on_connect = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_connection(mut self, target: impl Into<BarId>, kind: ConnectionKind) -> Self {
        self.connections.push(Connection::new(target, kind));
        self
    }

    #[must_use]
    pub fn with_milestone(mut self, milestone_id: impl Into<String>) -> Self {
        self.milestone = Some(milestone_id.into());
        self
    }

    #[must_use]
    pub fn connects_to(&self, target: &BarId) -> bool {
        self.connections.iter().any(|edge| &edge.target == target)
    }
}

/// Lane of bars. Child rows are lanes of their own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub children: Vec<Row>,
}

impl Row {
    #[must_use]
    pub fn new(id: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            id: id.into(),
            label: None,
            bars,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Row) -> Self {
        self.children.push(child);
        self
    }
}

/// Externally supplied date that caps the end of any bar referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub name: Option<String>,
}

impl Milestone {
    #[must_use]
    pub fn new(id: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            date,
            name: None,
        }
    }

    /// Latest allowed bar end.
    ///
    /// A date carrying no time of day (exact midnight) caps at 23:59 of
    /// that day rather than at its first instant.
    #[must_use]
    pub fn deadline(&self) -> NaiveDateTime {
        if self.date.time() == NaiveTime::MIN {
            self.date.date().and_time(end_of_day())
        } else {
            self.date
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid datetime")
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = BarInterval::new(at(9, 0), at(11, 0)).expect("a");
        let b = BarInterval::new(at(11, 0), at(13, 0)).expect("b");
        assert!(!a.overlaps(b));
        assert!(!b.overlaps(a));
    }

    #[test]
    fn shift_past_chrono_range_is_none() {
        let interval = BarInterval::new(at(9, 0), at(11, 0)).expect("interval");
        assert_eq!(interval.shifted(TimeDelta::MAX), None);
        assert_eq!(
            interval.shifted(TimeDelta::hours(1)),
            BarInterval::new(at(10, 0), at(12, 0)).ok()
        );
    }

    #[test]
    fn reversed_interval_is_rejected() {
        assert!(BarInterval::new(at(11, 0), at(9, 0)).is_err());
    }

    #[test]
    fn midnight_milestone_caps_at_last_minute_of_day() {
        let milestone = Milestone::new("release", at(0, 0));
        assert_eq!(milestone.deadline(), at(23, 59));
    }

    #[test]
    fn timed_milestone_caps_at_its_time() {
        let milestone = Milestone::new("review", at(15, 30));
        assert_eq!(milestone.deadline(), at(15, 30));
    }
}
