//! Read-only row and dependency queries over a [`RowStore`].
//!
//! These are plain scans; charts hold hundreds of bars, not millions.

use indexmap::IndexSet;

use super::{Bar, BarId, IntervalAccess, RowStore};

impl RowStore {
    /// Bars sharing `id`'s lane, excluding `id` itself.
    #[must_use]
    pub fn bars_in_same_row(&self, id: &BarId) -> Vec<&Bar> {
        let Some(lane) = self.lane_of(id).and_then(|lane| self.lane(lane)) else {
            return Vec::new();
        };
        lane.bars.iter().filter(|bar| &bar.id != id).collect()
    }

    /// Ids of bars linked to `id` in either direction.
    ///
    /// Outgoing edges come first in declaration order, then bars pointing at
    /// `id` in lane order. Each id appears once.
    #[must_use]
    pub fn connected_bars(&self, id: &BarId) -> Vec<BarId> {
        let Some(bar) = self.bar(id) else {
            return Vec::new();
        };

        let mut linked: IndexSet<BarId> = bar
            .connections
            .iter()
            .map(|edge| edge.target.clone())
            .filter(|target| target != id)
            .collect();
        linked.extend(
            self.bars()
                .filter(|other| &other.id != id && other.connects_to(id))
                .map(|other| other.id.clone()),
        );
        linked.into_iter().collect()
    }

    /// Same-row bars whose interval strictly overlaps `id`'s interval.
    #[must_use]
    pub fn find_overlapping_bars<A: IntervalAccess>(&self, id: &BarId, access: &A) -> Vec<BarId> {
        let Some(bar) = self.bar(id) else {
            return Vec::new();
        };
        let interval = access.interval(bar);
        self.bars_in_same_row(id)
            .into_iter()
            .filter(|other| access.interval(other).overlaps(interval))
            .map(|other| other.id.clone())
            .collect()
    }

    /// Ids of every bar carrying `bundle`, in lane order.
    #[must_use]
    pub fn bundle_members(&self, bundle: &str) -> Vec<BarId> {
        self.bars()
            .filter(|bar| bar.bundle.as_deref() == Some(bundle))
            .map(|bar| bar.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::core::{ConnectionKind, PrimaryInterval, Row};

    use super::*;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .expect("valid datetime")
    }

    fn bar(id: &str, start: u32, end: u32) -> Bar {
        Bar::new(id, at(start), at(end)).expect("bar")
    }

    #[test]
    fn connected_bars_include_both_directions_once() {
        let rows = vec![
            Row::new(
                "r1",
                vec![
                    bar("a", 9, 10).with_connection("b", ConnectionKind::FinishToStart),
                    bar("b", 11, 12).with_connection("a", ConnectionKind::StartToStart),
                ],
            ),
            Row::new(
                "r2",
                vec![bar("c", 9, 10).with_connection("a", ConnectionKind::FinishToFinish)],
            ),
        ];
        let store = RowStore::new(rows).expect("store");

        let linked = store.connected_bars(&BarId::from("a"));
        assert_eq!(linked, vec![BarId::from("b"), BarId::from("c")]);
    }

    #[test]
    fn overlap_is_scoped_to_the_row() {
        let rows = vec![
            Row::new("r1", vec![bar("a", 9, 11), bar("b", 10, 12), bar("c", 11, 13)]),
            Row::new("r2", vec![bar("d", 9, 11)]),
        ];
        let store = RowStore::new(rows).expect("store");

        let overlapping = store.find_overlapping_bars(&BarId::from("a"), &PrimaryInterval);
        assert_eq!(overlapping, vec![BarId::from("b")]);
    }
}
