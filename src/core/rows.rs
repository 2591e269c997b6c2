use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{GanttError, GanttResult};

use super::{Bar, BarId, BarInterval, Row};

/// Index path from a top-level row down to a nested child row.
pub type LanePath = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BarSlot {
    lane: usize,
    position: usize,
}

/// Owned hierarchical rows plus a chart-wide bar index.
///
/// Every row (top-level or nested) is one lane. Lanes are numbered in
/// depth-first order, which is also the on-screen order. The store never
/// creates or destroys bars after construction; only intervals change.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    lanes: Vec<LanePath>,
    index: IndexMap<BarId, BarSlot>,
}

impl RowStore {
    /// Builds the store, rejecting duplicate ids and dangling connections.
    pub fn new(rows: Vec<Row>) -> GanttResult<Self> {
        let mut lanes = Vec::new();
        let mut path = LanePath::new();
        for (position, row) in rows.iter().enumerate() {
            path.push(position);
            collect_lanes(row, &mut path, &mut lanes);
            path.pop();
        }

        let mut store = Self {
            rows,
            lanes,
            index: IndexMap::new(),
        };
        store.rebuild_index()?;
        store.validate_connections()?;
        Ok(store)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn contains(&self, id: &BarId) -> bool {
        self.index.contains_key(id)
    }

    /// Bar ids in lane order, then in-row order.
    pub fn bar_ids(&self) -> impl Iterator<Item = &BarId> {
        self.index.keys()
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.index
            .values()
            .filter_map(|slot| self.lane(slot.lane)?.bars.get(slot.position))
    }

    #[must_use]
    pub fn bar(&self, id: &BarId) -> Option<&Bar> {
        let slot = self.index.get(id)?;
        self.lane(slot.lane)?.bars.get(slot.position)
    }

    pub fn bar_mut(&mut self, id: &BarId) -> Option<&mut Bar> {
        let slot = *self.index.get(id)?;
        self.lane_mut(slot.lane)?.bars.get_mut(slot.position)
    }

    pub fn require(&self, id: &BarId) -> GanttResult<&Bar> {
        self.bar(id).ok_or_else(|| GanttError::UnknownBar(id.clone()))
    }

    #[must_use]
    pub fn lane_of(&self, id: &BarId) -> Option<usize> {
        self.index.get(id).map(|slot| slot.lane)
    }

    #[must_use]
    pub fn lane_path(&self, lane: usize) -> Option<&LanePath> {
        self.lanes.get(lane)
    }

    #[must_use]
    pub fn lane(&self, lane: usize) -> Option<&Row> {
        let path = self.lanes.get(lane)?;
        let (first, rest) = path.split_first()?;
        let mut row = self.rows.get(*first)?;
        for position in rest {
            row = row.children.get(*position)?;
        }
        Some(row)
    }

    fn lane_mut(&mut self, lane: usize) -> Option<&mut Row> {
        let path = self.lanes.get(lane)?;
        let (first, rest) = path.split_first()?;
        let mut row = self.rows.get_mut(*first)?;
        for position in rest {
            row = row.children.get_mut(*position)?;
        }
        Some(row)
    }

    fn rebuild_index(&mut self) -> GanttResult<()> {
        let mut index = IndexMap::new();
        for lane in 0..self.lanes.len() {
            let Some(row) = self.lane(lane) else {
                continue;
            };
            for (position, bar) in row.bars.iter().enumerate() {
                if bar.interval.start() > bar.interval.end() {
                    return Err(GanttError::InvalidTimeRange {
                        start: bar.interval.start().to_string(),
                        end: bar.interval.end().to_string(),
                    });
                }
                if index
                    .insert(bar.id.clone(), BarSlot { lane, position })
                    .is_some()
                {
                    return Err(GanttError::DuplicateBarId(bar.id.clone()));
                }
            }
        }
        self.index = index;
        Ok(())
    }

    fn validate_connections(&self) -> GanttResult<()> {
        for bar in self.bars() {
            if let Some(edge) = bar
                .connections
                .iter()
                .find(|edge| !self.index.contains_key(&edge.target))
            {
                return Err(GanttError::DanglingConnection {
                    from: bar.id.clone(),
                    to: edge.target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Current interval of every bar, keyed by id.
    #[must_use]
    pub fn intervals(&self) -> IndexMap<BarId, BarInterval> {
        self.bars()
            .map(|bar| (bar.id.clone(), bar.interval))
            .collect()
    }
}

fn collect_lanes(row: &Row, path: &mut LanePath, lanes: &mut Vec<LanePath>) {
    lanes.push(path.clone());
    for (position, child) in row.children.iter().enumerate() {
        path.push(position);
        collect_lanes(child, path, lanes);
        path.pop();
    }
}
