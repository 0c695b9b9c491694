use std::collections::HashMap;

use serde::Serialize;

use crate::{
    foundation::{
        core::Canvas,
        error::{GraphfoldError, GraphfoldResult},
    },
    snapshot::model::{NodeId, Snapshot},
    transform::linear::{ImageMapper, Interval},
};

/// Observed `[min, max]` of one quantity. May be degenerate (`min == max`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Checked conversion for use as a mapping source.
    pub fn interval(self, what: &str) -> GraphfoldResult<Interval> {
        Interval::new(self.min, self.max).map_err(|_| {
            GraphfoldError::validation(format!(
                "{what} range is degenerate ({} .. {}); cannot normalize",
                self.min, self.max
            ))
        })
    }
}

/// Corpus-wide extents, computed once from every slice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlobalBounds {
    pub x: Range,
    pub y: Range,
    pub centrality: Range,
    /// `None` when no slice has any edge.
    pub weight: Option<Range>,
}

impl GlobalBounds {
    pub fn image_mapper(
        &self,
        canvas: Canvas,
        margin_x: f64,
        margin_y: f64,
    ) -> GraphfoldResult<ImageMapper> {
        Ok(ImageMapper::new(
            self.x.interval("node x")?,
            self.y.interval("node y")?,
            canvas,
            margin_x,
            margin_y,
        ))
    }

    pub fn weight_interval(&self) -> GraphfoldResult<Option<Interval>> {
        self.weight.map(|w| w.interval("edge weight")).transpose()
    }

    pub fn centrality_interval(&self) -> GraphfoldResult<Interval> {
        self.centrality.interval("node centrality")
    }
}

/// Per-node centrality values, one per slice the node appears in, in slice order.
///
/// Iteration follows the order in which ids were first encountered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CentralityHistory {
    order: Vec<NodeId>,
    values: HashMap<NodeId, Vec<f64>>,
}

impl CentralityHistory {
    fn push(&mut self, id: &NodeId, value: f64) {
        match self.values.get_mut(id) {
            Some(v) => v.push(value),
            None => {
                self.order.push(id.clone());
                self.values.insert(id.clone(), vec![value]);
            }
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&[f64]> {
        self.values.get(id).map(Vec::as_slice)
    }

    /// Ids in first-encounter order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[f64])> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.values.get(id).map(|v| (id, v.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    fn finish(self) -> Option<Range> {
        (self.min <= self.max).then_some(Range {
            min: self.min,
            max: self.max,
        })
    }
}

/// Result of one full pass over the slice set.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate {
    pub bounds: GlobalBounds,
    pub history: CentralityHistory,
    pub snapshot_count: usize,
}

/// Scan every slice once, producing global extents and centrality histories.
///
/// Bounds only exist once the whole slice set has been visited; nothing can observe a
/// partial result.
#[tracing::instrument(skip(snapshots), fields(slices = snapshots.len()))]
pub fn aggregate(snapshots: &[Snapshot]) -> GraphfoldResult<Aggregate> {
    if snapshots.is_empty() {
        return Err(GraphfoldError::validation("cannot aggregate an empty slice set"));
    }

    let (mut x, mut y, mut c, mut w) = (Extent::new(), Extent::new(), Extent::new(), Extent::new());
    let mut history = CentralityHistory::default();

    for snap in snapshots {
        // One value per id per slice; a repeated id keeps its last occurrence.
        let mut slice_order: Vec<&NodeId> = Vec::with_capacity(snap.nodes.len());
        let mut slice_values: HashMap<&NodeId, f64> = HashMap::with_capacity(snap.nodes.len());

        for node in &snap.nodes {
            x.include(node.x);
            y.include(node.y);
            c.include(node.centrality);
            if slice_values.insert(&node.id, node.centrality).is_none() {
                slice_order.push(&node.id);
            }
        }
        for edge in &snap.edges {
            w.include(edge.weight);
        }
        for id in slice_order {
            history.push(id, slice_values[id]);
        }
    }

    let no_nodes = || GraphfoldError::validation("slice set contains no nodes");
    let bounds = GlobalBounds {
        x: x.finish().ok_or_else(no_nodes)?,
        y: y.finish().ok_or_else(no_nodes)?,
        centrality: c.finish().ok_or_else(no_nodes)?,
        weight: w.finish(),
    };
    tracing::debug!(?bounds, nodes = history.len(), "aggregated bounds");

    Ok(Aggregate {
        bounds,
        history,
        snapshot_count: snapshots.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stats/bounds.rs"]
mod tests;
