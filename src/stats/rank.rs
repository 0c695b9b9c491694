use std::collections::{HashMap, HashSet};

use serde::{Serialize, ser::SerializeMap as _};

use crate::{
    foundation::{
        color::HexColor,
        error::{GraphfoldError, GraphfoldResult},
    },
    snapshot::model::NodeId,
    stats::bounds::CentralityHistory,
};

/// Standard median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedNode {
    pub id: NodeId,
    pub median: f64,
}

/// Rank nodes present in every slice by descending median centrality.
///
/// Nodes missing from any slice are left out. Equal medians keep first-encounter order.
pub fn rank_nodes(history: &CentralityHistory, snapshot_count: usize) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = history
        .iter()
        .filter(|(_, values)| values.len() == snapshot_count)
        .filter_map(|(id, values)| {
            median(values).map(|m| RankedNode {
                id: id.clone(),
                median: m,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.median.total_cmp(&a.median));
    ranked
}

/// How many nodes get highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// The first K ranked nodes (fewer if fewer qualify).
    TopK(usize),
    /// Every node, colored in first-encounter order.
    Everyone,
}

impl Highlight {
    /// `None` and `Some(0)` both mean everyone.
    pub fn from_top_k(top_k: Option<usize>) -> Self {
        match top_k {
            Some(k) if k > 0 => Self::TopK(k),
            _ => Self::Everyone,
        }
    }
}

/// First `k` ranked ids, in rank order.
pub fn select_highlighted(ranked: &[RankedNode], k: usize) -> Vec<NodeId> {
    ranked.iter().take(k).map(|r| r.id.clone()).collect()
}

/// The highlighted ids in rank (or encounter) order, with O(1) membership.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightSet {
    ids: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl HighlightSet {
    pub fn new(ids: Vec<NodeId>) -> Self {
        let members = ids.iter().cloned().collect();
        Self { ids, members }
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Color for every node id in the corpus.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTable {
    order: Vec<NodeId>,
    colors: HashMap<NodeId, HexColor>,
    default: HexColor,
}

impl ColorTable {
    /// `highlighted[i]` gets `palette[i % palette.len()]`; every other id in `history`
    /// gets the default color.
    pub fn build(
        history: &CentralityHistory,
        highlighted: &HighlightSet,
        palette: &[HexColor],
    ) -> GraphfoldResult<Self> {
        if palette.is_empty() {
            return Err(GraphfoldError::validation("palette must not be empty"));
        }

        let default = HexColor::default_node();
        let mut colors: HashMap<NodeId, HexColor> = highlighted
            .ids()
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), palette[i % palette.len()].clone()))
            .collect();
        for id in history.ids() {
            colors.entry(id.clone()).or_insert_with(|| default.clone());
        }

        Ok(Self {
            order: history.ids().to_vec(),
            colors,
            default,
        })
    }

    /// Color for `id`; unknown ids get the default color.
    pub fn get(&self, id: &NodeId) -> &HexColor {
        self.colors.get(id).unwrap_or(&self.default)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &HexColor)> + '_ {
        self.order.iter().map(|id| (id, self.get(id)))
    }
}

impl Serialize for ColorTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (id, color) in self.iter() {
            map.serialize_entry(id, color)?;
        }
        map.end()
    }
}

/// Ranking outcome shared, read-only, by every render stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranking {
    pub ranked: Vec<RankedNode>,
    pub highlighted: HighlightSet,
    pub colors: ColorTable,
}

#[tracing::instrument(skip(history, palette))]
pub fn rank_and_color(
    history: &CentralityHistory,
    snapshot_count: usize,
    palette: &[HexColor],
    highlight: Highlight,
) -> GraphfoldResult<Ranking> {
    let ranked = rank_nodes(history, snapshot_count);
    let highlighted = match highlight {
        Highlight::TopK(k) => {
            let ids = select_highlighted(&ranked, k);
            if ids.len() < k {
                tracing::info!(
                    requested = k,
                    available = ids.len(),
                    "fewer nodes present in every slice than requested; highlighting all of them"
                );
            }
            HighlightSet::new(ids)
        }
        Highlight::Everyone => HighlightSet::new(history.ids().to_vec()),
    };
    let colors = ColorTable::build(history, &highlighted, palette)?;
    tracing::debug!(
        ranked = ranked.len(),
        highlighted = highlighted.len(),
        "ranked nodes"
    );

    Ok(Ranking {
        ranked,
        highlighted,
        colors,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stats/rank.rs"]
mod tests;
