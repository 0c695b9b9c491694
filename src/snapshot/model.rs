use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Identity of a logical node across time slices.
///
/// Input files write ids either as JSON strings or as JSON numbers; both are normalized to
/// text so `7` and `"7"` refer to the same node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(serde_json::Number),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Ok(Self(s)),
            Repr::Number(n) => Ok(Self(n.to_string())),
        }
    }
}

/// One node of one time slice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub centrality: f64,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            id: NodeId,
            x: f64,
            y: f64,
            #[serde(default)]
            name: Option<String>,
            centrality: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.centrality < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "node '{}' has negative centrality {}",
                raw.id, raw.centrality
            )));
        }
        let name = raw.name.unwrap_or_else(|| raw.id.to_string());
        Ok(Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            name,
            centrality: raw.centrality,
        })
    }
}

/// Edge endpoint: the node id plus the coordinates it had in this slice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Undirected weighted edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeRef,
    pub target: NodeRef,
    pub weight: f64,
}

/// Wire shape of a slice file.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct SnapshotFile {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

/// One time slice, immutable after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Position in the ordered slice set (0-based).
    pub index: usize,
    pub source: PathBuf,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Snapshot {
    pub fn new(index: usize, source: impl Into<PathBuf>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            index,
            source: source.into(),
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/model.rs"]
mod tests;
