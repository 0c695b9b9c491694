use std::collections::HashMap;

use crate::snapshot::model::{NodeId, Snapshot};

#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

/// A node's positions across slices, in slice order.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub id: NodeId,
    pub waypoints: Vec<Waypoint>,
}

impl Trajectory {
    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }
}

/// Collect one trajectory per node id, in first-encounter order.
///
/// Every occurrence contributes a waypoint, so a node absent from some slices simply has
/// fewer waypoints.
pub fn collect_trajectories(snapshots: &[Snapshot]) -> Vec<Trajectory> {
    let mut out: Vec<Trajectory> = Vec::new();
    let mut index: HashMap<NodeId, usize> = HashMap::new();

    for snap in snapshots {
        for node in &snap.nodes {
            let waypoint = Waypoint {
                x: node.x,
                y: node.y,
                name: node.name.clone(),
            };
            match index.get(&node.id) {
                Some(&i) => out[i].waypoints.push(waypoint),
                None => {
                    index.insert(node.id.clone(), out.len());
                    out.push(Trajectory {
                        id: node.id.clone(),
                        waypoints: vec![waypoint],
                    });
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stats/trajectory.rs"]
mod tests;
