use super::*;
use crate::snapshot::model::Node;

fn node(id: &str, x: f64, name: &str) -> Node {
    Node {
        id: NodeId::from(id),
        x,
        y: x * 2.0,
        name: name.to_string(),
        centrality: 1.0,
    }
}

#[test]
fn waypoints_follow_slice_order() {
    let snaps = vec![
        Snapshot::new(0, "0.json", vec![node("b", 1.0, "Bea"), node("a", 2.0, "Al")], vec![]),
        Snapshot::new(1, "1.json", vec![node("a", 3.0, "Alan")], vec![]),
        Snapshot::new(2, "2.json", vec![node("a", 4.0, "Alan"), node("b", 5.0, "Bea")], vec![]),
    ];
    let t = collect_trajectories(&snaps);
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].id, NodeId::from("b"));
    assert_eq!(t[1].id, NodeId::from("a"));

    let xs: Vec<f64> = t[1].waypoints.iter().map(|w| w.x).collect();
    assert_eq!(xs, [2.0, 3.0, 4.0]);
    assert_eq!(t[0].waypoints.len(), 2);
    assert_eq!(t[1].last().unwrap().name, "Alan");
    assert_eq!(t[1].last().unwrap().y, 8.0);
}

#[test]
fn no_slices_means_no_trajectories() {
    assert!(collect_trajectories(&[]).is_empty());
}
