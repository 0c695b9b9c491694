use super::*;
use serde_json::json;

#[test]
fn node_ids_accept_strings_and_numbers() {
    let a: NodeId = serde_json::from_value(json!("7")).unwrap();
    let b: NodeId = serde_json::from_value(json!(7)).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.as_str(), "7");
    assert!(serde_json::from_value::<NodeId>(json!({"id": 1})).is_err());
}

#[test]
fn node_name_defaults_to_id() {
    let n: Node = serde_json::from_value(json!({
        "id": 12, "x": 1.0, "y": 2.0, "centrality": 0.5
    }))
    .unwrap();
    assert_eq!(n.name, "12");

    let n: Node = serde_json::from_value(json!({
        "id": "hp", "x": 1.0, "y": 2.0, "name": "Harry", "centrality": 3
    }))
    .unwrap();
    assert_eq!(n.name, "Harry");
    assert_eq!(n.centrality, 3.0);
}

#[test]
fn node_rejects_missing_fields_and_negative_centrality() {
    assert!(serde_json::from_value::<Node>(json!({"id": "a", "x": 1.0, "centrality": 1.0})).is_err());
    assert!(
        serde_json::from_value::<Node>(json!({"id": "a", "x": 1.0, "y": 1.0, "centrality": -1.0}))
            .is_err()
    );
}

#[test]
fn snapshot_file_decodes_full_schema() {
    let file: SnapshotFile = serde_json::from_value(json!({
        "nodes": [
            {"id": "a", "x": 0.0, "y": 0.0, "name": "A", "centrality": 5.0},
            {"id": "b", "x": 1.0, "y": 1.0, "name": "B", "centrality": 1.0}
        ],
        "edges": [
            {"source": {"id": "a", "x": 0.0, "y": 0.0}, "target": {"id": "b", "x": 1.0, "y": 1.0}, "weight": 2.0}
        ]
    }))
    .unwrap();
    assert_eq!(file.nodes.len(), 2);
    assert_eq!(file.edges[0].target.id, NodeId::from("b"));
    assert_eq!(file.edges[0].weight, 2.0);
}
