use super::*;
use crate::{
    snapshot::model::{Node, Snapshot},
    stats::bounds::aggregate,
};

fn node(id: &str, centrality: f64) -> Node {
    Node {
        id: NodeId::from(id),
        x: centrality,
        y: -centrality,
        name: id.to_string(),
        centrality,
    }
}

/// One snapshot per column of `per_slice`; `None` means the node is absent there.
fn history(rows: &[(&str, &[Option<f64>])]) -> (CentralityHistory, usize) {
    let slices = rows.first().map(|(_, v)| v.len()).unwrap_or(0);
    let snaps: Vec<Snapshot> = (0..slices)
        .map(|i| {
            let nodes = rows
                .iter()
                .filter_map(|(id, vals)| vals[i].map(|c| node(id, c)))
                .collect();
            Snapshot::new(i, format!("{i}.json"), nodes, vec![])
        })
        .collect();
    let agg = aggregate(&snaps).unwrap();
    (agg.history, agg.snapshot_count)
}

fn palette(entries: &[&str]) -> Vec<HexColor> {
    crate::foundation::color::parse_palette(entries).unwrap()
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

#[test]
fn median_of_odd_and_even_lists() {
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    assert_eq!(median(&[5.0, 1.0, 4.0]), Some(4.0));
    assert_eq!(median(&[]), None);
}

#[test]
fn medians_come_from_per_slice_histories() {
    let (h, n) = history(&[
        ("odd", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]),
        ("flat", &[Some(0.5), Some(0.5), Some(0.5), Some(0.5), Some(0.5)]),
    ]);
    let ranked = rank_nodes(&h, n);
    assert_eq!(ranked[0], RankedNode { id: id("odd"), median: 3.0 });
    assert_eq!(ranked[1], RankedNode { id: id("flat"), median: 0.5 });

    let (h, n) = history(&[("even", &[Some(4.0), Some(1.0), Some(3.0), Some(2.0)])]);
    assert_eq!(rank_nodes(&h, n)[0].median, 2.5);
}

#[test]
fn node_missing_from_one_slice_is_never_ranked() {
    let (h, n) = history(&[
        ("steady", &[Some(1.0), Some(1.0), Some(1.0)]),
        ("star", &[Some(100.0), None, Some(100.0)]),
    ]);
    let ranked = rank_nodes(&h, n);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, id("steady"));

    let r = rank_and_color(&h, n, &palette(&["#111111"]), Highlight::TopK(5)).unwrap();
    assert!(!r.highlighted.contains(&id("star")));
    assert_eq!(r.colors.get(&id("star")).as_str(), "#000000");
}

#[test]
fn ties_keep_first_encounter_order() {
    let (h, n) = history(&[
        ("c", &[Some(2.0), Some(2.0)]),
        ("a", &[Some(3.0), Some(3.0)]),
        ("b", &[Some(2.0), Some(2.0)]),
    ]);
    let ids: Vec<NodeId> = rank_nodes(&h, n).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, [id("a"), id("c"), id("b")]);
}

#[test]
fn palette_cycles_over_ranks() {
    let rows: Vec<(String, f64)> = (0..7).map(|i| (format!("n{i}"), 10.0 - i as f64)).collect();
    let cols: Vec<[Option<f64>; 1]> = rows.iter().map(|(_, c)| [Some(*c)]).collect();
    let table: Vec<(&str, &[Option<f64>])> = rows
        .iter()
        .zip(&cols)
        .map(|((name, _), col)| (name.as_str(), &col[..]))
        .collect();
    let (h, n) = history(&table);

    let pal = palette(&["#aa0000", "#00aa00", "#0000aa"]);
    let r = rank_and_color(&h, n, &pal, Highlight::TopK(5)).unwrap();
    assert_eq!(r.highlighted.len(), 5);
    let got: Vec<&str> = r
        .highlighted
        .ids()
        .iter()
        .map(|i| r.colors.get(i).as_str())
        .collect();
    assert_eq!(got, ["#aa0000", "#00aa00", "#0000aa", "#aa0000", "#00aa00"]);
    assert_eq!(r.colors.get(&id("n5")).as_str(), "#000000");
    assert_eq!(r.colors.get(&id("n6")).as_str(), "#000000");
}

#[test]
fn two_slice_scenario_highlights_the_stronger_node() {
    let (h, n) = history(&[("A", &[Some(5.0), Some(5.0)]), ("B", &[Some(1.0), Some(1.0)])]);
    let r = rank_and_color(&h, n, &palette(&["#111111", "#222222"]), Highlight::TopK(1)).unwrap();
    assert_eq!(r.highlighted.ids(), [id("A")]);
    assert_eq!(r.colors.get(&id("A")).as_str(), "#111111");
    assert_eq!(r.colors.get(&id("B")).as_str(), "#000000");
}

#[test]
fn k_larger_than_qualifying_set_truncates() {
    let (h, n) = history(&[("a", &[Some(1.0)]), ("b", &[Some(2.0)])]);
    let r = rank_and_color(&h, n, &palette(&["#111111"]), Highlight::TopK(10)).unwrap();
    assert_eq!(r.highlighted.ids(), [id("b"), id("a")]);
}

#[test]
fn zero_k_highlights_everyone_in_encounter_order() {
    assert_eq!(Highlight::from_top_k(Some(0)), Highlight::Everyone);
    assert_eq!(Highlight::from_top_k(None), Highlight::Everyone);
    assert_eq!(Highlight::from_top_k(Some(3)), Highlight::TopK(3));

    let (h, n) = history(&[
        ("low", &[Some(1.0), None]),
        ("high", &[Some(9.0), Some(9.0)]),
        ("mid", &[Some(5.0), Some(5.0)]),
    ]);
    let r = rank_and_color(&h, n, &palette(&["#111111", "#222222"]), Highlight::Everyone).unwrap();
    assert_eq!(r.highlighted.ids(), [id("low"), id("high"), id("mid")]);
    assert_eq!(r.colors.get(&id("low")).as_str(), "#111111");
    assert_eq!(r.colors.get(&id("high")).as_str(), "#222222");
    assert_eq!(r.colors.get(&id("mid")).as_str(), "#111111");
}

#[test]
fn unknown_ids_get_default_and_table_serializes_in_order() {
    let (h, n) = history(&[("x", &[Some(1.0)]), ("y", &[Some(0.0)])]);
    let r = rank_and_color(&h, n, &palette(&["#123456"]), Highlight::TopK(1)).unwrap();
    assert_eq!(r.colors.get(&id("nope")).as_str(), "#000000");
    assert_eq!(
        serde_json::to_string(&r.colors).unwrap(),
        r##"{"x":"#123456","y":"#000000"}"##
    );
}

#[test]
fn empty_palette_is_rejected() {
    let (h, n) = history(&[("x", &[Some(1.0)])]);
    assert!(rank_and_color(&h, n, &[], Highlight::TopK(1)).is_err());
}

#[test]
fn ranking_is_idempotent() {
    let (h, n) = history(&[
        ("a", &[Some(1.0), Some(4.0), Some(2.0)]),
        ("b", &[Some(3.0), Some(3.0), Some(3.0)]),
        ("c", &[Some(2.0), Some(2.0), Some(9.0)]),
    ]);
    let pal = palette(&["#111111", "#222222"]);
    let a = rank_and_color(&h, n, &pal, Highlight::TopK(2)).unwrap();
    let b = rank_and_color(&h, n, &pal, Highlight::TopK(2)).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a.colors).unwrap(),
        serde_json::to_string(&b.colors).unwrap()
    );
}
