use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_snapshot_load").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const SLICE: &str = r#"{
  "nodes": [{"id": 1, "x": 0.0, "y": 1.0, "name": "one", "centrality": 2.0}],
  "edges": []
}"#;

#[test]
fn from_dir_sorts_by_file_name_and_skips_non_json() {
    let dir = scratch_dir("sorted");
    for name in ["c.json", "a.json", "b.JSON", "notes.txt"] {
        std::fs::write(dir.join(name), SLICE).unwrap();
    }
    std::fs::create_dir_all(dir.join("nested.json")).unwrap();

    let set = SliceSet::from_dir(&dir).unwrap();
    let names: Vec<_> = set
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.json", "b.JSON", "c.json"]);
}

#[test]
fn empty_directory_is_a_validation_error() {
    let dir = scratch_dir("empty");
    let err = SliceSet::from_dir(&dir).unwrap_err();
    assert!(matches!(err, GraphfoldError::Validation(_)));
}

#[test]
fn explicit_list_keeps_caller_order() {
    let set = SliceSet::from_paths(vec!["z.json".into(), "a.json".into()]).unwrap();
    assert_eq!(set.paths()[0], PathBuf::from("z.json"));
    assert!(SliceSet::from_paths(Vec::new()).is_err());
}

#[test]
fn load_all_assigns_indices_in_order() {
    let dir = scratch_dir("load_all");
    std::fs::write(dir.join("s1.json"), SLICE).unwrap();
    std::fs::write(dir.join("s2.json"), SLICE).unwrap();

    let set = SliceSet::from_dir(&dir).unwrap();
    let snaps = load_all(&set).unwrap();
    assert_eq!(snaps.len(), 2);
    assert_eq!(snaps[0].index, 0);
    assert_eq!(snaps[1].index, 1);
    assert_eq!(snaps[1].source, dir.join("s2.json"));
    assert_eq!(snaps[1].nodes[0].id.as_str(), "1");
}

#[test]
fn malformed_json_reports_the_file() {
    let dir = scratch_dir("malformed");
    let path = dir.join("bad.json");
    std::fs::write(&path, r#"{"nodes": [{"id": "a"}], "edges": []}"#).unwrap();

    let err = load_snapshot(&path, 0).unwrap_err();
    assert!(matches!(err, GraphfoldError::Serde(_)));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_snapshot(Path::new("target/definitely/not/here.json"), 0).unwrap_err();
    assert!(matches!(err, GraphfoldError::Other(_)));
}

#[test]
fn from_dir_orders_numbered_slices_by_value() {
    let dir = scratch_dir("numbered");
    for name in [
        "graphData (10).json",
        "graphData (2).json",
        "graphData.json",
        "graphData (1).json",
    ] {
        std::fs::write(dir.join(name), SLICE).unwrap();
    }

    let set = SliceSet::from_dir(&dir).unwrap();
    let names: Vec<_> = set
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "graphData (1).json",
            "graphData (2).json",
            "graphData (10).json",
            "graphData.json",
        ]
    );
}

#[test]
fn natural_cmp_compares_digit_runs_numerically() {
    use std::cmp::Ordering::*;

    assert_eq!(natural_cmp("slice_2.json", "slice_10.json"), Less);
    assert_eq!(natural_cmp("slice_10.json", "slice_9.json"), Greater);
    assert_eq!(natural_cmp("slice_010.json", "slice_10.json"), Greater);
    assert_eq!(natural_cmp("s1_b", "s1_a"), Greater);
    assert_eq!(natural_cmp("s1", "s1.json"), Less);
    assert_eq!(natural_cmp("same", "same"), Equal);
}
