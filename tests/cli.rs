//!
//! subcommands writing their outputs to files
//!
use treebipart::cli::{run_biparts, run_nest};
use treebipart::io::write_string;
use treebipart::nested::NestConfig;
use treebipart::utils::resource_dir;

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let file = std::fs::File::open(path).unwrap();
    serde_json::from_reader(file).unwrap()
}

#[test]
fn biparts_rows_file() {
    let dir = tempfile::tempdir().unwrap();
    let rows = dir.path().join("rows.json");
    run_biparts(&resource_dir().join("nested_example.tre"), true, Some(&rows)).unwrap();

    let v = read_json(&rows);
    let rows = v.as_array().unwrap();
    // (A,B) and the root, for each of the two trees
    assert_eq!(rows.len(), 4);
    let trees: Vec<u64> = rows.iter().map(|r| r["tree"].as_u64().unwrap()).collect();
    assert_eq!(trees, vec![0, 0, 1, 1]);
    assert_eq!(rows[0]["ingroup"], serde_json::json!(["A", "B"]));
    assert_eq!(rows[0]["outgroup"], serde_json::json!(["C"]));
    assert_eq!(rows[3]["outgroup"], serde_json::json!([]));

    let rows_no_root = dir.path().join("rows_no_root.json");
    run_biparts(&resource_dir().join("nested_example.tre"), false, Some(&rows_no_root)).unwrap();
    assert_eq!(read_json(&rows_no_root).as_array().unwrap().len(), 2);
}

#[test]
fn nest_output_files() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("summary.json");
    let elements = dir.path().join("cytoscape.json");
    let ok = run_nest(
        &resource_dir().join("nested_example.tre"),
        NestConfig::default(),
        Some(&summary),
        Some(&elements),
    )
    .unwrap();
    assert!(ok);

    let v = read_json(&summary);
    assert_eq!(v["n_original"], 4);
    assert_eq!(v["nodes"].as_array().unwrap().len(), 3);

    // 3 nodes and 2 parent -> child edges
    let v = read_json(&elements);
    let elements = v.as_array().unwrap();
    assert_eq!(elements.len(), 5);
    assert_eq!(elements[0]["group"], "nodes");
    assert_eq!(elements[3]["group"], "edges");
    assert_eq!(elements[3]["data"]["source"], "n0");
}

#[test]
fn nest_unsupported_tree() {
    // without the root bipartition, (A,B) has no potential parent and no node is made
    let dir = tempfile::tempdir().unwrap();
    let trees = dir.path().join("trees.tre");
    write_string(&trees, "((A,B),C);\n").unwrap();
    let ok = run_nest(&trees, NestConfig::default().include_root(false), None, None).unwrap();
    assert!(!ok);

    assert!(run_nest(&dir.path().join("missing.tre"), NestConfig::default(), None, None).is_err());
}
