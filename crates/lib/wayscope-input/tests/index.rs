use std::fs;

use prost::Message;
use tempfile::TempDir;

use wayscope_input::catalog::DatasetCatalog;
use wayscope_input::index::{BuildStart, IndexStatus, ScenarioIndex};
use wayscope_testutils::record::{write_raw_record_file, write_record_file};
use wayscope_testutils::scenario::synthetic_scenario;

fn catalog(root: &TempDir) -> DatasetCatalog {
    DatasetCatalog::builder()
        .root(root.path().to_path_buf())
        .build()
}

fn built_index(catalog: &DatasetCatalog) -> ScenarioIndex {
    let index = ScenarioIndex::new();
    assert_eq!(index.try_begin(), BuildStart::Started);
    index.run_build(catalog);
    index
}

#[test]
fn build_collects_and_sorts_all_entries() {
    let root = TempDir::new().unwrap();
    for folder in ["training", "validation"] {
        fs::create_dir(root.path().join(folder)).unwrap();
    }
    write_record_file(
        &root.path().join("training").join("a.tfrecord"),
        &[synthetic_scenario("zulu"), synthetic_scenario("alpha")],
    )
    .unwrap();
    write_record_file(
        &root.path().join("validation").join("b.tfrecord"),
        &[synthetic_scenario("mike")],
    )
    .unwrap();

    let index = built_index(&catalog(&root));
    let snapshot = index.snapshot();
    assert_eq!(snapshot.status, IndexStatus::Built);
    assert_eq!(snapshot.count, 3);

    // Entries are sorted by scenario ID across files.
    let page = index.search("l", 0).unwrap();
    let ids: Vec<&str> = page.results.iter().map(|e| e.scenario_id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "zulu"]);
    assert_eq!(page.results[0].folder, "training");
    assert_eq!(page.results[0].record_index, 1);
    assert_eq!(page.results[1].record_index, 0);

    let mike = index.search("mike", 0).unwrap();
    assert_eq!(mike.results[0].folder, "validation");
    assert_eq!(mike.results[0].record_index, 0);
}

#[test]
fn broken_file_keeps_earlier_records_and_continues() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("training")).unwrap();
    // First record decodes, the second payload is not a scenario message.
    write_raw_record_file(
        &root.path().join("training").join("broken.tfrecord"),
        &[
            synthetic_scenario("kept").encode_to_vec(),
            vec![0xff, 0xff, 0xff, 0xff],
        ],
    )
    .unwrap();
    write_record_file(
        &root.path().join("training").join("good.tfrecord"),
        &[synthetic_scenario("survivor")],
    )
    .unwrap();

    let index = built_index(&catalog(&root));
    let snapshot = index.snapshot();
    assert_eq!(snapshot.status, IndexStatus::Built);
    assert_eq!(snapshot.count, 2);
    assert_eq!(index.search("kept", 0).unwrap().total, 1);
    assert_eq!(index.search("survivor", 0).unwrap().total, 1);
}

#[test]
fn unscannable_tree_fails_the_pass() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("gone");
    let catalog = DatasetCatalog::builder().root(missing).build();

    let index = ScenarioIndex::new();
    assert_eq!(index.try_begin(), BuildStart::Started);
    index.run_build(&catalog);
    assert_eq!(index.snapshot().status, IndexStatus::Failed);

    // A failed pass may be retriggered.
    assert_eq!(index.try_begin(), BuildStart::Started);
}

#[test]
fn finished_index_is_not_rebuilt() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("training")).unwrap();
    write_record_file(
        &root.path().join("training").join("a.tfrecord"),
        &[synthetic_scenario("one")],
    )
    .unwrap();

    let index = built_index(&catalog(&root));
    assert_eq!(index.try_begin(), BuildStart::AlreadyBuilt(1));
}

#[test]
fn search_matches_case_insensitively_and_paginates() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("training")).unwrap();
    let scenarios: Vec<_> = (0..60)
        .map(|i| synthetic_scenario(&format!("Scenario-{i:02}")))
        .collect();
    write_record_file(&root.path().join("training").join("many.tfrecord"), &scenarios).unwrap();

    let index = built_index(&catalog(&root));
    let first = index.search("scenario", 0).unwrap();
    assert_eq!(first.total, 60);
    assert_eq!(first.results.len(), 50);
    assert!(first.has_more);
    assert_eq!(first.results[0].scenario_id, "Scenario-00");

    let second = index.search("scenario", 50).unwrap();
    assert_eq!(second.results.len(), 10);
    assert!(!second.has_more);

    let empty = index.search("", 0).unwrap();
    assert_eq!(empty.total, 0);
}
