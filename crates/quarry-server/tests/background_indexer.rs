use quarry_core::Config;
use quarry_index::Model;
use quarry_server::indexer::spawn_indexer;
use quarry_server::ServerState;

#[test]
fn background_scan_swaps_in_and_saves_the_model() {
    let root = tempfile::tempdir().unwrap();
    let state_dir = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("a.md"), "hashmap buckets").unwrap();
    std::fs::write(root.path().join("b.md"), "btree nodes").unwrap();

    let index_file = state_dir.path().join("index.json");
    let config = Config {
        index_roots: vec![root.path().to_path_buf()],
        exclusions: vec![],
        index_path: index_file.clone(),
        ..Default::default()
    };
    let state = ServerState::shared(config, Model::new());

    spawn_indexer(state.clone(), index_file.clone())
        .join()
        .unwrap();

    assert!(!state.is_indexing());
    assert!(state.last_indexed() > 0);
    assert_eq!(state.model().len(), 2);
    assert_eq!(Model::load(&index_file).unwrap().len(), 2);
}

#[test]
fn failed_scan_keeps_the_previous_model() {
    let state_dir = tempfile::tempdir().unwrap();
    let index_file = state_dir.path().join("index.json");
    let config = Config {
        index_roots: vec![state_dir.path().join("missing-root")],
        index_path: index_file.clone(),
        ..Default::default()
    };

    let mut model = Model::new();
    model.add_document(
        "kept.md".into(),
        std::time::SystemTime::UNIX_EPOCH,
        &"kept".chars().collect::<Vec<_>>(),
    );
    let state = ServerState::shared(config, model);

    spawn_indexer(state.clone(), index_file.clone())
        .join()
        .unwrap();

    assert!(!state.is_indexing());
    assert_eq!(state.last_indexed(), 0);
    assert_eq!(state.model().len(), 1);
    assert!(!index_file.exists());
}
