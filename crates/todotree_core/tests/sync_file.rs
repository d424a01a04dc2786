use serde_json::json;
use std::io::Write;
use todotree_core::tree::walk::iter_childless_tasks;
use todotree_core::{
    map_id_to_branch, read_changes, FileSyncSource, SyncError, SyncOutcome, TreeError,
};

fn write_response(value: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

#[test]
fn saved_response_rebuilds_tree() {
    let file = write_response(&json!({
        "full_sync": true,
        "sync_token": "abc123",
        "labels": [{"id": "L1", "name": "errand"}],
        "projects": [
            {"id": "2203306141", "name": "Inbox", "child_order": 0, "color": "grey"},
            {"id": 2203306142_i64, "name": "Garden", "child_order": 1, "parent_id": "2203306141"}
        ],
        "sections": [
            {"id": "7025", "name": "Spring", "section_order": 1,
             "project_id": 2203306142_i64, "parent_id": null}
        ],
        "items": [
            {"id": "1", "content": "Plant", "child_order": 0, "labels": ["errand"],
             "project_id": "2203306142", "section_id": "7025", "parent_id": null},
            {"id": "2", "content": "Buy seeds", "child_order": 0,
             "project_id": "2203306142", "section_id": "7025", "parent_id": "1"},
            {"id": "3", "content": "Water", "child_order": 1,
             "project_id": "2203306142", "section_id": null, "parent_id": null}
        ]
    }));

    let source = FileSyncSource::new(file.path());
    let SyncOutcome::Changes(change_set) = read_changes(&source, "*").unwrap() else {
        panic!("expected changes");
    };
    assert_eq!(change_set.labels.len(), 1);

    let registry = map_id_to_branch(&change_set).unwrap();
    assert_eq!(registry.len(), 6);

    let inbox = registry.index_of("2203306141").unwrap();
    let garden: Vec<String> = registry
        .child_nodes(inbox)
        .map(|node| node.id().unwrap().to_string())
        .collect();
    assert_eq!(garden, vec!["2203306142"]);

    let under_inbox: Vec<String> = iter_childless_tasks(&registry, inbox)
        .map(|task| task.content.clone())
        .collect();
    assert_eq!(under_inbox, vec!["Water", "Buy seeds"]);

    let project = registry.get("2203306141").unwrap().record().as_project().unwrap();
    assert_eq!(project.extra["color"], "grey");
}

#[test]
fn empty_response_is_no_changes() {
    let file = write_response(&json!({"full_sync": false, "sync_token": "abc123"}));
    let source = FileSyncSource::new(file.path());

    assert_eq!(
        read_changes(&source, "abc123").unwrap(),
        SyncOutcome::NoChanges
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSyncSource::new(dir.path().join("absent.json"));

    let err = read_changes(&source, "*").unwrap_err();
    assert!(matches!(err, SyncError::Io { .. }));
}

#[test]
fn task_without_id_fails_construction() {
    let file = write_response(&json!({
        "full_sync": true,
        "sync_token": "t",
        "items": [{"content": "anonymous"}]
    }));
    let source = FileSyncSource::new(file.path());
    let SyncOutcome::Changes(change_set) = read_changes(&source, "*").unwrap() else {
        panic!("expected changes");
    };

    let err = map_id_to_branch(&change_set).unwrap_err();
    assert!(matches!(err, TreeError::MissingId { position: 0, .. }));
}
