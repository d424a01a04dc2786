use std::collections::HashSet;
use todotree_core::{
    link, map_id_to_branch, ChangeSet, FlatRecord, Project, RecordKind, Registry, Section, Task,
};

fn child_ids(registry: &Registry, id: &str) -> Vec<String> {
    registry
        .children_of(id)
        .unwrap()
        .into_iter()
        .map(|node| node.id().unwrap().to_string())
        .collect()
}

fn all_child_ids(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .flat_map(|(index, _)| registry.child_nodes(index))
        .map(|node| node.id().unwrap().to_string())
        .collect()
}

fn scenario() -> ChangeSet {
    ChangeSet::new(
        vec![Project::new("P1", "Home")],
        vec![Section::new("S1", "Kitchen").in_project("P1")],
        vec![
            Task::new("K1", "Dishes").in_section("S1"),
            Task::new("K2", "Bins").in_project("P1"),
        ],
    )
}

#[test]
fn scenario_builds_expected_forest() {
    let registry = map_id_to_branch(&scenario()).unwrap();

    assert_eq!(registry.len(), 4);
    assert_eq!(child_ids(&registry, "P1"), vec!["S1", "K2"]);
    assert_eq!(child_ids(&registry, "S1"), vec!["K1"]);
    assert!(child_ids(&registry, "K1").is_empty());
    assert!(child_ids(&registry, "K2").is_empty());
}

#[test]
fn registry_keys_cover_every_input_id() {
    let change_set = ChangeSet::new(
        vec![
            Project::new("P1", "Work"),
            Project::new("P2", "Clients").with_parent("P1"),
        ],
        vec![
            Section::new("S1", "Backlog").in_project("P2"),
            Section::new("S2", "Done").in_project("P1"),
        ],
        vec![
            Task::new("T1", "Invoice").in_section("S1"),
            Task::new("T2", "Follow up").with_parent("T1"),
            Task::new("T3", "Archive").in_project("P1"),
        ],
    );
    let registry = map_id_to_branch(&change_set).unwrap();

    let expected: HashSet<&str> = ["P1", "P2", "S1", "S2", "T1", "T2", "T3"]
        .into_iter()
        .collect();
    let actual: HashSet<&str> = registry.ids().map(|id| id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn parentless_records_are_never_children() {
    let change_set = ChangeSet::new(
        vec![Project::new("P1", "Work"), Project::new("P2", "Home")],
        vec![Section::new("S0", "Loose")],
        vec![
            Task::new("T0", "Inbox item"),
            Task::new("T1", "Laundry").in_project("P2"),
        ],
    );
    let registry = map_id_to_branch(&change_set).unwrap();

    let roots: Vec<String> = registry
        .roots()
        .map(|(_, node)| node.id().unwrap().to_string())
        .collect();
    assert_eq!(roots, vec!["P1", "P2", "S0", "T0"]);

    let children = all_child_ids(&registry);
    for root in &roots {
        assert!(!children.contains(root));
    }
}

#[test]
fn resolvable_parent_lists_child_exactly_once() {
    let change_set = scenario();
    let registry = map_id_to_branch(&change_set).unwrap();

    for (_, record) in change_set.records() {
        let Some(parent_id) = record.parent_id() else {
            continue;
        };
        let id = record.id().unwrap().to_string();
        let occurrences = child_ids(&registry, parent_id.as_str())
            .into_iter()
            .filter(|child| *child == id)
            .count();
        assert_eq!(occurrences, 1, "{id} under {parent_id}");
    }
}

#[test]
fn dangling_parent_leaves_task_unlinked() {
    let change_set = ChangeSet::new(
        vec![Project::new("P1", "Work")],
        vec![],
        vec![Task::new("T1", "Deleted parent").with_parent("T-gone")],
    );
    let registry = map_id_to_branch(&change_set).unwrap();

    assert!(registry.contains("T1"));
    assert!(!all_child_ids(&registry).contains(&"T1".to_string()));
    let orphans: Vec<String> = registry
        .orphans()
        .map(|(_, node)| node.id().unwrap().to_string())
        .collect();
    assert_eq!(orphans, vec!["T1"]);
}

#[test]
fn duplicate_id_keeps_last_processed_record() {
    let change_set = ChangeSet::new(
        vec![Project::new("1", "Project one")],
        vec![],
        vec![Task::new("1", "Task one")],
    );
    let registry = map_id_to_branch(&change_set).unwrap();

    assert_eq!(registry.len(), 1);
    let node = registry.get("1").unwrap();
    assert_eq!(node.record().kind(), RecordKind::Task);
    assert_eq!(node.record().display_name(), "Task one");
}

#[test]
fn children_keep_processing_order() {
    let change_set = ChangeSet::new(
        vec![Project::new("P", "Errands")],
        vec![],
        vec![
            Task::new("T1", "first").in_project("P"),
            Task::new("T2", "second").in_project("P"),
            Task::new("T3", "third").in_project("P"),
        ],
    );
    let registry = map_id_to_branch(&change_set).unwrap();
    assert_eq!(child_ids(&registry, "P"), vec!["T1", "T2", "T3"]);
}

#[test]
fn relinking_same_registry_duplicates_children() {
    let change_set = scenario();
    let mut registry = Registry::build(&change_set).unwrap();
    link(&mut registry, &change_set).unwrap();
    link(&mut registry, &change_set).unwrap();

    assert_eq!(child_ids(&registry, "P1"), vec!["S1", "K2", "S1", "K2"]);
}
