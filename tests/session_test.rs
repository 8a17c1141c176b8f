use figure_workflow::model::{Document, Stage, Task};
use figure_workflow::session::kv::{DirStore, KeyValueStore, MemoryStore};
use figure_workflow::session::{ProjectMeta, SessionSnapshot, keys};

#[test]
fn test_empty_store_loads_default_session() {
    let store = MemoryStore::new();
    let session = SessionSnapshot::load(&store);

    assert!(session.documents.is_empty());
    assert!(session.tasks.is_empty());
    assert!(session.selected_labels.is_empty());
    assert_eq!(session.project.name, "");
}

#[test]
fn test_corrupt_key_falls_back_to_default() {
    let mut store = MemoryStore::new();
    store.set(keys::PROJECT_TASKS, "{not valid json".to_string());
    store.set(
        keys::PROJECT_DATA,
        r#"{"name":"ok","description":"still loads"}"#.to_string(),
    );

    let session = SessionSnapshot::load(&store);

    assert!(session.tasks.is_empty(), "corrupt key degrades to default");
    assert_eq!(session.project.name, "ok", "other keys still decode");
}

#[test]
fn test_save_load_round_trip() {
    let mut store = MemoryStore::new();

    let task = Task::new("review mockups", Stage::Analyse);
    let snapshot = SessionSnapshot {
        documents: vec![Document::new("spec.pdf", "handle", Some(Stage::Design))],
        project: ProjectMeta {
            name: "Q3".to_string(),
            description: "quarterly".to_string(),
        },
        selected_labels: vec!["design".to_string()],
        tasks: vec![task],
    };
    snapshot.save(&mut store).expect("save should succeed");

    let loaded = SessionSnapshot::load(&store);
    assert_eq!(loaded.documents.len(), 1);
    assert_eq!(loaded.documents[0].label, Some(Stage::Design));
    assert_eq!(loaded.project.name, "Q3");
    assert_eq!(loaded.selected_labels, vec!["design"]);
    assert_eq!(loaded.tasks.len(), 1);
    assert_eq!(loaded.tasks[0].stage, Stage::Analyse);
}

#[test]
fn test_unknown_stage_in_payload_degrades_that_key() {
    let mut store = MemoryStore::new();
    // "done" is not one of the four closed stages; the tasks key must not
    // smuggle an invalid stage into the engine.
    store.set(
        keys::PROJECT_TASKS,
        r#"[{"id":"t1","title":"x","figures":[],"stage":"done"}]"#.to_string(),
    );

    let session = SessionSnapshot::load(&store);
    assert!(session.tasks.is_empty());
}

#[test]
fn test_task_payload_accepts_column_alias() {
    let mut store = MemoryStore::new();
    store.set(
        keys::PROJECT_TASKS,
        r#"[{"id":"t1","title":"x","figures":[],"column":"dev"}]"#.to_string(),
    );

    let session = SessionSnapshot::load(&store);
    assert_eq!(session.tasks.len(), 1);
    assert_eq!(session.tasks[0].stage, Stage::Dev);
}

#[test]
fn test_dir_store_round_trip() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut store = DirStore::new(tmp.path());

    let snapshot = SessionSnapshot {
        documents: vec![],
        project: ProjectMeta {
            name: "persisted".to_string(),
            description: String::new(),
        },
        selected_labels: vec![],
        tasks: vec![Task::new("t", Stage::Testing)],
    };
    snapshot.save(&mut store).expect("save should succeed");

    let loaded = SessionSnapshot::load(&store);
    assert_eq!(loaded.project.name, "persisted");
    assert_eq!(loaded.tasks.len(), 1);

    store.remove(keys::PROJECT_TASKS);
    let reloaded = SessionSnapshot::load(&store);
    assert!(reloaded.tasks.is_empty());
}
