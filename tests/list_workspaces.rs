use std::fs;
use std::path::Path;
use tempfile::tempdir;
use vscode_workspaces::launch_spec::EditorConfig;
use vscode_workspaces::{RegistryError, RegistryStore, Scheme, WorkspaceService};

fn write_registry(path: &Path, keys: &[&str]) {
    // Built by hand: key order matters and `serde_json::Map` would sort it.
    let workspaces: Vec<String> = keys
        .iter()
        .map(|k| format!("{}:{{}}", serde_json::to_string(k).unwrap()))
        .collect();
    let doc = format!(
        r#"{{"profileAssociations":{{"workspaces":{{{}}}}}}}"#,
        workspaces.join(",")
    );
    fs::write(path, doc).unwrap();
}

fn service(registry: &Path, home: Option<&Path>) -> WorkspaceService {
    WorkspaceService::new(
        RegistryStore::new(registry),
        EditorConfig::default(),
        home.map(Path::to_path_buf),
    )
}

#[test]
fn lists_newest_first_with_names() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    let project_uri = format!("file://{}", project.display());
    let project = project.to_string_lossy().to_string();
    let registry = dir.path().join("storage.json");
    write_registry(
        &registry,
        &[
            "vscode-remote://ssh-remote+devbox/home/me/api",
            &project,
            "dev-container://abc",
        ],
    );

    let entries = service(&registry, None).list_workspaces().unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["dev-container://abc", "project", "[SHH: devbox] ~/api"]
    );
    assert_eq!(entries[1].identifier.scheme(), Scheme::LocalPath);
    assert!(entries[1].exists_on_disk);
    assert!(entries.iter().all(|e| !e.display_name.is_empty()));

    write_registry(&registry, &[&project_uri]);
    let entries = service(&registry, Some(dir.path())).list_workspaces().unwrap();
    assert_eq!(entries[0].display_name, "~/project");
    assert_eq!(entries[0].identifier.scheme(), Scheme::LocalFileUri);
}

#[test]
fn missing_local_entries_are_skipped() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    let gone = dir.path().join("gone").to_string_lossy().to_string();
    let gone_uri = format!("file://{gone}");
    write_registry(&registry, &[&gone, &gone_uri]);

    let entries = service(&registry, None).list_workspaces().unwrap();
    assert!(entries.is_empty());
}

#[test]
fn home_relative_entries_resolve_against_home() {
    let home = tempdir().unwrap();
    fs::create_dir(home.path().join("code")).unwrap();
    let registry = home.path().join("storage.json");
    write_registry(&registry, &["~/code", "~/missing"]);

    let entries = service(&registry, Some(home.path()))
        .list_workspaces()
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].display_name, "code");
}

#[test]
fn percent_encoded_keys_are_decoded() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    write_registry(
        &registry,
        &["vscode-remote%3A%2F%2Fssh-remote%2Bbox%2Fhome%2Fme%2Fmy%20app"],
    );
    let entries = service(&registry, None).list_workspaces().unwrap();
    assert_eq!(entries[0].display_name, "[SHH: box] ~/my app");
    assert_eq!(
        entries[0].identifier.raw().as_str(),
        "vscode-remote%3A%2F%2Fssh-remote%2Bbox%2Fhome%2Fme%2Fmy%20app"
    );
}

#[test]
fn listing_is_repeatable_and_read_only() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    write_registry(
        &registry,
        &[
            "vscode-remote://ssh-remote+a/home/u/one",
            "vscode-remote://ssh-remote+b/home/u/two",
        ],
    );
    let before = fs::read_to_string(&registry).unwrap();
    let svc = service(&registry, None);
    let first = svc.list_workspaces().unwrap();
    let second = svc.list_workspaces().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(fs::read_to_string(&registry).unwrap(), before);
}

#[test]
fn no_registry_means_no_workspaces() {
    let dir = tempdir().unwrap();
    let entries = service(&dir.path().join("absent.json"), None)
        .list_workspaces()
        .unwrap();
    assert!(entries.is_empty());
}

#[test]
fn malformed_registry_is_reported() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    fs::write(&registry, "garbage").unwrap();
    assert!(matches!(
        service(&registry, None).list_workspaces(),
        Err(RegistryError::Parse { .. })
    ));
}

#[test]
fn clear_all_then_list_is_empty() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    write_registry(&registry, &["vscode-remote://ssh-remote+a/home/u/one"]);
    let svc = service(&registry, None);
    svc.clear_all().unwrap();
    assert!(svc.list_workspaces().unwrap().is_empty());
}

#[test]
fn clear_all_failure_is_reported_and_nothing_changes() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    write_registry(&registry, &["vscode-remote://ssh-remote+a/home/u/one"]);
    let before = fs::read_to_string(&registry).unwrap();
    fs::create_dir(dir.path().join("storage.json.tmp")).unwrap();
    fs::write(dir.path().join("storage.json.tmp").join("keep"), "x").unwrap();

    let svc = service(&registry, None);
    assert!(matches!(svc.clear_all(), Err(RegistryError::Write { .. })));
    assert_eq!(fs::read_to_string(&registry).unwrap(), before);
    assert_eq!(svc.list_workspaces().unwrap().len(), 1);
}

#[test]
fn remove_forgets_one_workspace() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("storage.json");
    write_registry(
        &registry,
        &[
            "vscode-remote://ssh-remote+a/home/u/one",
            "vscode-remote%3A%2F%2Fssh-remote%2Bb%2Fhome%2Fu%2Ftwo",
        ],
    );
    let svc = service(&registry, None);
    let entries = svc.list_workspaces().unwrap();
    assert_eq!(entries[0].display_name, "[SHH: b] ~/two");
    assert!(svc.remove(&entries[0].identifier).unwrap());

    let names: Vec<String> = svc
        .list_workspaces()
        .unwrap()
        .into_iter()
        .map(|e| e.display_name)
        .collect();
    assert_eq!(names, vec!["[SHH: a] ~/one"]);
}

#[test]
fn workspace_files_are_listed_without_suffix() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("team.code-workspace");
    fs::write(&file, "{}").unwrap();
    let registry = dir.path().join("storage.json");
    let key = file.to_string_lossy().to_string();
    write_registry(&registry, &[key.as_str()]);
    let entries = service(&registry, None).list_workspaces().unwrap();
    assert_eq!(entries[0].display_name, "team");
}
