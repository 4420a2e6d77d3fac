use crate::identifier::{self, Identifier};
use crate::launch_spec::{EditorConfig, LaunchSpec};
use crate::naming;
use crate::registry::{RawEntry, RegistryError, RegistryStore};
use crate::settings::Settings;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A workspace ready to be shown. Entries only exist once a name has been
/// resolved, and local entries only once their target was found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceEntry {
    pub identifier: Identifier,
    pub display_name: String,
    pub exists_on_disk: bool,
}

/// Most recently added first. The editor appends new keys, so this is the
/// reverse of the stored order.
pub fn order(entries: Vec<WorkspaceEntry>) -> Vec<WorkspaceEntry> {
    entries.into_iter().rev().collect()
}

/// Decode, validate, name and order raw keys.
pub fn resolve_entries(raw: Vec<RawEntry>, home: Option<&Path>) -> Vec<WorkspaceEntry> {
    let entries = raw
        .into_iter()
        .map(Identifier::decode)
        .filter(|id| {
            let keep = identifier::validate(id, home);
            if !keep {
                tracing::debug!("skipping missing workspace {}", id.decoded_path());
            }
            keep
        })
        .filter_map(|id| {
            let Some(display_name) = naming::resolve_name(&id, home) else {
                tracing::debug!("skipping unparseable workspace key {}", id.raw());
                return None;
            };
            let exists_on_disk = id.scheme().is_local();
            Some(WorkspaceEntry {
                identifier: id,
                display_name,
                exists_on_disk,
            })
        })
        .collect();
    order(entries)
}

/// Everything a menu needs: list, open, remove and clear.
///
/// Built once from [`Settings`]; nothing below reads the environment.
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    store: RegistryStore,
    editor: EditorConfig,
    home: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl WorkspaceService {
    pub fn new(store: RegistryStore, editor: EditorConfig, home: Option<PathBuf>) -> Self {
        Self {
            store,
            editor,
            home,
            log_file: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let registry = settings.registry_path().unwrap_or_else(|| {
            tracing::warn!("no config directory found; using ./storage.json as registry");
            PathBuf::from("storage.json")
        });
        Self::new(
            RegistryStore::new(registry),
            EditorConfig::from_settings(settings),
            dirs_next::home_dir(),
        )
        .with_log_file(settings.log_file_path())
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    pub fn list_workspaces(&self) -> Result<Vec<WorkspaceEntry>, RegistryError> {
        let raw = self.store.load().map_err(|e| {
            tracing::error!("failed to load recent workspaces: {e}");
            e
        })?;
        let total = raw.len();
        let entries = resolve_entries(raw, self.home.as_deref());
        tracing::debug!("{} of {} workspaces listed", entries.len(), total);
        Ok(entries)
    }

    /// Open a workspace by its stored key. Launch failures are logged and
    /// otherwise ignored.
    pub fn open(&self, identifier: &Identifier) {
        self.launch(std::slice::from_ref(identifier));
    }

    /// Open the log file in the editor.
    pub fn open_logs(&self) {
        let Some(path) = &self.log_file else {
            tracing::warn!("no log file configured");
            return;
        };
        let path = Identifier::from(path.to_string_lossy().as_ref());
        self.launch(&[path]);
    }

    pub fn clear_all(&self) -> Result<(), RegistryError> {
        tracing::info!("clearing recent workspaces");
        match self.store.clear() {
            Ok(()) => {
                tracing::info!("cleared recent workspaces");
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to clear recent workspaces: {e}");
                Err(e)
            }
        }
    }

    /// Forget one workspace. Returns whether it was in the list.
    pub fn remove(&self, identifier: &Identifier) -> Result<bool, RegistryError> {
        match self.store.remove(identifier.raw()) {
            Ok(true) => {
                tracing::info!("removed workspace {}", identifier.decoded_path());
                Ok(true)
            }
            Ok(false) => {
                tracing::debug!("workspace {} was not in the list", identifier.raw());
                Ok(false)
            }
            Err(e) => {
                tracing::error!("failed to remove workspace {}: {e}", identifier.raw());
                Err(e)
            }
        }
    }

    fn launch(&self, targets: &[Identifier]) {
        let spec = LaunchSpec::build(&self.editor, targets);
        tracing::info!(
            "launching {} with {}",
            self.editor.label,
            spec.command_line()
        );
        if let Err(e) = spec.spawn() {
            tracing::error!("failed to launch {}: {e}", self.editor.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(keys: &[&str]) -> Vec<RawEntry> {
        keys.iter().map(|k| RawEntry::new(*k)).collect()
    }

    #[test]
    fn newest_first() {
        let entries = resolve_entries(
            raw(&[
                "vscode-remote://ssh-remote+a/home/u/one",
                "vscode-remote://ssh-remote+b/home/u/two",
                "other://three",
            ]),
            None,
        );
        let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["other://three", "[SHH: b] ~/two", "[SHH: a] ~/one"]);
    }

    #[test]
    fn drops_missing_and_unparseable() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        std::fs::create_dir(&present).unwrap();
        let present = present.to_string_lossy().to_string();
        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let uri = format!("file://{present}");

        let entries = resolve_entries(
            raw(&[
                present.as_str(),
                missing.as_str(),
                "vscode-remote://ssh-remote+onlyhost",
                uri.as_str(),
            ]),
            None,
        );
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.exists_on_disk));
        assert_eq!(entries[0].display_name, present);
        assert_eq!(entries[1].display_name, "present");
    }

    #[test]
    fn remote_entries_are_not_on_disk() {
        let entries = resolve_entries(raw(&["vscode-remote://ssh-remote+a/home/u/one"]), None);
        assert!(!entries[0].exists_on_disk);
    }
}
