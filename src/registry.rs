use hashlink::LinkedHashMap;
use serde::de::IgnoredAny;
use serde::Serialize;
use serde_json::value::RawValue;
use std::path::{Path, PathBuf};

pub const PROFILE_ASSOCIATIONS_KEY: &str = "profileAssociations";
pub const WORKSPACES_KEY: &str = "workspaces";

/// A workspace key exactly as the editor persisted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawEntry(String);

impl RawEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RawEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RawEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed registry {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode registry {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write registry {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top level of the storage file. Values stay raw so that anything this crate
/// does not own is written back untouched.
type Document = LinkedHashMap<String, Box<RawValue>>;

/// An object section (`profileAssociations` or its `workspaces`) with raw
/// values.
type Section = LinkedHashMap<String, Box<RawValue>>;

/// Reads and clears the editor's recency list.
///
/// Every call goes back to the file; nothing is cached, because the editor
/// rewrites the same file on its own schedule.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the workspace keys in the order the file stores them.
    ///
    /// A missing file is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<RawEntry>, RegistryError> {
        let Some(content) = self.read()? else {
            tracing::debug!(path = %self.path.display(), "registry file not found");
            return Ok(Vec::new());
        };
        let document = self.parse_document(&content)?;
        let Some(raw_profile) = document.get(PROFILE_ASSOCIATIONS_KEY) else {
            return Ok(Vec::new());
        };
        let profile: Option<Section> =
            serde_json::from_str(raw_profile.get()).map_err(|source| self.parse_error(source))?;
        let Some(raw_workspaces) = profile.as_ref().and_then(|p| p.get(WORKSPACES_KEY)) else {
            return Ok(Vec::new());
        };
        let workspaces: Option<LinkedHashMap<String, IgnoredAny>> =
            serde_json::from_str(raw_workspaces.get())
                .map_err(|source| self.parse_error(source))?;

        let entries: Vec<RawEntry> = workspaces
            .map(|map| map.into_iter().map(|(key, _)| RawEntry(key)).collect())
            .unwrap_or_default();
        tracing::debug!(count = entries.len(), "loaded workspace keys");
        Ok(entries)
    }

    /// Empty `profileAssociations.workspaces` and write the file back.
    ///
    /// Other keys, including siblings of `workspaces`, keep their exact text.
    /// A missing file or a document without `profileAssociations` is left
    /// alone.
    pub fn clear(&self) -> Result<(), RegistryError> {
        self.edit_workspaces(|workspaces| {
            workspaces.clear();
            true
        })
    }

    /// Drop a single key from `profileAssociations.workspaces`.
    ///
    /// Returns whether the key was present. The file is only rewritten when
    /// something was removed; the remaining entries keep their text.
    pub fn remove(&self, entry: &RawEntry) -> Result<bool, RegistryError> {
        let mut removed = false;
        self.edit_workspaces(|workspaces| {
            removed = workspaces.remove(entry.as_str()).is_some();
            removed
        })?;
        Ok(removed)
    }

    /// Read the document, hand the workspaces section to `edit` and write the
    /// result back when `edit` returns true. A null or missing section is
    /// given to `edit` as an empty map.
    fn edit_workspaces(
        &self,
        edit: impl FnOnce(&mut Section) -> bool,
    ) -> Result<(), RegistryError> {
        let Some(content) = self.read()? else {
            tracing::debug!(path = %self.path.display(), "registry file not found; nothing to change");
            return Ok(());
        };
        let mut document = self.parse_document(&content)?;

        let profile: Option<Section> = match document.get(PROFILE_ASSOCIATIONS_KEY) {
            Some(raw) => serde_json::from_str(raw.get()).map_err(|source| self.parse_error(source))?,
            None => None,
        };
        let Some(mut profile) = profile else {
            tracing::debug!("no profileAssociations section; nothing to change");
            return Ok(());
        };
        let workspaces: Option<Section> = match profile.get(WORKSPACES_KEY) {
            Some(raw) => serde_json::from_str(raw.get()).map_err(|source| self.parse_error(source))?,
            None => None,
        };
        let mut workspaces = workspaces.unwrap_or_default();
        if !edit(&mut workspaces) {
            return Ok(());
        }

        let raw_workspaces = serde_json::value::to_raw_value(&workspaces)
            .map_err(|source| self.serialize_error(source))?;
        match profile.get_mut(WORKSPACES_KEY) {
            Some(slot) => *slot = raw_workspaces,
            None => {
                profile.insert(WORKSPACES_KEY.to_string(), raw_workspaces);
            }
        }

        let raw_profile =
            serde_json::value::to_raw_value(&profile).map_err(|source| self.serialize_error(source))?;
        if let Some(slot) = document.get_mut(PROFILE_ASSOCIATIONS_KEY) {
            *slot = raw_profile;
        }

        let output =
            serde_json::to_string(&document).map_err(|source| self.serialize_error(source))?;
        self.write(&output)
    }

    /// Write through a sibling `.tmp` file and rename it into place, so a
    /// failed write leaves the registry as it was. Symlinks are followed.
    fn write(&self, output: &str) -> Result<(), RegistryError> {
        let target = std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let mut tmp = target.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let write_error = |source| RegistryError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::write(&tmp, output).map_err(write_error)?;
        if let Err(source) = std::fs::rename(&tmp, &target) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_error(source));
        }
        tracing::debug!(path = %self.path.display(), "registry written");
        Ok(())
    }

    fn read(&self) -> Result<Option<String>, RegistryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RegistryError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parse_document(&self, content: &str) -> Result<Document, RegistryError> {
        serde_json::from_str(content).map_err(|source| self.parse_error(source))
    }

    fn parse_error(&self, source: serde_json::Error) -> RegistryError {
        RegistryError::Parse {
            path: self.path.clone(),
            source,
        }
    }

    fn serialize_error(&self, source: serde_json::Error) -> RegistryError {
        RegistryError::Serialize {
            path: self.path.clone(),
            source,
        }
    }
}
