use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points the registry store at another file.
pub const STORAGE_ENV: &str = "VSCODE_WORKSPACES_STORAGE";

const SETTINGS_DIR: &str = "vscode-workspaces";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Executable used to open workspaces.
    #[serde(default = "default_editor_command")]
    pub editor_command: String,
    /// Name of the editor as shown in menu text.
    #[serde(default = "default_editor_label")]
    pub editor_label: String,
    /// Always ask the editor for a new window.
    #[serde(default)]
    pub new_window: bool,
    /// Registry file to read instead of the editor's default storage file.
    #[serde(default)]
    pub registry_path: Option<String>,
    /// Extra editor arguments, split like a shell would.
    #[serde(default)]
    pub extra_args: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// File receiving a copy of the log. `None` keeps logs on stderr only.
    #[serde(default = "default_log_file")]
    pub log_file: Option<String>,
    /// Seconds between refreshes when polling the list.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

fn default_editor_command() -> String {
    "code".into()
}

fn default_editor_label() -> String {
    "Code".into()
}

fn default_log_file() -> Option<String> {
    Some(
        std::env::temp_dir()
            .join("vscode_workspaces.log")
            .to_string_lossy()
            .to_string(),
    )
}

fn default_refresh_interval() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor_command: default_editor_command(),
            editor_label: default_editor_label(),
            new_window: false,
            registry_path: None,
            extra_args: None,
            debug_logging: false,
            log_file: default_log_file(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Registry file to use: the `registry_path` setting, then
    /// [`STORAGE_ENV`], then the editor's own storage file.
    pub fn registry_path(&self) -> Option<PathBuf> {
        if let Some(path) = self.registry_path.as_deref().filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = std::env::var_os(STORAGE_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        default_registry_path()
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// `<config dir>/Code/User/globalStorage/storage.json`
pub fn default_registry_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| {
        dir.join("Code")
            .join("User")
            .join("globalStorage")
            .join("storage.json")
    })
}

/// Falls back to `settings.json` in the working directory when the platform
/// has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}
