//! Building and dispatching the editor invocation.

use crate::identifier::{Identifier, Scheme};
use crate::settings::Settings;
use std::process::{Command, Stdio};

pub const NEW_WINDOW_FLAG: &str = "--new-window";
pub const FOLDER_URI_FLAG: &str = "--folder-uri";

/// How to address the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub command: String,
    pub label: String,
    pub new_window: bool,
    /// Passed ahead of the generated flags on every launch.
    pub extra_args: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: "code".into(),
            label: "Code".into(),
            new_window: false,
            extra_args: Vec::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let extra_args = match settings.extra_args.as_deref().map(str::trim) {
            Some(args) if !args.is_empty() => shlex::split(args).unwrap_or_else(|| {
                tracing::warn!("extra_args '{}' could not be split; using whitespace", args);
                args.split_whitespace().map(String::from).collect()
            }),
            _ => Vec::new(),
        };
        Self {
            command: settings.editor_command.clone(),
            label: settings.editor_label.clone(),
            new_window: settings.new_window,
            extra_args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchArg {
    Flag(String),
    /// A workspace target, held without quotes.
    Target(String),
}

impl LaunchArg {
    fn as_str(&self) -> &str {
        match self {
            LaunchArg::Flag(s) | LaunchArg::Target(s) => s,
        }
    }

    /// Flags as-is, targets wrapped in double quotes.
    pub fn rendered(&self) -> String {
        match self {
            LaunchArg::Flag(s) => s.clone(),
            LaunchArg::Target(s) => format!("\"{s}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub executable: String,
    pub args: Vec<LaunchArg>,
    pub background: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchSpec {
    /// Build the invocation that opens `targets` in order.
    ///
    /// A single remote target is always addressed with `--folder-uri`, which
    /// then takes the place of `--new-window`. Targets go out decoded, local
    /// ones as plain paths without `file://`.
    pub fn build<'a>(
        editor: &EditorConfig,
        targets: impl IntoIterator<Item = &'a Identifier>,
    ) -> Self {
        let targets: Vec<&Identifier> = targets.into_iter().collect();
        let mut args: Vec<LaunchArg> = editor
            .extra_args
            .iter()
            .cloned()
            .map(LaunchArg::Flag)
            .collect();

        let single_remote = matches!(targets.as_slice(), [t] if t.scheme() == Scheme::SshRemote);
        if single_remote {
            args.push(LaunchArg::Flag(FOLDER_URI_FLAG.into()));
        } else if editor.new_window {
            args.push(LaunchArg::Flag(NEW_WINDOW_FLAG.into()));
        }

        args.extend(targets.into_iter().map(|t| LaunchArg::Target(target_text(t))));

        Self {
            executable: editor.command.clone(),
            args,
            background: true,
        }
    }

    /// The argument list with targets quoted, as a command line would show it.
    pub fn rendered_args(&self) -> Vec<String> {
        self.args.iter().map(LaunchArg::rendered).collect()
    }

    /// The argument vector handed to the process. No shell is involved, so
    /// targets go through unquoted.
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(LaunchArg::as_str).collect()
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.executable.clone())
            .chain(self.rendered_args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Start the editor. Background launches return as soon as the process
    /// exists; the child is reaped on a helper thread.
    pub fn spawn(&self) -> Result<(), LaunchError> {
        let mut child = Command::new(&self.executable)
            .args(self.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                executable: self.executable.clone(),
                source,
            })?;
        if self.background {
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        } else if let Err(e) = child.wait() {
            tracing::warn!("waiting for '{}' failed: {e}", self.executable);
        }
        Ok(())
    }
}

fn target_text(target: &Identifier) -> String {
    match target.scheme() {
        Scheme::SshRemote | Scheme::LocalFileUri | Scheme::LocalPath => {
            target.decoded_path().to_string()
        }
        Scheme::Unknown => target.raw().as_str().to_string(),
    }
}
