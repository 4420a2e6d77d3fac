//! Decoding and classification of stored workspace keys.

use crate::registry::RawEntry;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REMOTE_PREFIX: &str = "vscode-remote://";
pub const FILE_PREFIX: &str = "file://";

/// Where a workspace lives, judged from its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    LocalPath,
    LocalFileUri,
    SshRemote,
    Unknown,
}

impl Scheme {
    pub fn is_local(self) -> bool {
        matches!(self, Scheme::LocalPath | Scheme::LocalFileUri)
    }
}

/// A decoded registry key.
///
/// `decoded_path` never contains percent escapes from the stored form. For
/// `file://` keys the prefix is removed; every other scheme keeps the whole
/// decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    raw: RawEntry,
    scheme: Scheme,
    decoded_path: String,
}

impl Identifier {
    pub fn decode(raw: RawEntry) -> Self {
        let decoded = percent_decode(raw.as_str());
        let scheme = classify(&decoded);
        let decoded_path = match scheme {
            Scheme::LocalFileUri => decoded[FILE_PREFIX.len()..].to_string(),
            _ => decoded,
        };
        Self {
            raw,
            scheme,
            decoded_path,
        }
    }

    pub fn raw(&self) -> &RawEntry {
        &self.raw
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn decoded_path(&self) -> &str {
        &self.decoded_path
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::decode(RawEntry::new(raw))
    }
}

/// Undo RFC 3986 percent-encoding. Invalid UTF-8 sequences are replaced
/// rather than rejected so every key still yields a name.
pub fn percent_decode(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

fn classify(decoded: &str) -> Scheme {
    if decoded.starts_with(REMOTE_PREFIX) {
        Scheme::SshRemote
    } else if decoded.starts_with(FILE_PREFIX) {
        Scheme::LocalFileUri
    } else if looks_like_path(decoded) {
        Scheme::LocalPath
    } else {
        Scheme::Unknown
    }
}

fn looks_like_path(text: &str) -> bool {
    if text.contains("://") {
        return false;
    }
    text.starts_with('~') || Path::new(text).is_absolute()
}

/// Check that a local workspace still exists. Remote and unknown keys have
/// nothing to check and always pass.
pub fn validate(identifier: &Identifier, home: Option<&Path>) -> bool {
    if !identifier.scheme.is_local() {
        return true;
    }
    expand_home(&identifier.decoded_path, home).exists()
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}
