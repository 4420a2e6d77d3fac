use crate::identifier::{Identifier, Scheme, REMOTE_PREFIX};
use std::path::Path;

pub const SSH_AUTHORITY_PREFIX: &str = "ssh-remote+";

/// Tag shown in front of SSH workspaces. Users already know the entries by
/// this text, so it stays as written.
pub const SSH_LABEL: &str = "SHH";

/// Suffix of multi-root workspace files, left out of display names.
pub const WORKSPACE_FILE_SUFFIX: &str = ".code-workspace";

/// Derive the label shown for a workspace.
///
/// Returns `None` for SSH keys that do not carry a host and a path; such
/// entries are dropped from the list rather than shown half-named.
pub fn resolve_name(identifier: &Identifier, home: Option<&Path>) -> Option<String> {
    let decoded = identifier.decoded_path();
    let name = match identifier.scheme() {
        Scheme::LocalFileUri => Some(abbreviate_home(decoded, home)),
        Scheme::LocalPath => Some(basename(decoded)),
        Scheme::SshRemote => {
            let authority = decoded.strip_prefix(REMOTE_PREFIX).unwrap_or(decoded);
            match authority.strip_prefix(SSH_AUTHORITY_PREFIX) {
                Some(rest) => ssh_display_name(rest),
                None => Some(decoded.to_string()),
            }
        }
        Scheme::Unknown => Some(decoded.to_string()),
    };
    name.map(trim_workspace_suffix)
}

/// `app.code-workspace` shows as `app`. A bare suffix with nothing in front
/// of it is kept.
fn trim_workspace_suffix(name: String) -> String {
    match name.strip_suffix(WORKSPACE_FILE_SUFFIX) {
        Some(stem) if !stem.is_empty() && !stem.ends_with('/') => stem.to_string(),
        _ => name,
    }
}

/// Build `"[SHH: host] ~/rest"` from `host/seg1/seg2/...`.
///
/// The first two segments after the host are taken to be the remote home
/// directory (`home/user`) and are folded into `~`.
pub fn ssh_display_name(host_and_path: &str) -> Option<String> {
    if !host_and_path.contains('/') {
        return None;
    }
    let segments: Vec<&str> = host_and_path.split('/').collect();
    if segments.len() < 2 {
        return None;
    }
    let host = segments[0];
    let path = if segments.len() >= 4 {
        format!("~/{}", segments[3..].join("/"))
    } else {
        String::new()
    };
    Some(format!("[{SSH_LABEL}: {host}] {path}"))
}

/// Replace a leading home directory with `~`.
pub fn abbreviate_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    match Path::new(path).strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.to_string_lossy()),
        Err(_) => path.to_string(),
    }
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
