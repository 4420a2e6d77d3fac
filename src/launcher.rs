use crate::actions::Action;
use crate::plugins::workspaces::{CLEAR_ACTION, LOGS_ACTION, OPEN_PREFIX, REMOVE_PREFIX};
use crate::workspace::WorkspaceService;

#[derive(Debug, Clone, PartialEq)]
enum ActionKind<'a> {
    WorkspaceOpen(&'a str),
    WorkspaceRemove(&'a str),
    WorkspaceClear,
    WorkspaceLogs,
    Unsupported(&'a str),
}

fn parse_action_kind(action: &Action) -> ActionKind<'_> {
    let s = action.action.as_str();
    if let Some(raw) = s.strip_prefix(OPEN_PREFIX) {
        return ActionKind::WorkspaceOpen(raw);
    }
    if let Some(raw) = s.strip_prefix(REMOVE_PREFIX) {
        return ActionKind::WorkspaceRemove(raw);
    }
    if s == CLEAR_ACTION {
        return ActionKind::WorkspaceClear;
    }
    if s == LOGS_ACTION {
        return ActionKind::WorkspaceLogs;
    }
    ActionKind::Unsupported(s)
}

/// Launch an [`Action`] produced by the workspaces plugin.
///
/// Opening never fails from the caller's point of view: a missing editor is
/// logged by the service. Removing and clearing report registry failures.
pub fn launch_action(action: &Action, service: &WorkspaceService) -> anyhow::Result<()> {
    use crate::actions::workspaces;
    match parse_action_kind(action) {
        ActionKind::WorkspaceOpen(raw) => workspaces::open(service, raw),
        ActionKind::WorkspaceRemove(raw) => workspaces::remove(service, raw),
        ActionKind::WorkspaceClear => workspaces::clear(service),
        ActionKind::WorkspaceLogs => workspaces::open_logs(service),
        ActionKind::Unsupported(s) => anyhow::bail!("unsupported action '{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(id: &str) -> Action {
        Action {
            label: String::new(),
            desc: String::new(),
            action: id.into(),
            args: None,
        }
    }

    #[test]
    fn parses_workspace_actions() {
        assert_eq!(
            parse_action_kind(&action("workspace:open:vscode-remote://ssh-remote+h/a")),
            ActionKind::WorkspaceOpen("vscode-remote://ssh-remote+h/a")
        );
        assert_eq!(
            parse_action_kind(&action("workspace:remove:/home/u/a")),
            ActionKind::WorkspaceRemove("/home/u/a")
        );
        assert_eq!(
            parse_action_kind(&action("workspace:clear")),
            ActionKind::WorkspaceClear
        );
        assert_eq!(
            parse_action_kind(&action("workspace:logs")),
            ActionKind::WorkspaceLogs
        );
        assert_eq!(
            parse_action_kind(&action("history:clear")),
            ActionKind::Unsupported("history:clear")
        );
    }
}
