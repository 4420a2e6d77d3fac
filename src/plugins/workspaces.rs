use crate::actions::Action;
use crate::plugin::Plugin;
use crate::workspace::{WorkspaceEntry, WorkspaceService};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const PREFIX: &str = "ws";
const REMOVE_WORD: &str = "rm";

pub const OPEN_PREFIX: &str = "workspace:open:";
pub const REMOVE_PREFIX: &str = "workspace:remove:";
pub const CLEAR_ACTION: &str = "workspace:clear";
pub const LOGS_ACTION: &str = "workspace:logs";

/// Recent editor workspaces (prefix: `ws`).
///
/// `ws <text>` opens, `ws rm <text>` removes, `ws clear` and `ws logs` run
/// the matching command.
pub struct WorkspacesPlugin {
    service: WorkspaceService,
    matcher: SkimMatcherV2,
}

impl WorkspacesPlugin {
    pub fn new(service: WorkspaceService) -> Self {
        Self {
            service,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn service(&self) -> &WorkspaceService {
        &self.service
    }

    fn entry_matches(&self, entry: &WorkspaceEntry, filter: &str) -> bool {
        filter.is_empty()
            || self.matcher.fuzzy_match(&entry.display_name, filter).is_some()
            || self
                .matcher
                .fuzzy_match(entry.identifier.decoded_path(), filter)
                .is_some()
    }
}

/// `rm` or `rm <text>` selects workspaces to remove.
fn remove_filter(filter: &str) -> Option<&str> {
    let (word, rest) = filter.split_once(char::is_whitespace).unwrap_or((filter, ""));
    word.eq_ignore_ascii_case(REMOVE_WORD).then(|| rest.trim())
}

impl Plugin for WorkspacesPlugin {
    fn search(&self, query: &str) -> Vec<Action> {
        let query = query.trim_start();
        match query.get(..PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(PREFIX) => {}
            _ => return Vec::new(),
        }
        let rest = &query[PREFIX.len()..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return Vec::new();
        }
        let filter = rest.trim();

        // Commands come first; workspaces matching the same text still follow.
        let mut actions = Vec::new();
        if filter.eq_ignore_ascii_case("clear") {
            actions.push(Action {
                label: "Clear recent workspaces".into(),
                desc: "Workspaces".into(),
                action: CLEAR_ACTION.into(),
                args: None,
            });
        } else if filter.eq_ignore_ascii_case("logs") {
            actions.push(Action {
                label: format!("Open logs in {}", self.service.editor().label),
                desc: "Workspaces".into(),
                action: LOGS_ACTION.into(),
                args: None,
            });
        }

        // Load errors are logged by the service; the menu just comes up empty.
        let entries = self.service.list_workspaces().unwrap_or_default();

        if let Some(target) = remove_filter(filter) {
            return entries
                .into_iter()
                .filter(|e| self.entry_matches(e, target))
                .map(|e| Action {
                    label: format!("Remove {}", e.display_name),
                    desc: e.identifier.decoded_path().to_string(),
                    action: format!("{REMOVE_PREFIX}{}", e.identifier.raw()),
                    args: None,
                })
                .collect();
        }

        actions.extend(
            entries
                .into_iter()
                .filter(|e| self.entry_matches(e, filter))
                .map(|e| Action {
                    desc: e.identifier.decoded_path().to_string(),
                    action: format!("{OPEN_PREFIX}{}", e.identifier.raw()),
                    label: e.display_name,
                    args: None,
                }),
        );
        actions
    }

    fn name(&self) -> &str {
        "workspaces"
    }

    fn description(&self) -> &str {
        "Open recent editor workspaces (prefix: `ws`)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search", "remove", "clear", "logs"]
    }

    fn query_prefixes(&self) -> &[&str] {
        &[PREFIX]
    }
}
