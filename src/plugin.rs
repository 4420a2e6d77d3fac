use crate::actions::Action;
use std::collections::HashSet;

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str) -> Vec<Action>;
    /// Name of the plugin
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn capabilities(&self) -> &[&str];
    /// Leading query words this plugin answers to. Plugins without prefixes
    /// see every query.
    fn query_prefixes(&self) -> &[&str] {
        &[]
    }
    /// Search even when the query carries another plugin's prefix.
    fn always_search(&self) -> bool {
        false
    }
}

/// A manager that holds plugins
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    pub fn search(&self, query: &str) -> Vec<Action> {
        self.search_filtered(query, None)
    }

    /// Search plugins that accept `query`, limited to `enabled` names when
    /// given. Results keep plugin registration order.
    pub fn search_filtered(&self, query: &str, enabled: Option<&HashSet<String>>) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            if let Some(set) = enabled {
                if !set.contains(p.name()) {
                    continue;
                }
            }
            if accepts(p.as_ref(), query) {
                actions.extend(p.search(query));
            }
        }
        actions
    }
}

fn accepts(plugin: &dyn Plugin, query: &str) -> bool {
    let prefixes = plugin.query_prefixes();
    if prefixes.is_empty() || plugin.always_search() {
        return true;
    }
    let first = query.split_whitespace().next().unwrap_or("");
    prefixes.iter().any(|p| first.eq_ignore_ascii_case(p))
}
