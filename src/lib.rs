pub mod actions;
pub mod identifier;
pub mod launch_spec;
pub mod launcher;
pub mod logging;
pub mod naming;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod settings;
pub mod workspace;

pub use identifier::{Identifier, Scheme};
pub use registry::{RawEntry, RegistryError, RegistryStore};
pub use workspace::{WorkspaceEntry, WorkspaceService};
