use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use vscode_workspaces::identifier::Identifier;
use vscode_workspaces::launcher::launch_action;
use vscode_workspaces::plugin::PluginManager;
use vscode_workspaces::plugins::workspaces::WorkspacesPlugin;
use vscode_workspaces::settings::{self, Settings};
use vscode_workspaces::{logging, WorkspaceEntry, WorkspaceService};

/// Recently opened editor workspaces
#[derive(Parser, Debug)]
#[command(name = "vscode-workspaces", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print recent workspaces, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run a launcher query, e.g. `ws`, `ws api`, `ws clear`
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Run the first result
        #[arg(long)]
        run: bool,
    },
    /// Open a workspace by list index or stored key
    Open { selector: String },
    /// Remove one workspace from the editor's recent list
    Remove { selector: String },
    /// Remove every entry from the editor's recent list
    Clear,
    /// Open the log file in the editor
    Logs,
    /// Reprint the list every refresh interval
    Watch {
        /// Seconds between refreshes (defaults to the settings value)
        #[arg(long)]
        interval: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(settings::default_settings_path);
    let settings = Settings::load(&settings_path)?;

    logging::init(cli.debug || settings.debug_logging, settings.log_file_path());
    tracing::debug!("settings loaded from {}", settings_path.display());

    let service = WorkspaceService::from_settings(&settings);

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => {
            let entries = service.list_workspaces()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }
        Commands::Search { query, run } => {
            let query = query.join(" ");
            let mut plugins = PluginManager::new();
            plugins.register(Box::new(WorkspacesPlugin::new(service.clone())));
            let actions = plugins.search(&query);
            if run {
                match actions.first() {
                    Some(action) => launch_action(action, &service)?,
                    None => println!("No matches"),
                }
            } else {
                for action in &actions {
                    println!("{}\t{}\t{}", action.label, action.desc, action.action);
                }
            }
        }
        Commands::Open { selector } => {
            service.open(&select(&service, &selector)?);
        }
        Commands::Remove { selector } => {
            let identifier = select(&service, &selector)?;
            if service.remove(&identifier)? {
                println!("Removed {}", identifier.decoded_path());
            } else {
                println!("{} is not in the recent list", identifier.decoded_path());
            }
        }
        Commands::Clear => {
            service.clear_all()?;
            println!("Cleared recent workspaces");
        }
        Commands::Logs => service.open_logs(),
        Commands::Watch { interval } => {
            let secs = interval.unwrap_or(settings.refresh_interval).max(1);
            loop {
                match service.list_workspaces() {
                    Ok(entries) => print_entries(&entries),
                    Err(e) => eprintln!("{e}"),
                }
                println!();
                std::thread::sleep(Duration::from_secs(secs));
            }
        }
    }
    Ok(())
}

/// A list index as printed by `list`, or a stored key.
fn select(service: &WorkspaceService, selector: &str) -> anyhow::Result<Identifier> {
    match selector.parse::<usize>() {
        Ok(index) => service
            .list_workspaces()?
            .into_iter()
            .nth(index)
            .map(|e| e.identifier)
            .ok_or_else(|| anyhow::anyhow!("no workspace at index {index}")),
        Err(_) => Ok(Identifier::from(selector)),
    }
}

fn print_entries(entries: &[WorkspaceEntry]) {
    if entries.is_empty() {
        println!("No recent workspaces");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{i:>3}  {}  ({})",
            entry.display_name,
            entry.identifier.decoded_path()
        );
    }
}
