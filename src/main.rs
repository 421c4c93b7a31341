use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use gaia_shell::core::gateway::Seed;
use gaia_shell::gui::Panel;
use gaia_shell::{AppState, GaiaShell, MemoryGateway, ShellConfig};

#[derive(Parser)]
#[command(name = "gaia-shell")]
#[command(about = "Headless driver for the translation workspace shell")]
struct Cli {
    /// Shell configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend contents to start from (JSON with projects, translations, chat_messages)
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects, most recently updated first
    Projects,
    /// Create a project and open it
    NewProject {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Open a project and print its translations and chat
    Open { project: Uuid },
    /// Add a translation entry to a project
    AddTranslation { project: Uuid, source_text: String },
    /// Search a project's translations
    Search { project: Uuid, query: String },
    /// Send a chat message to the assistant
    Chat { project: Uuid, message: String },
    /// Drag a panel handle through the given pointer positions
    Drag {
        #[arg(value_enum)]
        panel: PanelArg,
        #[arg(required = true, allow_negative_numbers = true)]
        positions: Vec<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PanelArg {
    Sidebar,
    Chat,
}

impl From<PanelArg> for Panel {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::Sidebar => Panel::Sidebar,
            PanelArg::Chat => Panel::ChatPanel,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_project(state: &AppState) {
    let Some(project) = &state.current_project else {
        println!("No project selected.");
        return;
    };
    println!("=== {} ===", project.name);
    if let Some(description) = &project.description {
        println!("{}", description);
    }

    println!("\nTranslations ({}):", state.translations.len());
    for t in &state.translations {
        println!(
            "  [{:?}] {} -> {}",
            t.status,
            t.source_text,
            t.target_text.as_deref().unwrap_or("")
        );
    }

    println!("\nChat ({} messages):", state.chat_messages.len());
    for m in &state.chat_messages {
        println!("  {:?}: {}", m.role, m.content);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    let seed = match &args.seed {
        Some(path) => Seed::load(path)?,
        None => Seed::default(),
    };

    let shell = GaiaShell::start(MemoryGateway::with_seed(seed), config).await;
    let store = shell.store();

    match args.command {
        Command::Projects => {
            let state = store.snapshot();
            if state.projects.is_empty() {
                println!("No projects.");
            }
            for project in &state.projects {
                println!("{}  {}", project.id, project.name);
            }
        }
        Command::NewProject { name, description } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Project name must not be empty");
            }
            let description = description.as_deref().map(str::trim).filter(|d| !d.is_empty());
            store.create_project(name, description).await;
            print_project(&store.snapshot());
        }
        Command::Open { project } => {
            store.load_project(project).await;
            print_project(&store.snapshot());
        }
        Command::AddTranslation {
            project,
            source_text,
        } => {
            let source_text = source_text.trim();
            if source_text.is_empty() {
                anyhow::bail!("Source text must not be empty");
            }
            store.load_project(project).await;
            store.create_translation(project, source_text).await;
            print_project(&store.snapshot());
        }
        Command::Search { project, query } => {
            store.load_project(project).await;
            store.search_translations(&query);
            let state = store.snapshot();
            println!("{} match(es) for {:?}:", state.search_results.len(), state.search_query);
            for t in &state.search_results {
                println!("  {}", t.source_text);
            }
        }
        Command::Chat { project, message } => {
            store.load_project(project).await;
            store.send_chat_message(project, &message).await;
            print_project(&store.snapshot());
        }
        Command::Drag { panel, positions } => {
            let panel = Panel::from(panel);
            shell.drag(panel, &positions);
            let ui = store.snapshot().ui;
            println!("sidebar width: {}", ui.sidebar_width);
            println!("chat panel width: {}", ui.chat_panel_width);
        }
    }

    println!("\n{}", shell.title());
    shell.shutdown();
    Ok(())
}
