use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use showfinder::{
    BrowseEvent, Browser, DEFAULT_BASE_URL, OutputFormat, ReqwestTransport, ShowFinderError,
    TerminalPrompter, TvMazeProvider, episodes_and_render, render_episodes, render_shows,
    run_browse, search_and_render,
};
use std::process;
use tracing_subscriber::EnvFilter;

/// Search TV shows on TVMaze and list their episodes
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Base URL of the TVMaze API
    #[arg(long, global = true, env = "SHOWFINDER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print results as JSON instead of text (not available for `browse`)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Search shows by name
    Search {
        /// Search terms, joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List the episodes of a show
    Episodes {
        /// Show id as printed by `search`
        show_id: u64,
    },
    /// Search and browse episodes interactively
    Browse,
}

impl Cli {
    /// Rejects flag combinations clap cannot express across subcommands
    fn validate(&self) -> Result<(), clap::Error> {
        if self.json && matches!(self.command, Commands::Browse) {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "the argument '--json' cannot be used with 'browse'",
            ));
        }

        Ok(())
    }
}

/// Settings resolved from the command line and environment
#[derive(Debug)]
struct Settings {
    base_url: String,
    format: OutputFormat,
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

/// Sets up logging to stderr so it never mixes with command output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("showfinder=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints browse progress events to stdout
fn handle_browse_event(event: BrowseEvent) {
    match event {
        BrowseEvent::Searching { query } => {
            println!("Searching for '{}'...", query);
        }
        BrowseEvent::ShowsFound { shows } => {
            println!("\n{}\n", render_shows(&shows));
        }
        BrowseEvent::FetchingEpisodes { show } => {
            println!("Fetching episodes of '{}'...", show.name);
        }
        BrowseEvent::EpisodesFound { show, episodes } => {
            println!("\n=== {} ===", show.name);
            println!("{}\n", render_episodes(&episodes));
        }
        BrowseEvent::Superseded => {
            tracing::debug!("dropped superseded response");
        }
        BrowseEvent::Finished => {
            println!("Bye!");
        }
    }
}

fn run(cli: Cli) -> Result<(), ShowFinderError> {
    let settings = Settings::from(&cli);
    tracing::debug!(?settings, "starting");

    let transport = ReqwestTransport::new()?;
    let provider = TvMazeProvider::with_transport(transport, settings.base_url);

    match cli.command {
        Commands::Search { query } => {
            let output = search_and_render(&provider, &query.join(" "), settings.format)?;
            println!("{}", output);
        }
        Commands::Episodes { show_id } => {
            let output = episodes_and_render(&provider, show_id, settings.format)?;
            println!("{}", output);
        }
        Commands::Browse => {
            let browser = Browser::new(provider);
            run_browse(&browser, &mut TerminalPrompter, handle_browse_event)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
