//! PM-Searcher entry point
//!
//! `serve` (the default) starts the web interface; `search` runs one search
//! from the command line and writes the candidates as CSV.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pm_searcher::{
    config::{self, Settings},
    engines::{EngineProvider, Provider, SerpApi},
    export::write_csv,
    network::HttpClient,
    search::{parse_months, recent_start_months, SearchCriteria, SearchPipeline},
    web::{create_router, AppState},
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pm-searcher", version, about = "Find recently started LinkedIn profiles")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PM_SEARCHER_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the web interface
    Serve,
    /// Run one search and write the candidates as CSV
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Job title to look for (defaults to the configured one)
    #[arg(long)]
    title: Option<String>,

    /// Company to look for (defaults to the configured one)
    #[arg(long)]
    company: Option<String>,

    /// Start month, repeatable (defaults to 4-6 months ago)
    #[arg(long = "month")]
    months: Vec<String>,

    /// Start year
    #[arg(long)]
    year: Option<i32>,

    /// Extract emails and phone numbers from snippets
    #[arg(long)]
    contacts: bool,

    /// Note template; {Name}, {Company}, {Month} and {Year} are filled in
    #[arg(long, conflicts_with = "notes")]
    template: Option<String>,

    /// Write notes using the configured template
    #[arg(long)]
    notes: bool,

    /// SerpApi key (defaults to the configured key or SERPAPI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so CSV on stdout stays clean
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting PM-Searcher v{}", pm_searcher::VERSION);

    let settings = config::load(cli.config.as_deref())?;

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let engine = SerpApi::with_settings(&settings.provider);
    let provider: Arc<dyn Provider> = Arc::new(EngineProvider::new(client, Arc::new(engine)));
    info!("Using search provider: {}", provider.name());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings, provider).await,
        Command::Search(args) => search(settings, provider, args).await,
    }
}

async fn serve(settings: Settings, provider: Arc<dyn Provider>) -> Result<()> {
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, provider)?;
    if !state.has_configured_key() {
        info!("No API key configured; the form will ask for one");
    }

    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn search(settings: Settings, provider: Arc<dyn Provider>, args: SearchArgs) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let window = recent_start_months(today);

    let months = if args.months.is_empty() {
        window.iter().map(|(month, _)| *month).collect()
    } else {
        parse_months(&args.months)?
    };
    let year = args
        .year
        .or_else(|| window.first().map(|(_, year)| *year))
        .context("could not determine a target year")?;

    let criteria = SearchCriteria::new(
        args.title
            .unwrap_or_else(|| settings.outreach.default_title.clone()),
        args.company
            .unwrap_or_else(|| settings.outreach.default_company.clone()),
        months,
        year,
        args.contacts || settings.outreach.extract_contacts,
    )?;

    let template = match (args.template, args.notes) {
        (Some(template), _) => Some(template),
        (None, true) => Some(settings.outreach.note_template.clone()),
        (None, false) => None,
    };

    let api_key = settings
        .resolve_api_key(args.api_key.as_deref())
        .unwrap_or_default();

    let pipeline = SearchPipeline::new(provider).with_num_results(settings.provider.num_results);
    let report = pipeline
        .run(&criteria, &api_key, template.as_deref())
        .await?;

    for failure in &report.failures {
        warn!("{}", failure);
    }
    if report.is_empty() {
        info!("No profiles found. Try adjusting your search parameters.");
    }

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_csv(BufWriter::new(file), &report.candidates)?;
            info!("Wrote {} profiles to {}", report.candidates.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_csv(&mut handle, &report.candidates)?;
            handle.flush()?;
        }
    }

    Ok(())
}
