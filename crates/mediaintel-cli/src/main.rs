mod explore;
mod render;
mod session;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use mediaintel_core::{AppConfig, Persona};
use mediaintel_llm::GeminiClient;
use mediaintel_report::FilterSpec;
use tracing_subscriber::EnvFilter;

use crate::explore::{parse_command, ExploreCommand, HELP};
use crate::render::{
    describe_filters, render_options, render_report, render_summary, OutputFormat, RenderContext,
};
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "mediaintel")]
#[command(about = "Media engagement reports and AI campaign summaries")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render every report facet for a CSV upload
    Report {
        /// CSV file to analyse
        path: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Keep rows with blank categorical cells
        #[arg(long)]
        keep_incomplete: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
    /// List the values each filter accepts
    Options {
        /// CSV file to analyse
        path: PathBuf,
        /// Keep rows with blank categorical cells
        #[arg(long)]
        keep_incomplete: bool,
    },
    /// Ask the model for a campaign summary of the filtered data
    Summarize {
        /// CSV file to analyse
        path: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Keep rows with blank categorical cells
        #[arg(long)]
        keep_incomplete: bool,
        /// Tone of the summary (defaults to `MEDIAINTEL_PERSONA`)
        #[arg(long)]
        persona: Option<Persona>,
        /// Print the prompt instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Interactive session: change filters and persona, re-render, summarize
    Explore {
        /// CSV file to analyse
        path: PathBuf,
        /// Keep rows with blank categorical cells
        #[arg(long)]
        keep_incomplete: bool,
    },
}

/// Filter flags shared by `report` and `summarize`.
#[derive(Debug, Default, Args)]
struct FilterArgs {
    /// Exact platform name (case-sensitive)
    #[arg(long)]
    platform: Option<String>,
    /// Exact sentiment label (case-sensitive)
    #[arg(long)]
    sentiment: Option<String>,
    /// Exact media type (case-sensitive)
    #[arg(long)]
    media_type: Option<String>,
    /// Exact location (case-sensitive)
    #[arg(long)]
    location: Option<String>,
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            platform: self.platform.clone(),
            sentiment: self.sentiment.clone(),
            media_type: self.media_type.clone(),
            location: self.location.clone(),
            date_from: self.from,
            date_to: self.to,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mediaintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Report {
            path,
            filters,
            keep_incomplete,
            format,
        }) => run_report(&config, &path, &filters, keep_incomplete, format)?,
        Some(Commands::Options {
            path,
            keep_incomplete,
        }) => run_options(&config, &path, keep_incomplete)?,
        Some(Commands::Summarize {
            path,
            filters,
            keep_incomplete,
            persona,
            dry_run,
        }) => {
            let persona = persona.unwrap_or(config.persona);
            run_summarize(&config, &path, &filters, keep_incomplete, persona, dry_run).await?;
        }
        Some(Commands::Explore {
            path,
            keep_incomplete,
        }) => run_explore(&config, &path, keep_incomplete).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// Build a session over the CSV at `path`.
fn open_session(config: &AppConfig, path: &Path, keep_incomplete: bool) -> anyhow::Result<Session> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut session = Session::new(config.drop_incomplete_rows && !keep_incomplete, config.persona);
    session
        .load(bytes)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(session)
}

fn print_report(session: &Session, format: OutputFormat) -> anyhow::Result<()> {
    let ctx = RenderContext {
        filter: session.filter(),
        cleaning: session.cleaning(),
    };
    println!("{}", render_report(session.report(), ctx, format)?);
    Ok(())
}

fn run_report(
    config: &AppConfig,
    path: &Path,
    filters: &FilterArgs,
    keep_incomplete: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut session = open_session(config, path, keep_incomplete)?;
    session.replace_filter(filters.to_spec());
    print_report(&session, format)
}

fn run_options(config: &AppConfig, path: &Path, keep_incomplete: bool) -> anyhow::Result<()> {
    let session = open_session(config, path, keep_incomplete)?;
    println!("{}", render_options(&session.options()));
    Ok(())
}

/// Resolves on ctrl-c. If the handler cannot be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; summary cannot be cancelled");
        std::future::pending::<()>().await;
    }
}

async fn summarize(session: &mut Session, client: Result<&GeminiClient, &str>) {
    match client {
        Ok(client) => {
            eprintln!("generating summary with {} (ctrl-c to cancel)...", client.model());
            session.summarize(client, ctrl_c()).await;
        }
        Err(reason) => session.summary_unavailable(reason.to_string()),
    }
}

async fn run_summarize(
    config: &AppConfig,
    path: &Path,
    filters: &FilterArgs,
    keep_incomplete: bool,
    persona: Persona,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(config, path, keep_incomplete)?;
    session.replace_filter(filters.to_spec());
    session.set_persona(persona);

    if dry_run {
        match session.summary_prompt() {
            Some(prompt) => println!("{prompt}"),
            None => println!("dry-run: {}", mediaintel_llm::EMPTY_SELECTION_MESSAGE),
        }
        return Ok(());
    }

    let client = GeminiClient::from_config(config).map_err(|e| e.to_string());
    summarize(&mut session, client.as_ref().map_err(String::as_str)).await;
    println!("{}", render_summary(session.summary()));
    Ok(())
}

fn print_status(session: &Session) {
    println!(
        "rows: {} | filters: {} | persona: {} | incomplete rows: {}",
        session.report().row_count,
        describe_filters(session.filter()),
        session.persona(),
        if session.drop_incomplete_rows() { "dropped" } else { "kept" },
    );
}

async fn run_explore(config: &AppConfig, path: &Path, keep_incomplete: bool) -> anyhow::Result<()> {
    let mut session = open_session(config, path, keep_incomplete)?;
    let client = GeminiClient::from_config(config).map_err(|e| {
        tracing::warn!(error = %e, "summary generation unavailable");
        e.to_string()
    });

    println!("{HELP}");
    print_status(&session);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ExploreCommand::Set(field, value) => session.set_filter(field, Some(value)),
            ExploreCommand::Unset(field) => session.set_filter(field, None),
            ExploreCommand::From(date) => session.set_date_from(date),
            ExploreCommand::To(date) => session.set_date_to(date),
            ExploreCommand::Clear => session.clear_filters(),
            ExploreCommand::Incomplete { drop } => session.set_drop_incomplete_rows(drop)?,
            ExploreCommand::Persona(persona) => session.set_persona(persona),
            ExploreCommand::Show => {
                print_report(&session, OutputFormat::Markdown)?;
                continue;
            }
            ExploreCommand::Options => {
                println!("{}", render_options(&session.options()));
                continue;
            }
            ExploreCommand::Summarize => {
                summarize(&mut session, client.as_ref().map_err(String::as_str)).await;
                println!("{}", render_summary(session.summary()));
                continue;
            }
            ExploreCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ExploreCommand::Quit => break,
        }
        print_status(&session);
    }

    Ok(())
}
