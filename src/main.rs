//! tasklists
//!
//! Command-line front end for the task list index: resolves filters from
//! flags and the persisted session, then prints the matching page.

use anyhow::Result;
use clap::Parser;
use tasklists::cli::import::ImportArgs;
use tasklists::cli::list::{AuthorsArgs, ListArgs};
use tasklists::cli::{Cli, Command};
use tasklists::config::Config;
use tasklists::db::Database;
use tasklists::format::{OutputFormat, format_authors_markdown, format_task_lists_markdown};
use tasklists::import::Fixture;
use tasklists::logging::{self, LogTarget};
use tasklists::model::TaskListModel;
use tasklists::session::FileSession;
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load(path)?;
            config.apply_env();
            config
        }
        None => Config::load_or_default()?,
    };

    // Override paths from CLI arguments
    if let Some(db_path) = &cli.database {
        config.server.db_path = db_path.into();
    }
    if let Some(session_path) = &cli.session {
        config.session.path = session_path.into();
    }

    debug!(
        db_path = %config.server.db_path.display(),
        session_path = %config.session.path.display(),
        "Configuration loaded"
    );

    match cli.command {
        Command::List(args) => run_list(&config, args)?,
        Command::Authors(args) => run_authors(&config, args)?,
        Command::Import(args) => run_import(&config, args)?,
    }

    Ok(())
}

fn open_database(config: &Config) -> Result<Database> {
    config.ensure_db_dir()?;
    Database::open(&config.server.db_path)
}

fn open_model(config: &Config) -> Result<TaskListModel> {
    Ok(TaskListModel::new(open_database(config)?)
        .with_context(config.list.context.clone())
        .with_default_limit(config.list.default_limit))
}

fn run_list(config: &Config, args: ListArgs) -> Result<()> {
    let mut model = open_model(config)?;
    let mut session = FileSession::open(&config.session.path)?;

    let state = model.populate_state(&args.to_request(), &mut session);
    let viewer = args.viewer.access(&config.viewer);

    let page = model.pagination(&state, &viewer)?;
    let items = model.items(&state, &viewer)?;

    session.save()?;

    match args.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "filters": state.filters,
                "list": state.list,
                "pagination": page,
                "items": items,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Markdown => {
            print!("{}", format_task_lists_markdown(&items, &page));
        }
    }

    info!(count = items.len(), total = page.total, "Listed task lists");
    Ok(())
}

fn run_authors(config: &Config, args: AuthorsArgs) -> Result<()> {
    let model = open_model(config)?;
    let mut session = FileSession::open(&config.session.path)?;

    let state = model.populate_state(&args.to_request(), &mut session);
    let authors = model.authors(&state)?;

    session.save()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&authors)?),
        OutputFormat::Markdown => print!("{}", format_authors_markdown(&authors)),
    }

    Ok(())
}

fn run_import(config: &Config, args: ImportArgs) -> Result<()> {
    info!(file = %args.file.display(), mode = args.import_mode(), "Importing fixture");

    let fixture = Fixture::load(&args.file)?;

    if args.dry_run {
        println!(
            "Fixture is valid: {} view levels, {} users, {} projects, {} milestones, {} task lists",
            fixture.view_levels.len(),
            fixture.users.len(),
            fixture.projects.len(),
            fixture.milestones.len(),
            fixture.task_lists.len()
        );
        return Ok(());
    }

    let db = open_database(config)?;
    let summary = db.import_fixture(&fixture)?;

    println!(
        "Imported {} view levels, {} users, {} projects, {} milestones, {} task lists",
        summary.view_levels, summary.users, summary.projects, summary.milestones, summary.task_lists
    );

    Ok(())
}
