//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the config directory, load `DirectoryConfig`, build the
//!    HTTP source and the `DirectoryApi`
//! 3. **Loading**: Run the one-time load before any command that reads the directory
//! 4. **API Dispatch**: Call the appropriate `DirectoryApi` method
//! 5. **Output Formatting**: Hand `CmdResult` values to `render`
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_logging()`: `tracing-subscriber` on stderr
//! - `init_context()`: Builds `AppContext` with API and configuration (not needed by `config`)
//! - `handle_*()`: Per-command handlers that call API and print the rendered output

use super::render::{
    print_messages, render_config, render_load_error, render_user_details, render_user_list,
};
use super::setup::{AddArgs, BrowseCommands, Cli, Commands, ManageCommands, MiscCommands};
use super::shell::run_session;
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use userdir::api::{configure, ConfigAction, DirectoryApi};
use userdir::config::DirectoryConfig;
use userdir::error::{DirectoryError, Result};
use userdir::form::NewUserForm;
use userdir::loader::LoadOutcome;
use userdir::model::UserId;
use userdir::source::http::HttpUserSource;
use userdir::view::{SortKey, SortOrder, ViewQuery};

const LOG_ENV: &str = "USERDIR_LOG";

struct AppContext {
    api: DirectoryApi<HttpUserSource>,
    config: DirectoryConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir)?;

    // `config` works on the file alone, so it never builds the HTTP source.
    match cli.command {
        Some(Commands::Misc(MiscCommands::Config { key, value })) => {
            handle_config(&config_dir, key, value)
        }
        Some(Commands::Browse(cmd)) => {
            let mut ctx = init_context(config_dir)?;
            match cmd {
                BrowseCommands::List { search, sort, desc } => {
                    handle_list(&mut ctx, search, sort, desc)
                }
                BrowseCommands::View { id } => handle_view(&mut ctx, id),
                BrowseCommands::Shell => handle_shell(&mut ctx),
            }
        }
        Some(Commands::Manage(ManageCommands::Add(args))) => {
            handle_add(&mut init_context(config_dir)?, args)
        }
        None => handle_shell(&mut init_context(config_dir)?),
    }
}

/// `USERDIR_LOG` wins; otherwise `warn`, or `debug` with `--verbose`. Logs go to stderr.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "userdir", "userdir")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DirectoryError::Config("Could not determine config dir".into()))
}

fn init_context(config_dir: PathBuf) -> Result<AppContext> {
    let config = DirectoryConfig::load(&config_dir)?.with_env_overrides()?;
    debug!(config_dir = %config_dir.display(), endpoint = %config.endpoint, "context ready");

    let source = HttpUserSource::new(config.endpoint.clone(), config.timeout())?;
    Ok(AppContext {
        api: DirectoryApi::new(source, config_dir),
        config,
    })
}

/// Runs the one-time load. On failure the error view is printed and the fetch error is
/// returned so the process exits non-zero.
fn load(ctx: &mut AppContext) -> Result<()> {
    match ctx.api.initialize()? {
        LoadOutcome::Loaded { .. } => Ok(()),
        LoadOutcome::Failed { message } => {
            print!("{}", render_load_error(&message));
            Err(DirectoryError::Fetch(message))
        }
    }
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
) -> Result<()> {
    let sort_by = sort
        .as_deref()
        .map(SortKey::from)
        .unwrap_or(ctx.config.default_sort);
    let sort_order = if desc { SortOrder::Desc } else { SortOrder::Asc };
    let query = ViewQuery::new(search.unwrap_or_default(), sort_by, sort_order);

    load(ctx)?;
    let result = ctx.api.list_users(&query)?;
    print!("{}", render_user_list(&result.listed_users, &query));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: UserId) -> Result<()> {
    load(ctx)?;
    let result = ctx.api.view_user(id)?;
    for user in &result.listed_users {
        print!("{}", render_user_details(user));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let form = NewUserForm::from(args);
    // Validated before the load so an incomplete form never hits the network.
    form.validate().map_err(DirectoryError::Validation)?;

    load(ctx)?;
    let result = ctx.api.add_user(&form)?;
    print_messages(&result.messages);
    for user in &result.affected_users {
        print!("{}", render_user_details(user));
    }
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let query = ViewQuery::new("", ctx.config.default_sort, SortOrder::Asc);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_session(&mut ctx.api, query, &mut input, &mut output)
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = configure(config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    debug!(config_dir = %config_dir.display(), "config handled");
    Ok(())
}
