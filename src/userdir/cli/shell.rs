//! # Interactive Session
//!
//! The session loads the directory once and then reads one command per line until
//! `quit` or end of input. Search and sort controls persist between commands, and
//! every change to them re-renders the listing.
//!
//! The session is generic over its reader and writer so it can be driven by scripted
//! input in tests.

use super::render::{
    render_field_errors, render_load_error, render_loading, render_messages, render_user_details,
    render_user_list,
};
use std::io::{BufRead, Write};
use userdir::api::DirectoryApi;
use userdir::error::{DirectoryError, Result};
use userdir::form::{NewUserForm, FORM_FIELDS, REQUIRED_FIELDS};
use userdir::loader::LoadOutcome;
use userdir::model::UserId;
use userdir::source::UserSource;
use userdir::view::{SortKey, ViewQuery};

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  list              Show the directory with the current search and sort
  search <term...>  Filter by name, email or company
  clear             Clear the search
  sort <key>        Sort by name, email, company or id
  order             Toggle ascending / descending
  view <id>         Show every detail of one user
  add               Add a user (prompts for each field, * = required)
  delete <id>       Remove a user
  help              Show this help
  quit              Leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Clear,
    Sort(SortKey),
    Order,
    View(UserId),
    Add,
    Delete(UserId),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match name.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "search" | "s" if rest.is_empty() => ShellCommand::Clear,
        "search" | "s" => ShellCommand::Search(rest.join(" ")),
        "clear" => ShellCommand::Clear,
        "sort" => match rest.first() {
            Some(key) => ShellCommand::Sort(SortKey::from(*key)),
            None => {
                let keys: Vec<_> = SortKey::ALL.iter().map(SortKey::as_str).collect();
                return Err(format!("Usage: sort <{}>", keys.join("|")));
            }
        },
        "order" => ShellCommand::Order,
        "view" | "v" => ShellCommand::View(parse_id("view", &rest)?),
        "add" => ShellCommand::Add,
        "delete" | "rm" => ShellCommand::Delete(parse_id("delete", &rest)?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => {
            return Err(format!(
                "Unknown command: {}. Type 'help' for commands.",
                other
            ))
        }
    };
    Ok(Some(command))
}

fn parse_id(command: &str, args: &[&str]) -> std::result::Result<UserId, String> {
    args.first()
        .and_then(|raw| raw.trim_start_matches('#').parse().ok())
        .ok_or_else(|| format!("Usage: {} <id>", command))
}

pub fn run_session<S, R, W>(
    api: &mut DirectoryApi<S>,
    mut query: ViewQuery,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: UserSource,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", render_loading())?;
    if let LoadOutcome::Failed { message } = api.initialize()? {
        write!(out, "{}", render_load_error(&message))?;
        return Ok(());
    }
    show_listing(api, &query, out)?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                writeln!(out, "{}", usage)?;
                continue;
            }
        };

        match command {
            ShellCommand::List => {}
            ShellCommand::Search(term) => query.search_term = term,
            ShellCommand::Clear => query.search_term.clear(),
            ShellCommand::Sort(key) => query.sort_by = key,
            ShellCommand::Order => query.sort_order = query.sort_order.toggle(),
            ShellCommand::View(id) => {
                let result = api.view_user(id)?;
                for user in &result.listed_users {
                    write!(out, "{}", render_user_details(user))?;
                }
                write!(out, "{}", render_messages(&result.messages))?;
                continue;
            }
            ShellCommand::Add => {
                add_user(api, input, out)?;
                continue;
            }
            ShellCommand::Delete(id) => {
                let result = api.delete_user(id)?;
                write!(out, "{}", render_messages(&result.messages))?;
                continue;
            }
            ShellCommand::Help => {
                write!(out, "{}", HELP)?;
                continue;
            }
            ShellCommand::Quit => break,
        }
        show_listing(api, &query, out)?;
    }
    Ok(())
}

fn show_listing<S: UserSource, W: Write>(
    api: &DirectoryApi<S>,
    query: &ViewQuery,
    out: &mut W,
) -> Result<()> {
    let result = api.list_users(query)?;
    write!(out, "{}", render_user_list(&result.listed_users, query))?;
    write!(out, "{}", render_messages(&result.messages))?;
    Ok(())
}

fn add_user<S, R, W>(api: &mut DirectoryApi<S>, input: &mut R, out: &mut W) -> Result<()>
where
    S: UserSource,
    R: BufRead,
    W: Write,
{
    let mut form = NewUserForm::new();
    for (path, label) in FORM_FIELDS {
        let marker = if REQUIRED_FIELDS.contains(&path) { "*" } else { "" };
        write!(out, "{}{}: ", label, marker)?;
        out.flush()?;

        let Some(value) = read_line(input)? else {
            writeln!(out, "\nAdd cancelled.")?;
            return Ok(());
        };
        if let Some(slot) = form.field_mut(path) {
            *slot = value;
        }
    }

    match api.add_user(&form) {
        Ok(result) => {
            write!(out, "{}", render_messages(&result.messages))?;
            for user in &result.affected_users {
                write!(out, "{}", render_user_details(user))?;
            }
            Ok(())
        }
        Err(DirectoryError::Validation(errors)) => {
            write!(out, "{}", render_field_errors(&errors))?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
