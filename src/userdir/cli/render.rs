//! # Rendering Module
//!
//! Every function here turns library values into a `String` ready for the terminal.
//! Callers decide where it goes (stdout for one-shot commands, the session writer for
//! the shell), which keeps rendering testable without capturing stdout.
//!
//! Layout calculations (width, truncation, padding) are Unicode-aware; colors come from
//! `colored` and disappear automatically when stdout is not a terminal.

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use userdir::api::{CmdMessage, MessageLevel};
use userdir::config::DirectoryConfig;
use userdir::form::FieldErrors;
use userdir::model::User;
use userdir::view::ViewQuery;

pub const LINE_WIDTH: usize = 100;
const CARD_INDENT: &str = "  ";
const CARD_LABEL_WIDTH: usize = 10;
const DETAIL_LABEL_WIDTH: usize = 13;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// The listing header followed by one card per user.
pub fn render_user_list(users: &[User], query: &ViewQuery) -> String {
    let mut output = String::new();

    let mut header = format!(
        "{}  {}",
        "Users Directory".bold(),
        format!("sort: {} {}", query.sort_by, query.sort_order.arrow()).dimmed()
    );
    if query.is_searching() {
        header.push_str(&format!("  {}", format!("search: \"{}\"", query.search_term).cyan()));
    }
    output.push_str(&header);
    output.push('\n');

    let id_width = users
        .iter()
        .map(|u| format!("#{}", u.id).width())
        .max()
        .unwrap_or(0);

    for user in users {
        output.push('\n');
        output.push_str(&render_card(user, id_width));
    }
    output
}

fn render_card(user: &User, id_width: usize) -> String {
    let id = format!("#{}", user.id);
    let id_padding = " ".repeat(id_width.saturating_sub(id.width()));
    let name_room = LINE_WIDTH.saturating_sub(CARD_INDENT.width() + id_width + 2);
    let body_indent = " ".repeat(CARD_INDENT.width() + id_width + 2);

    let mut card = format!(
        "{}{}{}  {}\n",
        CARD_INDENT,
        id.yellow(),
        id_padding,
        truncate_to_width(&user.name, name_room).bold()
    );

    let value_room = LINE_WIDTH.saturating_sub(body_indent.width() + CARD_LABEL_WIDTH);
    for (label, value) in [
        ("Email:", &user.email),
        ("Company:", &user.company.name),
        ("Website:", &user.website),
    ] {
        card.push_str(&format!(
            "{}{}{}\n",
            body_indent,
            format!("{:<width$}", label, width = CARD_LABEL_WIDTH).dimmed(),
            truncate_to_width(value, value_room)
        ));
    }
    card
}

pub fn render_user_details(user: &User) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n\n", "User Details".bold().underline()));
    output.push_str(&format!("{}\n", user.name.bold()));
    output.push_str(&format!("{}\n", format!("@{}", user.username).dimmed()));

    output.push_str(&section("Contact Information"));
    output.push_str(&detail_item("Email:", &user.email));
    output.push_str(&detail_item("Phone:", &user.phone));
    output.push_str(&detail_item("Website:", &user.website));

    output.push_str(&section("Address"));
    for line in address_lines(user) {
        output.push_str(&format!("{}{}\n", CARD_INDENT, line));
    }

    output.push_str(&section("Company"));
    output.push_str(&detail_item("Name:", &user.company.name));
    output.push_str(&detail_item("Catchphrase:", &user.company.catch_phrase));
    output.push_str(&detail_item("Business:", &user.company.bs));
    output
}

fn section(title: &str) -> String {
    format!("\n{}\n", title.cyan().bold())
}

fn detail_item(label: &str, value: &str) -> String {
    format!(
        "{}{}{}\n",
        CARD_INDENT,
        format!("{:<width$}", label, width = DETAIL_LABEL_WIDTH).dimmed(),
        value
    )
}

/// Street, suite, "city, zipcode" and "lat, lng", skipping the parts that are empty.
fn address_lines(user: &User) -> Vec<String> {
    let address = &user.address;
    let mut lines = vec![address.street.clone(), address.suite.clone()];
    lines.push(join_present(&[&address.city, &address.zipcode]));
    lines.push(join_present(&[&address.geo.lat, &address.geo.lng]));
    lines.retain(|line| !line.is_empty());
    lines
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// The view shown instead of the listing when the initial load failed.
pub fn render_load_error(message: &str) -> String {
    format!("{}\n{}\n", "Error loading users".red().bold(), message)
}

pub fn render_loading() -> String {
    format!("{}\n", "Loading users...".dimmed())
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut output = format!("{}\n", "Please fix the following fields:".red());
    for error in errors.iter() {
        output.push_str(&format!(
            "{}{} {}\n",
            CARD_INDENT,
            format!("{}:", error.field).yellow(),
            error.message
        ));
    }
    output
}

pub fn render_config(config: &DirectoryConfig) -> String {
    let mut output = String::new();
    for key in DirectoryConfig::KEYS {
        if let Some(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
