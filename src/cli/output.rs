//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;

use crate::domain::{Breadcrumb, ChildSummary, DetailRow};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print labelled value (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print breadcrumbs; every entry but the last is a link, the last is plain text.
pub fn breadcrumbs(crumbs: &[Breadcrumb]) {
    let last = crumbs.len().saturating_sub(1);
    let line = crumbs
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == last {
                c.label.bold().to_string()
            } else {
                c.label.underline().to_string()
            }
        })
        .join(" > ");
    println!("{}", line);
}

/// Print a list of children with selection markers.
pub fn children(title: &str, items: &[ChildSummary]) {
    if items.is_empty() {
        return;
    }
    header(title);
    for (i, item) in items.iter().enumerate() {
        let marker = if item.selected { "▸".green() } else { " ".normal() };
        let text = format!("[{}] {} ({})", i, item.name, item.id);
        if item.clickable {
            println!("  {} {}", marker, text);
        } else {
            println!("  {} {}", marker, text.dimmed());
        }
    }
}

/// Print detail rows as aligned label/value pairs.
pub fn detail_rows(rows: &[DetailRow]) {
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        let label = format!("{:width$}", row.label, width = width);
        println!("  {}  {}", label.cyan(), row.value);
    }
}
