//! Colored terminal output for plans, reports and status lines
//!
//! Tree text and JSON go through [`info`] uncolored so they can be piped.
//! `colored` honors NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// `error: ...` on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// `Warning: ...` on stderr, e.g. for an empty layout.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Check-marked line for a canonical or unchanged structure file.
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// `Created: <path>`, `Formatted: <path>` and similar.
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Heading above a plan listing.
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Directory that is (or would be) created.
pub fn diff_add(msg: &(impl Display + ?Sized)) {
    println!("  {} {}", "+".green(), msg);
}

/// Skipped or existing entry, config location.
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
