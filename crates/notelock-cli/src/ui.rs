//! Terminal styling, tables, and progress indicators.

use std::io::IsTerminal;
use std::time::Duration;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Terminal context for UI decisions.
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    /// Whether color output is enabled
    pub color: bool,
    /// Quiet mode (suppress receipts)
    pub quiet: bool,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(quiet: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            is_tty,
            color: is_tty && !no_color_env && !term_is_dumb,
            quiet,
        }
    }
}

/// Badge types for status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
}

/// Render a badge with a message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let text = match kind {
        Badge::Ok => "[OK]",
        Badge::Warn => "[WARN]",
        Badge::Err => "[ERR]",
    };
    if !ctx.color {
        return format!("{} {}", text, message);
    }
    let colored = match kind {
        Badge::Ok => text.green().bold().to_string(),
        Badge::Warn => text.yellow().bold().to_string(),
        Badge::Err => text.red().bold().to_string(),
    };
    format!("{} {}", colored, message)
}

/// Print a success receipt unless quiet.
pub fn print_ok(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        println!("{}", badge(ctx, Badge::Ok, message));
    }
}

/// Print a warning to stderr unless quiet.
pub fn print_warn(ctx: &UiContext, message: &str) {
    if ctx.quiet {
        return;
    }
    let stderr_ctx = UiContext {
        color: ctx.color && std::io::stderr().is_terminal(),
        ..*ctx
    };
    eprintln!("{}", badge(&stderr_ctx, Badge::Warn, message));
}

/// Print an error with an optional hint to stderr.
pub fn print_error(ctx: &UiContext, message: &str, hint: Option<&str>) {
    let stderr_ctx = UiContext {
        color: ctx.color && std::io::stderr().is_terminal(),
        ..*ctx
    };
    eprintln!("{}", badge(&stderr_ctx, Badge::Err, message));
    if let Some(hint) = hint {
        if stderr_ctx.color {
            eprintln!("{}", hint.dimmed());
        } else {
            eprintln!("{}", hint);
        }
    }
}

/// Dim text when color is enabled.
pub fn dim(ctx: &UiContext, text: &str) -> String {
    if ctx.color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Build a table; bordered on a TTY, plain whitespace otherwise.
pub fn table(ctx: &UiContext, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    if ctx.is_tty {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.load_preset(NOTHING);
    }
    table.set_header(headers.iter().map(Cell::new));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Spinner shown on stderr while a password is stretched.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
