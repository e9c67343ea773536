//! Notelock CLI - password-protected notes from the command line
//!
//! This is the command-line interface for Notelock. Every invocation opens
//! the note store, works on an in-memory notebook in which protected notes
//! start locked, and writes changed notes back before exiting.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, maintenance, misc, notes, protection};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    logging::init(cli.verbose, ctx.log_level());

    if let Err(e) = run(&ctx, &cli) {
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        let hint = hint.or_else(|| contextual_hint(message));

        print_error(&ctx.ui(), message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Separate a trailing "Hint:" line from an error message.
fn split_hint(error: &str) -> (&str, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            return (&error[..idx], Some(error[idx + 1..].to_string()));
        }
    }
    (error, None)
}

/// Provide contextual hints for common error patterns.
fn contextual_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("incorrect password") {
        return Some(
            "Hint: Passwords are case-sensitive. Set NOTELOCK_PASSWORD for scripted use."
                .to_string(),
        );
    }

    if error_lower.contains("already password protected") {
        return Some("Hint: Run `notelock unprotect <id>` first to change the password.".to_string());
    }

    if error_lower.contains("not password protected") {
        return Some("Hint: Run `notelock protect <id>` to add a password.".to_string());
    }

    if error_lower.contains("integrity") && error_lower.contains("failed") {
        return Some(
            "Hint: Restore the store file from a backup before making further changes."
                .to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::New(args)) => notes::handle_new(ctx, args),
        Some(Commands::List(args)) => notes::handle_list(ctx, args),
        Some(Commands::Show(args)) => notes::handle_show(ctx, args),
        Some(Commands::Edit(args)) => notes::handle_edit(ctx, args),
        Some(Commands::Delete(args)) => notes::handle_delete(ctx, args),
        Some(Commands::Protect(args)) => protection::handle_protect(ctx, args),
        Some(Commands::Unprotect(args)) => protection::handle_unprotect(ctx, args),
        Some(Commands::Duplicate(args)) => notes::handle_duplicate(ctx, args),
        Some(Commands::Pin(args)) => notes::handle_pin(ctx, args),
        Some(Commands::Check) => maintenance::handle_check(ctx),
        Some(Commands::Completions(args)) => misc::handle_completions(args.shell),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
