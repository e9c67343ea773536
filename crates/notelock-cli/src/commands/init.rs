use std::path::PathBuf;

use notelock_core::{NoteStore, SqliteNoteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, NotelockConfig};
use crate::errors::CliError;
use crate::ui::{print_ok, print_warn};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let store_path = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };
    let config_path = match args.config_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };

    if store_path.exists() {
        return Err(CliError::invalid_input(format!(
            "A note store already exists at {}",
            store_path.display()
        ))
        .into());
    }

    SqliteNoteStore::create(&store_path)?;
    print_ok(
        &ui,
        &format!("Initialized note store at {}", store_path.display()),
    );

    if config_path.exists() {
        print_warn(
            &ui,
            &format!(
                "Config already exists at {}; leaving it unchanged.",
                config_path.display()
            ),
        );
        return Ok(());
    }

    let config = NotelockConfig::new(store_path, args.editor.clone());
    write_config(&config_path, &config)?;
    print_ok(&ui, &format!("Wrote config to {}", config_path.display()));
    Ok(())
}
