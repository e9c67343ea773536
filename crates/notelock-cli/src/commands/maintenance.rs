use notelock_core::NoteStore;
use tracing::info;

use crate::app::AppContext;
use crate::ui::{print_ok, table};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let session = ctx.open_session(true)?;
    let store = session.store();

    store
        .check_integrity()
        .map_err(|e| anyhow::anyhow!("Integrity check failed: {}", e))?;
    let meta = store.metadata()?;
    info!(notes = meta.note_count, "integrity check passed");

    print_ok(&ui, "Integrity check passed");
    if !ui.quiet {
        let rows = vec![
            vec!["Format".to_string(), meta.format_version],
            vec![
                "Created".to_string(),
                meta.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ],
            vec!["Notes".to_string(), meta.note_count.to_string()],
            vec!["Protected".to_string(), meta.protected_count.to_string()],
        ];
        println!("{}", table(&ui, &["FIELD", "VALUE"], rows));
    }
    Ok(())
}
