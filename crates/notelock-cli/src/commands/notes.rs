use notelock_core::Note;
use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::{DeleteArgs, EditArgs, IdArgs, ListArgs, NewArgs, PinArgs, ShowArgs};
use crate::errors::CliError;
use crate::helpers::{confirm, normalize_tags, prompt_new_password, read_note_body};
use crate::output::{list_rows, note_json, notes_json, short_id, LIST_HEADERS};
use crate::ui::{dim, print_ok, spinner, table};

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let title = args.title.trim();
    if title.is_empty() {
        return Err(CliError::invalid_input("Title cannot be empty").into());
    }
    let tags = normalize_tags(&args.tag)?;

    let mut session = ctx.open_session(args.no_input)?;
    let body = Zeroizing::new(read_note_body(
        args.no_input,
        args.body.clone(),
        ctx.editor()?,
        None,
    )?);
    // Ask before anything is written so a bad password leaves no plaintext behind.
    let password = if args.protect {
        Some(prompt_new_password(session.interactive())?)
    } else {
        None
    };

    let note = Note::new(title, body.as_str()).with_tags(tags);
    let id = note.id;
    session.notebook_mut().insert(note)?;
    if let Some(password) = password {
        let progress = spinner("Encrypting");
        let result = session.notebook_mut().protect(&id, &password).map(|_| ());
        progress.finish_and_clear();
        result?;
    }
    session.persist(&id)?;

    if ui.quiet {
        println!("{}", id);
    } else {
        print_ok(&ui, &format!("Created note {}", id));
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let session = ctx.open_session(true)?;
    let tag = args.tag.as_deref().map(|t| t.trim().to_lowercase());

    let notes: Vec<&Note> = session
        .notebook()
        .notes()
        .into_iter()
        .filter(|note| !args.protected || note.is_password_protected)
        .filter(|note| tag.as_ref().map_or(true, |t| note.tags.contains(t)))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&notes_json(&notes))?);
        return Ok(());
    }

    if notes.is_empty() {
        if !ui.quiet {
            println!("{}", dim(&ui, "No notes found."));
        }
        return Ok(());
    }
    println!("{}", table(&ui, &LIST_HEADERS, list_rows(&ui, &notes)));
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.no_input)?;
    let id = session.resolve_id(&args.id)?;
    session.ensure_unlocked(&id)?;

    let content = Zeroizing::new(session.notebook().read(&id)?);
    let note = session.require(&id)?;

    if args.json {
        let value = note_json(note, Some(content.as_str()));
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if !ui.quiet {
        let lock = if note.is_password_protected {
            " [protected]"
        } else {
            ""
        };
        println!("{}{}", note.title, lock);
        let mut meta = format!(
            "{}  updated {}",
            short_id(note),
            note.updated_at.format("%Y-%m-%d %H:%M")
        );
        if !note.tags.is_empty() {
            meta.push_str(&format!("  tags: {}", note.tags.join(", ")));
        }
        println!("{}", dim(&ui, &meta));
        println!();
    }
    println!("{}", content.as_str());
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.no_input)?;
    let id = session.resolve_id(&args.id)?;
    session.ensure_unlocked(&id)?;

    let current = Zeroizing::new(session.notebook().read(&id)?);
    let body = Zeroizing::new(read_note_body(
        args.no_input,
        args.body.clone(),
        ctx.editor()?,
        Some(current.as_str()),
    )?);
    if body.as_str() == current.as_str() {
        if !ui.quiet {
            println!("{}", dim(&ui, "No changes."));
        }
        return Ok(());
    }

    let progress = spinner("Saving");
    let result = session
        .notebook_mut()
        .update_content(&id, &body)
        .map(|_| ());
    progress.finish_and_clear();
    result?;
    session.persist(&id)?;

    print_ok(&ui, &format!("Updated note {}", short_id(session.require(&id)?)));
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.force)?;
    let id = session.resolve_id(&args.id)?;

    if !args.force {
        if !session.interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --force",
            )
            .into());
        }
        let title = session.require(&id)?.title.clone();
        if !confirm(&format!("Delete \"{}\"?", title), false, true)? {
            if !ui.quiet {
                println!("{}", dim(&ui, "Cancelled."));
            }
            return Ok(());
        }
    }

    let note = session.delete(&id)?;
    print_ok(&ui, &format!("Deleted \"{}\"", note.title));
    Ok(())
}

pub fn handle_pin(ctx: &AppContext, args: &PinArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(true)?;
    let id = session.resolve_id(&args.id)?;

    session.notebook_mut().set_pinned(&id, !args.off)?;
    session.persist(&id)?;

    let verb = if args.off { "Unpinned" } else { "Pinned" };
    print_ok(&ui, &format!("{} note {}", verb, short_id(session.require(&id)?)));
    Ok(())
}

pub fn handle_duplicate(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.no_input)?;
    let id = session.resolve_id(&args.id)?;
    session.ensure_unlocked(&id)?;

    let progress = spinner("Copying");
    let result = session.notebook_mut().duplicate(&id, None);
    progress.finish_and_clear();
    let copy_id = result?;
    session.persist(&copy_id)?;

    if ui.quiet {
        println!("{}", copy_id);
    } else {
        print_ok(&ui, &format!("Created copy {}", copy_id));
    }
    Ok(())
}
