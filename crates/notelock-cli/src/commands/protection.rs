use notelock_core::NotelockError;

use crate::app::AppContext;
use crate::cli::IdArgs;
use crate::errors::CliError;
use crate::helpers::prompt_new_password;
use crate::output::short_id;
use crate::ui::{print_ok, spinner};

pub fn handle_protect(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.no_input)?;
    let id = session.resolve_id(&args.id)?;
    if session.require(&id)?.is_password_protected {
        return Err(CliError::from(NotelockError::AlreadyProtected).into());
    }

    let password = prompt_new_password(session.interactive())?;
    let progress = spinner("Encrypting");
    let result = session.notebook_mut().protect(&id, &password).map(|_| ());
    progress.finish_and_clear();
    result?;
    session.persist(&id)?;

    print_ok(
        &ui,
        &format!("Protected note {}", short_id(session.require(&id)?)),
    );
    Ok(())
}

pub fn handle_unprotect(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let mut session = ctx.open_session(args.no_input)?;
    let id = session.resolve_id(&args.id)?;
    if !session.require(&id)?.is_password_protected {
        return Err(CliError::from(NotelockError::NotProtected).into());
    }

    session.ensure_unlocked(&id)?;
    session.notebook_mut().unprotect(&id, None)?;
    session.persist(&id)?;

    print_ok(
        &ui,
        &format!(
            "Removed protection from note {}",
            short_id(session.require(&id)?)
        ),
    );
    Ok(())
}
