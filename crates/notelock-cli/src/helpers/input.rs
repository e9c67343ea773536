//! Input handling helpers for passwords and note bodies.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{Confirm, Password};
use notelock_core::crypto::validate_password;
use zeroize::Zeroizing;

use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

/// Password from NOTELOCK_PASSWORD, if set and non-blank.
pub fn env_password() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for a note password.
pub fn prompt_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if !interactive {
        return Err(CliError::auth_failed_with_hint(
            "No password provided and no TTY available.",
            format!("Hint: Set {}.", PASSWORD_ENV),
        )
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Password for newly protecting a note, confirmed when typed.
pub fn prompt_new_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_password() {
        validate_password(&value).map_err(|e| CliError::invalid_input(e.to_string()))?;
        return Ok(value);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    loop {
        let password = Zeroizing::new(
            Password::new()
                .with_prompt("New password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?,
        );
        if let Err(err) = validate_password(&password) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(password);
    }
}

/// Ask a yes/no question; non-interactive sessions get `default`.
pub fn confirm(prompt: &str, default: bool, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        return Ok(default);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read a note body from --body, stdin, or $EDITOR.
pub fn read_note_body(
    no_input: bool,
    body: Option<String>,
    editor_override: Option<&str>,
    initial_body: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = body {
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer.trim_end().to_string());
    }

    if no_input {
        return Err(CliError::invalid_input("--no-input requires --body or content on stdin").into());
    }

    read_body_from_editor(editor_override, initial_body)
}

/// Open $EDITOR to compose a note body.
fn read_body_from_editor(
    editor_override: Option<&str>,
    initial_body: Option<&str>,
) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let filename = format!("notelock_{}_{}.md", std::process::id(), nanos);
    let path = std::env::temp_dir().join(filename);

    std::fs::write(&path, initial_body.unwrap_or(""))
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let status = Command::new(editor)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e));
    let contents = match status {
        Ok(status) if status.success() => std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e)),
        Ok(_) => Err(anyhow::anyhow!("Editor exited with failure")),
        Err(e) => Err(e),
    };
    // The temp file may hold decrypted text; remove it on every path.
    let _ = std::fs::remove_file(&path);

    Ok(contents?.trim_end().to_string())
}
