use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use notelock_core::VERSION;

/// Notelock - password-protected notes from the command line
#[derive(Parser)]
#[command(name = "notelock")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the note store
    #[arg(short, long, global = true, env = "NOTELOCK_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note store and config
    Init(InitArgs),

    /// Create a note
    New(NewArgs),

    /// List notes
    List(ListArgs),

    /// Show a note, prompting for its password if protected
    Show(ShowArgs),

    /// Replace a note's content
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Password-protect a note
    Protect(IdArgs),

    /// Remove password protection from a note
    Unprotect(IdArgs),

    /// Duplicate a note (protected copies get a fresh envelope)
    Duplicate(IdArgs),

    /// Pin or unpin a note
    Pin(PinArgs),

    /// Check store integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Set default editor
    #[arg(long)]
    pub editor: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Note title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Note body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Add tags to the note
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Protect the note with a password right away
    #[arg(long)]
    pub protect: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only show protected notes
    #[arg(long)]
    pub protected: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Note body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for commands that only take a note id
#[derive(Args)]
pub struct IdArgs {
    /// Note ID (UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `pin` command
#[derive(Args)]
pub struct PinArgs {
    /// Note ID (UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Unpin instead
    #[arg(long)]
    pub off: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
