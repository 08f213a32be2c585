use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use sealbook_core::VERSION;

use crate::constants::{NEW_PASSWORD_ENV, VAULT_ENV};

/// Sealbook - a local, encrypted store for passwords and other small records
#[derive(Parser)]
#[command(name = "sealbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the sealed vault file
    #[arg(short, long, global = true, env = VAULT_ENV)]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Never prompt; read the master password from the environment only
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init(InitArgs),

    /// List records, optionally filtered
    List(ListArgs),

    /// Show one record
    Show(ShowArgs),

    /// Add a record
    Add(AddArgs),

    /// Edit a record's fields
    Edit(EditArgs),

    /// Delete a record
    #[command(alias = "remove")]
    Rm(RmArgs),

    /// Generate passwords without touching a vault
    Generate(GenerateArgs),

    /// Export the vault (sealed by default)
    Export(ExportArgs),

    /// Import records from a document
    Import(ImportArgs),

    /// Show or switch the cipher algorithm
    Algorithm(AlgorithmArgs),

    /// Change the master password
    Passwd(PasswdArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Cipher algorithm (e.g. crypt-aes-256-gcm)
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Key derivation strength (interactive, moderate, sensitive)
    #[arg(long)]
    pub strength: Option<String>,

    /// Vault title
    #[arg(long)]
    pub title: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive filter on ids, field names and values
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,

    /// Sort by id instead of vault order
    #[arg(long)]
    pub sort: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Record id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print password fields in clear
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Record id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Field as name=value (repeatable, kept in order)
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Explicit kind for a field as name=kind (text, password, notes, url)
    #[arg(long = "kind", value_name = "NAME=KIND")]
    pub kinds: Vec<String>,

    /// Add a generated `password` field (cryptic or memorable)
    #[arg(long, value_name = "STYLE")]
    pub generate: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Record id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Set an existing field's value, or add it, as name=value
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Rename a field as old=new
    #[arg(long = "rename", value_name = "OLD=NEW")]
    pub rename: Vec<String>,

    /// Remove a field
    #[arg(long = "remove", value_name = "NAME")]
    pub remove: Vec<String>,

    /// Move a field one position down
    #[arg(long = "move-down", value_name = "NAME")]
    pub move_down: Vec<String>,

    /// Move the field at one position to another, as from:to (0-based)
    #[arg(long = "move", value_name = "FROM:TO")]
    pub move_to: Vec<String>,

    /// Regenerate a password field, as name or name:style
    #[arg(long = "generate", value_name = "NAME[:STYLE]")]
    pub generate: Vec<String>,

    /// Fail if the record is no longer at this version
    #[arg(long, value_name = "N")]
    pub expected_version: Option<u64>,
}

/// Arguments for the `rm` command
#[derive(Args)]
pub struct RmArgs {
    /// Record id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Three words joined by `/` instead of random characters
    #[arg(long)]
    pub memorable: bool,

    /// Minimum length
    #[arg(long)]
    pub min: Option<usize>,

    /// Maximum length
    #[arg(long)]
    pub max: Option<usize>,

    /// Alphabet for cryptic passwords
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Number of passwords
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Export canonical plaintext JSON instead of sealed text
    #[arg(long)]
    pub plain: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Document to import (`-` for stdin)
    #[arg(value_name = "FILE", conflicts_with = "example")]
    pub source: Option<String>,

    /// Import the built-in example vault
    #[arg(long)]
    pub example: bool,

    /// Add new records instead of replacing the vault contents
    #[arg(long)]
    pub merge: bool,
}

/// Arguments for the `algorithm` command
#[derive(Args)]
pub struct AlgorithmArgs {
    /// Algorithm to switch to; omit to show the current one
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// List supported algorithms
    #[arg(long)]
    pub list: bool,
}

/// Arguments for the `passwd` command
#[derive(Args)]
pub struct PasswdArgs {
    /// Key derivation strength for the new password
    #[arg(long)]
    pub strength: Option<String>,

    /// Environment variable holding the new password (non-interactive use)
    #[arg(long, value_name = "VAR", default_value = NEW_PASSWORD_ENV)]
    pub new_password_env: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}
