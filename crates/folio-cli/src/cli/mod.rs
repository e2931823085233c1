//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "folio",
    bin_name = "folio",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template identifier resolution and partial rendering",
    long_about = "Folio parses template identifiers, resolves them against an \
                  ordered search path, and renders templates and partials \
                  with conventional variable bindings.",
    after_help = "EXAMPLES:\n\
        \x20 folio inspect shared/_header.html.erb -t app/views\n\
        \x20 folio render index.html.erb -t app/views --set title=Home\n\
        \x20 folio render account.html.erb -t app/views --partial --object '{\"id\":1}'\n\
        \x20 folio list -t app/views -t lib/views",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and resolve a template path, printing its pieces.
    #[command(
        visible_alias = "i",
        about = "Inspect a template identifier",
        after_help = "EXAMPLES:\n\
            \x20 folio inspect show.html.iphone.erb\n\
            \x20 folio inspect shared/_header.html.erb -t app/views --json"
    )]
    Inspect(InspectArgs),

    /// Resolve a template and render it with locals.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 folio render index.html.erb -t app/views --set title=Home\n\
            \x20 folio render account.html.erb -t app/views --partial --as client"
    )]
    Render(RenderArgs),

    /// List templates under the search directories.
    #[command(
        visible_alias = "ls",
        about = "List resolvable templates",
        after_help = "EXAMPLES:\n\
            \x20 folio list -t app/views\n\
            \x20 folio list -t app/views --json"
    )]
    List(ListArgs),
}

// ── Shared engine configuration ───────────────────────────────────────────────

/// Engine configuration shared by all subcommands: the search path, the
/// extension registry, and the ambient naming scope. Everything is explicit
/// flags; there is no config file and no global state.
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Template search directory, repeatable; order is priority order.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Add a template search directory (ordered, repeatable)"
    )]
    pub templates: Vec<PathBuf>,

    /// Extra registered handler extension (on top of the `erb` default).
    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Register a handler extension (repeatable)"
    )]
    pub extensions: Vec<String>,

    /// Ambient naming scope for bare partial references.
    #[arg(long = "scope", value_name = "NAME", help = "Ambient naming scope")]
    pub scope: Option<String>,
}

// ── Per-command arguments ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// The template path to inspect.
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Emit machine-readable JSON instead of the human table.
    #[arg(long = "json", help = "JSON output")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// The template path (or partial reference with --partial).
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Bind a local: `--set name=value`. Values that parse as JSON are
    /// structured; everything else is a plain string.
    #[arg(
        short = 's',
        long = "set",
        value_name = "NAME=VALUE",
        help = "Bind a local variable (repeatable)"
    )]
    pub set: Vec<String>,

    /// Treat PATH as a partial reference (marker added, object bound).
    #[arg(long = "partial", help = "Render as a partial reference")]
    pub partial: bool,

    /// Explicit object to bind (JSON), only with --partial.
    #[arg(
        long = "object",
        value_name = "JSON",
        requires = "partial",
        help = "Explicit bound object (JSON)"
    )]
    pub object: Option<String>,

    /// Alias name to bind the object under, only with --partial.
    #[arg(
        long = "as",
        value_name = "NAME",
        requires = "partial",
        help = "Additional alias binding"
    )]
    pub as_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Emit machine-readable JSON instead of the human table.
    #[arg(long = "json", help = "JSON output")]
    pub json: bool,

    /// Only list partials.
    #[arg(long = "partials", help = "Only partial templates")]
    pub partials_only: bool,
}
