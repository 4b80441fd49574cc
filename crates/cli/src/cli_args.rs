//! Command-line argument parsing for the `shelf` binary.

use clap::{Parser, Subcommand};

/// Command-line arguments for the shelf snippet manager.
///
/// Without a subcommand, `shelf` behaves like `shelf exec`: select a snippet,
/// fill its parameters and run it.
#[derive(Parser, Debug)]
#[command(name = "shelf", term_width = 0)]
pub struct Args {
    /// Path to the snippet file YAML.
    ///
    /// If not provided, defaults to `~/.shelf/snippets.yml`.
    #[arg(long, short = 'f', global = true)]
    pub snippet_file: Option<String>,

    /// Sort order for listing and selection: recency, description or command.
    ///
    /// Prefix with `-` to reverse, e.g. `-description`.
    #[arg(long, global = true, default_value = "recency", allow_hyphen_values = true)]
    pub sort_by: String,

    #[command(subcommand)]
    pub command: Option<ShelfCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ShelfCommand {
    /// Select a snippet, fill its parameters and run it (the default).
    Exec {
        /// Only offer snippets carrying this tag.
        #[arg(long, short = 't')]
        tag: Option<String>,

        /// Print the final command without executing it.
        #[arg(long, short = 'd', action)]
        dry_run: bool,
    },

    /// Print all stored snippets.
    List {
        /// Only list snippets carrying this tag.
        #[arg(long, short = 't')]
        tag: Option<String>,
    },

    /// Store a new snippet.
    New {
        /// The command to store; prompted for interactively when omitted.
        #[arg(trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Open the snippet file in $EDITOR.
    Edit,

    /// Select a snippet, fill its parameters and copy it to the clipboard.
    Clip {
        /// Only offer snippets carrying this tag.
        #[arg(long, short = 't')]
        tag: Option<String>,
    },
}
