//! Shelf CLI Library
//!
//! This crate provides the command-line interface for shelf, a terminal
//! snippet manager. It handles snippet selection, interactive parameter
//! resolution, and the execution workflow.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing with subcommands
//! - [`selection`]: Raw-mode fuzzy selection UI over the stored snippets
//! - [`param_dialog`]: Full-screen form that resolves `<name=default>`
//!   placeholders into a final command line
//!
//! # Examples
//!
//! The `shelf` binary can be used in several ways:
//!
//! ```bash
//! # Select, fill parameters, run
//! shelf
//!
//! # Same, but only print the final command
//! shelf exec --dry-run
//!
//! # Store a new snippet
//! shelf new -- docker logs -f <container>
//!
//! # Copy the resolved command instead of running it
//! shelf clip
//! ```

pub mod cli_args;
pub mod param_dialog;
pub mod selection;
