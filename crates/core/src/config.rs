//! Configuration path utilities for shelf.
//!
//! This module provides functions for resolving the snippet file path and
//! expanding shell variables like `~` in paths.

/// Default path for the snippet file
const DEFAULT_SNIPPET_PATH: &str = "~/.shelf/snippets.yml";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Default editor for `shelf edit` when `$EDITOR` is unset
pub const DEFAULT_EDITOR: &str = "vim";

/// Resolves the snippet file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// snippet path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use shelf_core::config::get_snippet_path;
///
/// // Use default path
/// let default_path = get_snippet_path(&None);
///
/// // Use custom path
/// let custom_path = get_snippet_path(&Some("/path/to/snippets.yml".to_string()));
/// ```
pub fn get_snippet_path(snippet_path_arg: &Option<String>) -> String {
    let snippet_path = match snippet_path_arg {
        Some(snippet_path) => snippet_path,
        None => DEFAULT_SNIPPET_PATH,
    };

    shellexpand::tilde(snippet_path).to_string()
}
