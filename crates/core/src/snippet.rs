use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A stored command snippet.
///
/// Multiple commands are joined with `"; "` into a single template at
/// execution time, so one snippet can carry a short pipeline of steps.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SnippetDefinition {
    pub description: String,
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl SnippetDefinition {
    /// The single command template this snippet resolves and executes.
    #[must_use]
    pub fn command_template(&self) -> String {
        self.commands.join("; ")
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Display for SnippetDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            // Fall back to the command itself
            formatter.write_str(&self.command_template())?;
        } else {
            formatter.write_str(&self.description)?;
        }

        for tag in &self.tags {
            write!(formatter, " #{tag}")?;
        }

        Ok(())
    }
}

/// Sorts snippets in place according to a sort-by expression.
///
/// `recency` keeps file order, `description` and `command` sort
/// lexicographically, and a leading `-` reverses any of them. An unknown
/// expression leaves the order untouched.
pub fn sort_snippets(snippets: &mut [SnippetDefinition], sort_by: &str) {
    match sort_by {
        "recency" | "+recency" | "" => {}
        "-recency" => snippets.reverse(),
        "description" | "+description" => {
            snippets.sort_by(|a, b| a.description.cmp(&b.description));
        }
        "-description" => {
            snippets.sort_by(|a, b| b.description.cmp(&a.description));
        }
        "command" | "+command" => {
            snippets.sort_by(|a, b| a.command_template().cmp(&b.command_template()));
        }
        "-command" => {
            snippets.sort_by(|a, b| b.command_template().cmp(&a.command_template()));
        }
        other => {
            log::warn!("Unknown sort-by expression `{other}`, keeping file order.");
        }
    }
}
