use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with a non-success code.")]
    SubProcessExit,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Found a snippet with an empty description in `{}`", .0)]
    EmptySnippetDescription(String),

    #[error("Found a non-unique snippet description: `{}`", .0)]
    DuplicateSnippetDescription(String),

    #[error("Parameter dialog was cancelled.")]
    DialogCancelled,

    #[error("Could not initialize the terminal for the parameter dialog: {}", .0)]
    TerminalInit(std::io::Error),

    #[error("Terminal error: {}", .0)]
    Terminal(std::io::Error),

    #[error("Clipboard error: {}", .0)]
    Clipboard(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
