//! Error handling for the scaffold application.
//! Defines the error kinds a generation run can end with and the result alias
//! used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for scaffold operations.
///
/// Every variant that is tied to a filesystem entry carries that path, so the
/// single message printed on failure always names the offending file.
#[derive(Error, Debug)]
pub enum Error {
    /// The template directory is missing or is not a directory.
    #[error("Template directory cannot be found: '{template_dir}'.")]
    TemplateNotFound { template_dir: PathBuf },

    /// The user declined to delete an existing output directory.
    #[error("Aborted: the output directory '{output_dir}' already exists and was not deleted.")]
    ConfirmationAborted { output_dir: PathBuf },

    /// The output directory is inside the template directory or contains it.
    #[error("Output directory '{output_dir}' overlaps the template directory '{template_dir}'.")]
    OverlappingDirectories { template_dir: PathBuf, output_dir: PathBuf },

    /// Two template entries translate to the same output path.
    #[error(
        "Path collision: '{first}' and '{second}' both render to '{target}'."
    )]
    PathCollision { target: PathBuf, first: PathBuf, second: PathBuf },

    /// A rendered path would be empty or would leave the output directory.
    #[error("Invalid rendered path for '{path}': '{rendered}'.")]
    InvalidRenderedPath { path: PathBuf, rendered: String },

    /// A path or a file body contains a malformed template expression.
    #[error("Template error in '{path}': {source}.")]
    RenderSyntaxError {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// A file in the output tree is not valid UTF-8 text.
    #[error("Cannot render '{path}': file content is not valid UTF-8 text.")]
    NonTextContent { path: PathBuf },

    /// A filesystem operation on a specific entry failed.
    #[error("IO error while processing '{source_path}' -> '{target}': {source}.")]
    Io {
        source_path: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking a directory tree
    #[error("Directory traversal error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Invalid variables or context file contents
    #[error("Context error: {0}.")]
    ContextError(String),

    /// Interactive prompting failed
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O failure with the source and target of the failed operation.
    pub fn io<S: Into<PathBuf>, T: Into<PathBuf>>(
        source_path: S,
        target: T,
        source: io::Error,
    ) -> Self {
        Error::Io { source_path: source_path.into(), target: target.into(), source }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
