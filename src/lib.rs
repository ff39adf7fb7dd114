//! scaffold is a project scaffolding tool.
//! It renders the paths and file contents of a template directory with a set
//! of variables and writes the result to an output directory.

/// Command-line interface module for the scaffold application
pub mod cli;

/// In-place rendering of file contents in the output tree
pub mod content;

/// Template variables and path normalization
pub mod context;

/// Error types and handling for the scaffold application
pub mod error;

/// Orchestration of a generation run
pub mod generator;

/// Creation of the output tree with rendered paths
pub mod materializer;

pub mod metadata;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality shared by paths and contents
pub mod renderer;

pub mod slug;
