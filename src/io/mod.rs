//! Boundary collaborators: CLI, configuration, errors, image codecs and progress

/// Command-line parsing and command execution
pub mod cli;
/// Default parameters and the validated run configuration
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Image decode, cover-fit resizing and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
