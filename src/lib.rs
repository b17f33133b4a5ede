pub mod batch;
pub mod cli;
pub mod config;
pub mod consumer;
pub mod format;
pub mod logging;
pub mod recover;
pub mod ui;

use std::path::PathBuf;

use miette::Diagnostic;

pub use batch::{recover_path, BatchSummary};
pub use consumer::MapConsumer;
pub use recover::engine::{recover_file, FileReport};

/// Result type alias for the recovery tool
pub type Result<T> = miette::Result<T>;

/// Error types for source recovery
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum RecoverError {
    #[error("No source map found at {}", .0.display())]
    #[diagnostic(
        code(recover::missing_map),
        help("The map is expected next to the minified file as `<name>.map`. If the build emitted it elsewhere, move or symlink it alongside the input.")
    )]
    MissingMap(PathBuf),

    #[error("Failed to decode source map {}: {}", .path.display(), .reason)]
    #[diagnostic(
        code(recover::malformed_map),
        help("The file must be a JSON source map (version 3) with a valid `mappings` string. Check that the build did not truncate it.")
    )]
    MalformedMap { path: PathBuf, reason: String },

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(recover::file_error),
        help("Check that you have the necessary permissions and that the path exists.")
    )]
    FileError(String),

    #[error("Failed to write recovered file {}: {}", .path.display(), .reason)]
    #[diagnostic(
        code(recover::write_failed),
        help("Check permissions and free space in the output directory. Other outputs of the same run are unaffected.")
    )]
    WriteError { path: PathBuf, reason: String },
}
