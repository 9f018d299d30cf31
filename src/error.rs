use miette::Diagnostic;
use thiserror::Error;

/// Error type for the outer surfaces of pxgov (file I/O, parsing, config).
///
/// The governance core itself never fails; these errors only come from
/// decoding inputs, reading configuration, and writing outputs.
#[derive(Error, Diagnostic, Debug)]
pub enum GovError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxgov::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxgov::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxgov::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(pxgov::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output error: {message}")]
    #[diagnostic(code(pxgov::output))]
    Output {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, GovError>;
