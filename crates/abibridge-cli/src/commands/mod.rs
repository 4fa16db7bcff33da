pub mod decode;
pub mod encode;
pub mod generate;
pub mod input;
pub mod types;


use std::path::PathBuf;

use abibridge_lib::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] abibridge_lib::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid JSON value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex data: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("method `{method}` takes {expected} arguments; --value must be a JSON array of them")]
    Arguments { method: String, expected: usize },
}

/// Print `error: ...` and exit with status 1.
pub(crate) fn fail(err: CliError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}
