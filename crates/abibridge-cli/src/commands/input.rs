//! Loading ABI documents from a path or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use abibridge_core::AbiDocument;
use abibridge_core::utils::to_identifier;
use abibridge_lib::Contract;
use tracing::debug;

use super::CliError;

/// Stem used for stdin input, where there is no file name.
const STDIN_STEM: &str = "contract";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

pub fn read_abi(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };

    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    let text = fs::read_to_string(path).map_err(read_err)?;
    debug!(path = %path.display(), bytes = text.len(), "read ABI");
    Ok(text)
}

/// File stem of the ABI, or `contract` for stdin.
pub fn abi_stem(path: &Path) -> String {
    if is_stdin(path) {
        return STDIN_STEM.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| STDIN_STEM.to_string())
}

/// Namespace derived from the ABI file name.
pub fn default_namespace(path: &Path) -> String {
    to_identifier(&abi_stem(path))
}

/// Read and build a contract, naming it after the file.
pub fn load_contract(path: &Path) -> Result<Contract, CliError> {
    let text = read_abi(path)?;
    let document = AbiDocument::from_json(&text).map_err(abibridge_lib::Error::from)?;
    Ok(Contract::build(&document, &default_namespace(path))?)
}
