//! Configuration types for source emission.

use std::fmt;
use std::str::FromStr;

/// Language the bindings are rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// A Solidity library calling into the other VM.
    #[default]
    Solidity,
    /// A C++ header for the WASM side.
    Cpp,
}

impl Target {
    /// File extension of rendered output, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Solidity => "sol",
            Self::Cpp => "hpp",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solidity => write!(f, "solidity"),
            Self::Cpp => write!(f, "cpp"),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solidity" | "sol" => Ok(Self::Solidity),
            "cpp" | "c++" | "hpp" => Ok(Self::Cpp),
            _ => Err(format!("unknown target `{s}` (expected `solidity` or `cpp`)")),
        }
    }
}

/// Configuration for source emission.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) target: Target,
    /// Solidity version requirement
    pub(crate) pragma: String,
    /// Directory `RLPEncode.sol`/`RLPReader.sol` are imported from
    pub(crate) rlp_import_dir: String,
    /// Spaces per indentation level
    pub(crate) indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::default(),
            pragma: "^0.8.5".to_string(),
            rlp_import_dir: "./".to_string(),
            indent: 4,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, value: Target) -> Self {
        self.target = value;
        self
    }

    pub fn pragma(mut self, value: impl Into<String>) -> Self {
        self.pragma = value.into();
        self
    }

    /// Set the import directory. A trailing `/` is added when missing.
    pub fn rlp_import_dir(mut self, value: impl Into<String>) -> Self {
        let mut dir = value.into();
        if !dir.is_empty() && !dir.ends_with('/') {
            dir.push('/');
        }
        self.rlp_import_dir = dir;
        self
    }

    pub fn indent(mut self, value: usize) -> Self {
        self.indent = value;
        self
    }
}
