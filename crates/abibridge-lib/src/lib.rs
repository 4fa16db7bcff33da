#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! abibridge: compile a contract ABI into bindings for another VM.
//!
//! Pipeline:
//! 1. [`types`]: parse type strings into shape trees
//! 2. [`table`]: intern composite shapes and name them
//! 3. [`graph`]: order generated definitions dependencies-first
//! 4. [`codec`]: plan (and, for tests and tooling, run) the RLP wire codec
//! 5. [`emit`]: render Solidity or C++ source
//!
//! [`compile`] runs all of it on one ABI document.

pub mod codec;
pub mod contract;
pub mod emit;
pub mod graph;
pub mod table;
pub mod types;


use std::fmt;

use abibridge_core::{AbiDocument, DocumentError};

pub use codec::CodecError;
pub use contract::{Contract, Function, Param};
pub use emit::{Config, Target};
pub use types::{ErrorCategory, TypeError};

/// Where an offending type string came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Site {
    Field { owner: String, field: String },
    Base { owner: String, index: usize },
    Argument { method: String, arg: String },
    Output { method: String },
    /// A type given directly, outside any document entry.
    Expression,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { owner, field } => write!(f, "struct `{owner}` field `{field}`"),
            Self::Base { owner, index } => write!(f, "struct `{owner}` base #{index}"),
            Self::Argument { method, arg } => write!(f, "method `{method}` argument `{arg}`"),
            Self::Output { method } => write!(f, "method `{method}` output"),
            Self::Expression => write!(f, "type expression"),
        }
    }
}

/// Errors that abort a compilation. No output is produced when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("{site}: `{ty}`: {error}")]
    Type {
        site: Site,
        ty: String,
        error: TypeError,
    },

    #[error("{owner}: element #{index} has no name")]
    MissingName { owner: String, index: usize },

    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("duplicate struct `{0}`")]
    DuplicateStruct(String),

    #[error("{owner}: duplicate name `{name}`")]
    DuplicateName { owner: String, name: String },

    #[error("cyclic type graph: {}", .0.join(", "))]
    CyclicTypeGraph(Vec<String>),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Document(_) | Self::InvalidIdentifier(_) => ErrorCategory::Parse,
            Self::Type { error, .. } => error.category(),
            Self::MissingName { .. } => ErrorCategory::UnsupportedType,
            Self::DuplicateStruct(_) | Self::DuplicateName { .. } | Self::CyclicTypeGraph(_) => {
                ErrorCategory::Structural
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compile ABI JSON into source text for the configured target.
pub fn compile(abi_json: &str, namespace: &str, config: &Config) -> Result<String> {
    let document = AbiDocument::from_json(abi_json)?;
    let contract = Contract::build(&document, namespace)?;
    Ok(emit::emit(&contract, config))
}
