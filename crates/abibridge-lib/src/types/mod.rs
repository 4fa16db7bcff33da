//! ABI type grammar.
//!
//! A type string parses into a [`TypeNode`] tree. Every tree has a canonical,
//! whitespace-free string form (its `Display`); two type strings describe the
//! same shape exactly when their canonical forms are equal.

mod parser;


use std::fmt;

pub use parser::{parse_type, split_top_level};

/// Integer widths accepted for `intN`/`uintN`.
pub const INT_WIDTHS: [u16; 6] = [8, 16, 32, 64, 128, 256];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    Bool,
    Int(u16),
    UInt(u16),
    String,
    Bytes,
    FixedBytes(u8),
    Address,
    FixedArray(Box<TypeNode>, usize),
    Slice(Box<TypeNode>),
    Tuple(Vec<TupleElem>),
    Map(Box<TypeNode>, Box<TypeNode>),
    /// A struct declared elsewhere in the same document.
    Struct(String),
    Unsupported(UnsupportedKind),
}

/// Tuple element. Elements are either all named or all positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElem {
    pub name: Option<String>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    Function,
    FixedPoint,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::FixedPoint => write!(f, "fixedpoint"),
        }
    }
}

impl TypeNode {
    /// Slice constructor that folds `uint8[]` into `bytes`.
    pub fn slice_of(elem: TypeNode) -> Self {
        match elem {
            TypeNode::UInt(8) => TypeNode::Bytes,
            elem => TypeNode::Slice(Box::new(elem)),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int(w) => write!(f, "int{w}"),
            Self::UInt(w) => write!(f, "uint{w}"),
            Self::String => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::FixedBytes(n) => write!(f, "bytes{n}"),
            Self::Address => write!(f, "address"),
            Self::FixedArray(elem, n) => write!(f, "{elem}[{n}]"),
            Self::Slice(elem) => write!(f, "{elem}[]"),
            Self::Map(k, v) => write!(f, "map<{k},{v}>"),
            Self::Tuple(elems) => {
                write!(f, "tuple<")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    match &elem.name {
                        Some(name) => write!(f, "{} {}", elem.ty, name)?,
                        None => write!(f, "{}", elem.ty)?,
                    }
                }
                write!(f, ">")
            }
            Self::Struct(name) => write!(f, "{name}"),
            Self::Unsupported(kind) => write!(f, "{kind}"),
        }
    }
}

/// Coarse error taxonomy shared by type and compilation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed type grammar.
    Parse,
    /// Well-formed but not representable on the other side of the bridge.
    UnsupportedType,
    /// Shape-level violation: map arity, cycles, duplicates.
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("empty type")]
    Empty,

    #[error("unexpected character {text:?} at offset {offset}")]
    UnexpectedChar { text: String, offset: usize },

    #[error("expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),

    #[error("invalid array size {0:?}")]
    InvalidArraySize(String),

    #[error("unsupported integer width in `{0}`")]
    UnsupportedWidth(String),

    #[error("unsupported fixed hash size {0}")]
    UnsupportedHashSize(usize),

    #[error("unsupported type kind: {0}")]
    Unsupported(UnsupportedKind),

    #[error("tuple element #{0} has no name")]
    UnnamedTupleElement(usize),

    #[error("unknown type `{0}`")]
    UnknownStruct(String),

    #[error("invalid map type: expected 2 items, found {0}")]
    MapArity(usize),

    #[error("duplicate tuple element `{0}`")]
    DuplicateTupleElement(String),
}

impl TypeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Empty
            | Self::UnexpectedChar { .. }
            | Self::Expected { .. }
            | Self::TrailingInput(_)
            | Self::InvalidArraySize(_) => ErrorCategory::Parse,
            Self::UnsupportedWidth(_)
            | Self::UnsupportedHashSize(_)
            | Self::Unsupported(_)
            | Self::UnnamedTupleElement(_)
            | Self::UnknownStruct(_) => ErrorCategory::UnsupportedType,
            Self::MapArity(_) | Self::DuplicateTupleElement(_) => ErrorCategory::Structural,
        }
    }
}
