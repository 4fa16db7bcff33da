//! RLP codec for mapped types.
//!
//! The wire contract every generated codec follows:
//! - records and lists are RLP lists, fields in declaration order
//! - unsigned integers are minimal big-endian byte strings
//! - signed integers are zigzag-mapped, then encoded as unsigned
//! - `bool` is the unsigned integer 0 or 1
//! - strings are UTF-8 bytes; `address` is 20 raw bytes
//! - a call payload is the list `[method name, args...]`
//!
//! [`CodecPlan`] is what the emitters render. [`encode`]/[`decode`] are the
//! same contract executed in Rust, used by tooling and tests.

mod json;
pub mod rlp;
mod value;
mod word;

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod rlp_tests;
#[cfg(test)]
mod word_tests;

pub use value::{Value, decode, encode, encode_call, encode_map};
pub use word::Word;

use crate::graph::Vertex;
use crate::table::{ListDef, ListId, RecordDef, RecordId, Scalar, TypeRef, TypeTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("input ends before the item does")]
    Truncated,

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("{0} trailing bytes after the item")]
    TrailingBytes(usize),

    #[error("expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    #[error("value out of range for `{0}`")]
    OutOfRange(String),

    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("map key {0} has no entry")]
    MissingKey(String),

    #[error("map key {0} is listed twice")]
    DuplicateKey(String),

    #[error("{keys} keys listed for {entries} entries")]
    KeyCount { keys: usize, entries: usize },

    #[error("`{0}` is not a map")]
    NotAMap(String),

    #[error("`{record}` has no field `{field}`")]
    UnknownField { record: String, field: String },

    #[error("`{record}` is missing field `{field}`")]
    MissingField { record: String, field: String },

    #[error("invalid {what}: {text:?}")]
    InvalidLiteral { what: &'static str, text: String },

    #[error("unknown method `{0}`")]
    UnknownMethod(String),
}

/// How a single slot is encoded and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Directly by a scalar encoder.
    Scalar(Scalar),
    /// By the generated codec of another record or list.
    Nested(Vertex),
}

impl Strategy {
    pub fn of(ty: TypeRef) -> Self {
        match ty {
            TypeRef::Scalar(s) => Self::Scalar(s),
            TypeRef::Record(id) => Self::Nested(Vertex::Record(id)),
            TypeRef::List(id) => Self::Nested(Vertex::List(id)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldPlan<'a> {
    pub index: usize,
    pub name: &'a str,
    pub ty: TypeRef,
    pub strategy: Strategy,
}

#[derive(Debug, Clone)]
pub enum CodecPlan<'a> {
    Record {
        id: RecordId,
        def: &'a RecordDef,
        fields: Vec<FieldPlan<'a>>,
    },
    List {
        id: ListId,
        def: &'a ListDef,
        elem: Strategy,
    },
}

/// The codec plan for a vertex. Roots have none.
pub fn plan(table: &TypeTable, vertex: Vertex) -> Option<CodecPlan<'_>> {
    match vertex {
        Vertex::Record(id) => {
            let def = table.record(id);
            let fields = def
                .fields
                .iter()
                .enumerate()
                .map(|(index, f)| FieldPlan {
                    index,
                    name: &f.name,
                    ty: f.ty,
                    strategy: Strategy::of(f.ty),
                })
                .collect();
            Some(CodecPlan::Record { id, def, fields })
        }
        Vertex::List(id) => {
            let def = table.list(id);
            Some(CodecPlan::List {
                id,
                def,
                elem: Strategy::of(def.elem),
            })
        }
        Vertex::Root(_) => None,
    }
}

/// The name generated `encode_*`/`decode_*` functions are suffixed with.
pub fn codec_name(table: &TypeTable, vertex: Vertex) -> &str {
    match vertex {
        Vertex::Record(id) => &table.record(id).name,
        Vertex::List(id) => &table.list(id).name,
        Vertex::Root(_) => "",
    }
}

pub fn encoder_name(table: &TypeTable, vertex: Vertex) -> String {
    format!("encode_{}", codec_name(table, vertex))
}

pub fn decoder_name(table: &TypeTable, vertex: Vertex) -> String {
    format!("decode_{}", codec_name(table, vertex))
}
