//! Typed values and the reference encoder/decoder.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::rlp::{self, Item};
use super::{CodecError, Word};
use crate::table::{Scalar, TypeRef, TypeTable};

type Result<T> = std::result::Result<T, CodecError>;

/// A runtime value of some mapped type.
///
/// Maps are lists of two-element records, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    /// Two's complement.
    Int(Word),
    UInt(Word),
    String(String),
    Bytes(Vec<u8>),
    FixedBytes(Vec<u8>),
    Address([u8; 20]),
    List(Vec<Value>),
    Record(Vec<Value>),
}

impl Value {
    pub fn int(v: i128) -> Self {
        Self::Int(Word::from_i128(v))
    }

    pub fn uint(v: u128) -> Self {
        Self::UInt(Word::from_u128(v))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub(super) fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Address(_) => "address",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(w) => write!(f, "{}", w.to_signed_string()),
            Self::UInt(w) => write!(f, "{}", w.to_unsigned_string()),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) | Self::FixedBytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Address(a) => write!(f, "0x{}", hex::encode(a)),
            Self::List(items) => write_seq(f, "[", items, "]"),
            Self::Record(items) => write_seq(f, "(", items, ")"),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

pub fn encode(table: &TypeTable, ty: TypeRef, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, table, ty, value)?;
    Ok(out)
}

fn encode_into(out: &mut Vec<u8>, table: &TypeTable, ty: TypeRef, value: &Value) -> Result<()> {
    match (ty, value) {
        (TypeRef::Scalar(scalar), value) => encode_scalar(out, scalar, value),
        (TypeRef::Record(id), Value::Record(values)) => {
            let record = table.record(id);
            check_len(record.fields.len(), values.len())?;
            let items = record
                .fields
                .iter()
                .zip(values)
                .map(|(field, value)| encode(table, field.ty, value))
                .collect::<Result<Vec<_>>>()?;
            rlp::encode_list(out, &items);
            Ok(())
        }
        (TypeRef::List(id), Value::List(values)) => {
            let list = table.list(id);
            if let Some(len) = list.len {
                check_len(len, values.len())?;
            }
            let items = values
                .iter()
                .map(|value| encode(table, list.elem, value))
                .collect::<Result<Vec<_>>>()?;
            rlp::encode_list(out, &items);
            Ok(())
        }
        (ty, value) => Err(mismatch(table, ty, value.kind())),
    }
}

fn encode_scalar(out: &mut Vec<u8>, scalar: Scalar, value: &Value) -> Result<()> {
    match (scalar, value) {
        (Scalar::Bool, Value::Bool(true)) => rlp::encode_bytes(out, &[1]),
        (Scalar::Bool, Value::Bool(false)) => rlp::encode_bytes(out, &[]),
        (Scalar::UInt(width), Value::UInt(word)) => {
            if !word.fits_unsigned(width) {
                return Err(CodecError::OutOfRange(scalar.to_string()));
            }
            rlp::encode_bytes(out, word.minimal_be());
        }
        (Scalar::Int(width), Value::Int(word)) => {
            if !word.fits_signed(width) {
                return Err(CodecError::OutOfRange(scalar.to_string()));
            }
            rlp::encode_bytes(out, word.zigzag().minimal_be());
        }
        (Scalar::String, Value::String(s)) => rlp::encode_bytes(out, s.as_bytes()),
        (Scalar::Bytes, Value::Bytes(bytes)) => rlp::encode_bytes(out, bytes),
        (Scalar::FixedBytes(n), Value::FixedBytes(bytes)) => {
            check_len(n as usize, bytes.len())?;
            rlp::encode_bytes(out, bytes);
        }
        (Scalar::Address, Value::Address(address)) => rlp::encode_bytes(out, address),
        (scalar, value) => {
            return Err(CodecError::Mismatch {
                expected: scalar.to_string(),
                found: value.kind().to_string(),
            });
        }
    }
    Ok(())
}

/// Encode a map given as an unordered container, in the order of `keys`.
///
/// `keys` must list every entry exactly once.
pub fn encode_map(
    table: &TypeTable,
    ty: TypeRef,
    entries: &HashMap<Value, Value>,
    keys: &[Value],
) -> Result<Vec<u8>> {
    if table.map_pair(ty).is_none() {
        return Err(CodecError::NotAMap(table.describe(ty)));
    }
    if keys.len() != entries.len() {
        return Err(CodecError::KeyCount {
            keys: keys.len(),
            entries: entries.len(),
        });
    }

    let mut seen = HashSet::with_capacity(keys.len());
    let mut pairs = Vec::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            return Err(CodecError::DuplicateKey(key.to_string()));
        }
        let value = entries
            .get(key)
            .ok_or_else(|| CodecError::MissingKey(key.to_string()))?;
        pairs.push(Value::Record(vec![key.clone(), value.clone()]));
    }

    encode(table, ty, &Value::List(pairs))
}

/// The payload of a cross-VM call: `[method name, encoded args...]`.
pub fn encode_call(method: &str, args: &[Vec<u8>]) -> Vec<u8> {
    let mut name = Vec::new();
    rlp::encode_bytes(&mut name, method.as_bytes());

    let mut out = Vec::new();
    rlp::encode_list(
        &mut out,
        std::iter::once(name.as_slice()).chain(args.iter().map(Vec::as_slice)),
    );
    out
}

/// Decode a value of type `ty` that spans all of `bytes`.
pub fn decode(table: &TypeTable, ty: TypeRef, bytes: &[u8]) -> Result<Value> {
    let item = rlp::decode_exact(bytes)?;
    decode_item(table, ty, item)
}

fn decode_item(table: &TypeTable, ty: TypeRef, item: Item<'_>) -> Result<Value> {
    match (ty, item) {
        (TypeRef::Scalar(scalar), Item::Bytes(bytes)) => decode_scalar(scalar, bytes),
        (TypeRef::Record(id), Item::List(payload)) => {
            let record = table.record(id);
            let items = rlp::list_items(payload)?;
            check_len(record.fields.len(), items.len())?;
            let values = record
                .fields
                .iter()
                .zip(items)
                .map(|(field, item)| decode_item(table, field.ty, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Record(values))
        }
        (TypeRef::List(id), Item::List(payload)) => {
            let list = table.list(id);
            let items = rlp::list_items(payload)?;
            if let Some(len) = list.len {
                check_len(len, items.len())?;
            }
            let values = items
                .into_iter()
                .map(|item| decode_item(table, list.elem, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(values))
        }
        (ty, Item::Bytes(_)) => Err(mismatch(table, ty, "byte string")),
        (ty, Item::List(_)) => Err(mismatch(table, ty, "list")),
    }
}

fn decode_scalar(scalar: Scalar, bytes: &[u8]) -> Result<Value> {
    let value = match scalar {
        Scalar::Bool => match bytes {
            [] => Value::Bool(false),
            [1] => Value::Bool(true),
            _ => return Err(CodecError::OutOfRange(scalar.to_string())),
        },
        Scalar::UInt(width) => {
            let word = canonical_uint(scalar, bytes)?;
            if !word.fits_unsigned(width) {
                return Err(CodecError::OutOfRange(scalar.to_string()));
            }
            Value::UInt(word)
        }
        Scalar::Int(width) => {
            let word = canonical_uint(scalar, bytes)?.unzigzag();
            if !word.fits_signed(width) {
                return Err(CodecError::OutOfRange(scalar.to_string()));
            }
            Value::Int(word)
        }
        Scalar::String => {
            let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
            Value::String(s.to_string())
        }
        Scalar::Bytes => Value::Bytes(bytes.to_vec()),
        Scalar::FixedBytes(n) => {
            check_len(n as usize, bytes.len())?;
            Value::FixedBytes(bytes.to_vec())
        }
        Scalar::Address => {
            let address: [u8; 20] = bytes.try_into().map_err(|_| CodecError::Length {
                expected: 20,
                found: bytes.len(),
            })?;
            Value::Address(address)
        }
    };
    Ok(value)
}

fn canonical_uint(scalar: Scalar, bytes: &[u8]) -> Result<Word> {
    if bytes.first() == Some(&0) {
        return Err(CodecError::NonCanonical("integer with leading zero"));
    }
    Word::from_be_slice(bytes).ok_or_else(|| CodecError::OutOfRange(scalar.to_string()))
}

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(CodecError::Length { expected, found });
    }
    Ok(())
}

fn mismatch(table: &TypeTable, ty: TypeRef, found: &str) -> CodecError {
    CodecError::Mismatch {
        expected: table.describe(ty),
        found: found.to_string(),
    }
}
