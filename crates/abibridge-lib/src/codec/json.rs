//! JSON bridge for [`Value`].
//!
//! Integers are JSON numbers when they fit 64 bits and decimal strings
//! otherwise (unsigned inputs also accept `0x` hex strings). Byte strings and
//! addresses are `0x`-prefixed hex. Records are objects keyed by field name;
//! positional arrays are accepted on input.

use serde_json::{Map, Value as Json};

use super::{CodecError, Value, Word};
use crate::table::{Scalar, TypeRef, TypeTable};

type Result<T> = std::result::Result<T, CodecError>;

impl Value {
    pub fn from_json(table: &TypeTable, ty: TypeRef, json: &Json) -> Result<Self> {
        match (ty, json) {
            (TypeRef::Scalar(scalar), json) => scalar_from_json(scalar, json),
            (TypeRef::Record(id), Json::Object(map)) => {
                let record = table.record(id);
                if let Some(unknown) = map
                    .keys()
                    .find(|k| !record.fields.iter().any(|f| &f.name == *k))
                {
                    return Err(CodecError::UnknownField {
                        record: record.name.clone(),
                        field: unknown.clone(),
                    });
                }
                let values = record
                    .fields
                    .iter()
                    .map(|field| {
                        let json = map.get(&field.name).ok_or_else(|| CodecError::MissingField {
                            record: record.name.clone(),
                            field: field.name.clone(),
                        })?;
                        Self::from_json(table, field.ty, json)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Record(values))
            }
            (TypeRef::Record(id), Json::Array(items)) => {
                let record = table.record(id);
                if record.fields.len() != items.len() {
                    return Err(CodecError::Length {
                        expected: record.fields.len(),
                        found: items.len(),
                    });
                }
                let values = record
                    .fields
                    .iter()
                    .zip(items)
                    .map(|(field, json)| Self::from_json(table, field.ty, json))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Record(values))
            }
            (TypeRef::List(id), Json::Array(items)) => {
                let elem = table.list(id).elem;
                let values = items
                    .iter()
                    .map(|json| Self::from_json(table, elem, json))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::List(values))
            }
            (ty, json) => Err(CodecError::Mismatch {
                expected: table.describe(ty),
                found: json_kind(json).to_string(),
            }),
        }
    }

    pub fn to_json(&self, table: &TypeTable, ty: TypeRef) -> Result<Json> {
        let json = match (ty, self) {
            (TypeRef::Scalar(_), Self::Bool(b)) => Json::Bool(*b),
            (TypeRef::Scalar(_), Self::UInt(word)) => match word.to_u64() {
                Some(n) => Json::from(n),
                None => Json::String(word.to_unsigned_string()),
            },
            (TypeRef::Scalar(_), Self::Int(word)) => match word.to_i64() {
                Some(n) => Json::from(n),
                None => Json::String(word.to_signed_string()),
            },
            (TypeRef::Scalar(_), Self::String(s)) => Json::String(s.clone()),
            (TypeRef::Scalar(_), Self::Bytes(b) | Self::FixedBytes(b)) => {
                Json::String(format!("0x{}", hex::encode(b)))
            }
            (TypeRef::Scalar(_), Self::Address(a)) => Json::String(format!("0x{}", hex::encode(a))),
            (TypeRef::Record(id), Self::Record(values)) => {
                let record = table.record(id);
                let mut map = Map::new();
                for (field, value) in record.fields.iter().zip(values) {
                    map.insert(field.name.clone(), value.to_json(table, field.ty)?);
                }
                Json::Object(map)
            }
            (TypeRef::List(id), Self::List(values)) => {
                let elem = table.list(id).elem;
                Json::Array(
                    values
                        .iter()
                        .map(|v| v.to_json(table, elem))
                        .collect::<Result<Vec<_>>>()?,
                )
            }
            (ty, value) => {
                return Err(CodecError::Mismatch {
                    expected: table.describe(ty),
                    found: value.kind().to_string(),
                });
            }
        };
        Ok(json)
    }
}

fn scalar_from_json(scalar: Scalar, json: &Json) -> Result<Value> {
    let value = match (scalar, json) {
        (Scalar::Bool, Json::Bool(b)) => Value::Bool(*b),
        (Scalar::UInt(_), Json::Number(n)) => {
            let n = n.as_u64().ok_or_else(|| invalid("unsigned integer", json))?;
            Value::UInt(Word::from_u128(n as u128))
        }
        (Scalar::UInt(_), Json::String(s)) => {
            Value::UInt(Word::parse_unsigned(s).ok_or_else(|| invalid("unsigned integer", json))?)
        }
        (Scalar::Int(_), Json::Number(n)) => {
            let n = n.as_i64().ok_or_else(|| invalid("integer", json))?;
            Value::Int(Word::from_i128(n as i128))
        }
        (Scalar::Int(_), Json::String(s)) => {
            Value::Int(Word::parse_signed(s).ok_or_else(|| invalid("integer", json))?)
        }
        (Scalar::String, Json::String(s)) => Value::String(s.clone()),
        (Scalar::Bytes, Json::String(s)) => Value::Bytes(decode_hex(s)?),
        (Scalar::FixedBytes(_), Json::String(s)) => Value::FixedBytes(decode_hex(s)?),
        (Scalar::Address, Json::String(s)) => {
            let bytes = decode_hex(s)?;
            let found = bytes.len();
            Value::Address(
                bytes
                    .try_into()
                    .map_err(|_| CodecError::Length { expected: 20, found })?,
            )
        }
        (scalar, json) => {
            return Err(CodecError::Mismatch {
                expected: scalar.to_string(),
                found: json_kind(json).to_string(),
            });
        }
    };
    Ok(value)
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|_| CodecError::InvalidLiteral {
        what: "hex string",
        text: s.to_string(),
    })
}

fn invalid(what: &'static str, json: &Json) -> CodecError {
    CodecError::InvalidLiteral {
        what,
        text: json.to_string(),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
