use serde_json::json;

use super::{CodecError, Value, Word};
use crate::table::{Field, Scalar, TypeRef, TypeTable};

#[test]
fn scalars_from_json() {
    let mut table = TypeTable::new();
    let uint = table.resolve("uint64").unwrap();
    let int = table.resolve("int32").unwrap();
    let big = table.resolve("uint256").unwrap();

    assert_eq!(Value::from_json(&table, uint, &json!(42)), Ok(Value::uint(42)));
    assert_eq!(Value::from_json(&table, uint, &json!("42")), Ok(Value::uint(42)));
    assert_eq!(Value::from_json(&table, uint, &json!("0x2a")), Ok(Value::uint(42)));
    assert_eq!(Value::from_json(&table, int, &json!(-7)), Ok(Value::int(-7)));
    assert_eq!(Value::from_json(&table, int, &json!("-7")), Ok(Value::int(-7)));
    assert_eq!(
        Value::from_json(&table, big, &json!(format!("0x{}", "ff".repeat(32)))),
        Ok(Value::UInt(Word::MAX))
    );
}

#[test]
fn byte_strings_are_hex() {
    let mut table = TypeTable::new();
    let bytes = table.resolve("uint8[]").unwrap();
    let address = table.resolve("FixedHash<20>").unwrap();

    assert_eq!(
        Value::from_json(&table, bytes, &json!("0xdead")),
        Ok(Value::Bytes(vec![0xde, 0xad]))
    );
    assert_eq!(
        Value::from_json(&table, bytes, &json!("beef")),
        Ok(Value::Bytes(vec![0xbe, 0xef]))
    );
    assert_eq!(
        Value::from_json(&table, address, &json!(format!("0x{}", "ab".repeat(20)))),
        Ok(Value::Address([0xab; 20]))
    );
    assert_eq!(
        Value::from_json(&table, address, &json!(format!("0x{}", "ab".repeat(19)))),
        Err(CodecError::Length {
            expected: 20,
            found: 19
        })
    );
    assert_eq!(
        Value::from_json(&table, bytes, &json!("0xzz")),
        Err(CodecError::InvalidLiteral {
            what: "hex string",
            text: "0xzz".to_string(),
        })
    );
}

#[test]
fn invalid_number_literals() {
    let mut table = TypeTable::new();
    let uint = table.resolve("uint32").unwrap();

    assert!(matches!(
        Value::from_json(&table, uint, &json!(-1)),
        Err(CodecError::InvalidLiteral { what: "unsigned integer", .. })
    ));
    assert!(matches!(
        Value::from_json(&table, uint, &json!("12x")),
        Err(CodecError::InvalidLiteral { .. })
    ));
    assert_eq!(
        Value::from_json(&table, uint, &json!(true)),
        Err(CodecError::Mismatch {
            expected: "uint32".to_string(),
            found: "boolean".to_string(),
        })
    );
}

#[test]
fn records_by_name_or_position() {
    let mut table = TypeTable::new();
    let ty = table.resolve("tuple<uint32 id,string name>").unwrap();
    let expected = Value::Record(vec![Value::uint(1), Value::string("a")]);

    assert_eq!(
        Value::from_json(&table, ty, &json!({"name": "a", "id": 1})),
        Ok(expected.clone())
    );
    assert_eq!(
        Value::from_json(&table, ty, &json!([1, "a"])),
        Ok(expected.clone())
    );
    assert_eq!(
        expected.to_json(&table, ty).unwrap().to_string(),
        r#"{"id":1,"name":"a"}"#
    );
}

#[test]
fn record_field_errors() {
    let mut table = TypeTable::new();
    let id = table.declare_struct("Point").unwrap();
    let int = TypeRef::Scalar(Scalar::Int(32));
    table.define_fields(id, vec![Field::new("x", int), Field::new("y", int)]);
    let ty = TypeRef::Record(id);

    assert_eq!(
        Value::from_json(&table, ty, &json!({"x": 1})),
        Err(CodecError::MissingField {
            record: "Point".to_string(),
            field: "y".to_string(),
        })
    );
    assert_eq!(
        Value::from_json(&table, ty, &json!({"x": 1, "y": 2, "z": 3})),
        Err(CodecError::UnknownField {
            record: "Point".to_string(),
            field: "z".to_string(),
        })
    );
    assert_eq!(
        Value::from_json(&table, ty, &json!([1])),
        Err(CodecError::Length {
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn maps_as_pair_arrays() {
    let mut table = TypeTable::new();
    let ty = table.resolve("map<uint32,string>").unwrap();

    let value = Value::from_json(&table, ty, &json!([[2, "b"], {"first": 1, "second": "a"}])).unwrap();
    assert_eq!(
        value,
        Value::List(vec![
            Value::Record(vec![Value::uint(2), Value::string("b")]),
            Value::Record(vec![Value::uint(1), Value::string("a")]),
        ])
    );
    assert_eq!(
        value.to_json(&table, ty).unwrap(),
        json!([{"first": 2, "second": "b"}, {"first": 1, "second": "a"}])
    );
}

#[test]
fn wide_integers_render_as_strings() {
    let mut table = TypeTable::new();
    let uint = table.resolve("uint256").unwrap();
    let int = table.resolve("int128").unwrap();
    let bytes = table.resolve("bytes").unwrap();

    assert_eq!(Value::uint(7).to_json(&table, uint), Ok(json!(7)));
    assert_eq!(
        Value::UInt(Word::MAX).to_json(&table, uint),
        Ok(json!(Word::MAX.to_unsigned_string()))
    );
    assert_eq!(Value::int(-3).to_json(&table, int), Ok(json!(-3)));
    assert_eq!(
        Value::int(i128::MIN).to_json(&table, int),
        Ok(json!(i128::MIN.to_string()))
    );
    assert_eq!(
        Value::Bytes(vec![0x01, 0xff]).to_json(&table, bytes),
        Ok(json!("0x01ff"))
    );
}

#[test]
fn to_json_rejects_mismatched_value() {
    let mut table = TypeTable::new();
    let ty = table.resolve("bool[]").unwrap();

    assert_eq!(
        Value::Bool(true).to_json(&table, ty),
        Err(CodecError::Mismatch {
            expected: "bool[]".to_string(),
            found: "bool".to_string(),
        })
    );
}
