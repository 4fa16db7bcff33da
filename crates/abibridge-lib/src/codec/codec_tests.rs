use std::collections::HashMap;

use super::{
    CodecError, CodecPlan, Strategy, Value, Word, decode, decoder_name, encode, encode_call,
    encode_map, encoder_name, plan,
};
use crate::graph::Vertex;
use crate::table::{Scalar, TypeRef, TypeTable};

fn round_trip(table: &mut TypeTable, ty: &str, value: Value) -> Vec<u8> {
    let ty = table.resolve(ty).unwrap();
    let bytes = encode(table, ty, &value).unwrap();
    assert_eq!(decode(table, ty, &bytes).unwrap(), value);
    bytes
}

#[test]
fn unsigned_integers() {
    let mut table = TypeTable::new();

    assert_eq!(round_trip(&mut table, "uint32", Value::uint(0)), [0x80]);
    assert_eq!(round_trip(&mut table, "uint32", Value::uint(5)), [0x05]);
    assert_eq!(round_trip(&mut table, "uint8", Value::uint(255)), [0x81, 0xff]);
    assert_eq!(
        round_trip(&mut table, "uint64", Value::uint(u64::MAX as u128)),
        [0x88, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );

    let max = round_trip(&mut table, "uint256", Value::UInt(Word::MAX));
    assert_eq!(max[0], 0xa0);
    assert_eq!(&max[1..], &[0xff; 32]);
}

#[test]
fn signed_integers_are_zigzagged() {
    let mut table = TypeTable::new();

    assert_eq!(round_trip(&mut table, "int32", Value::int(0)), [0x80]);
    assert_eq!(round_trip(&mut table, "int32", Value::int(-1)), [0x01]);
    assert_eq!(round_trip(&mut table, "int32", Value::int(1)), [0x02]);
    assert_eq!(
        round_trip(&mut table, "int32", Value::int(i32::MIN as i128)),
        [0x84, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        round_trip(&mut table, "int32", Value::int(i32::MAX as i128)),
        [0x84, 0xff, 0xff, 0xff, 0xfe]
    );
    round_trip(&mut table, "int", Value::int(i128::MIN));

    let mut min = [0; 32];
    min[0] = 0x80;
    let encoded = round_trip(&mut table, "int256", Value::Int(Word::from_be_bytes(min)));
    assert_eq!(encoded[0], 0xa0);
    assert_eq!(&encoded[1..], &[0xff; 32]);

    let mut max = [0xff; 32];
    max[0] = 0x7f;
    let encoded = round_trip(&mut table, "int256", Value::Int(Word::from_be_bytes(max)));
    assert_eq!(encoded[0], 0xa0);
    assert_eq!(&encoded[1..32], &[0xff; 31]);
    assert_eq!(encoded[32], 0xfe);
}

#[test]
fn int128_rejects_two_to_the_127() {
    let mut table = TypeTable::new();
    let ty = table.resolve("int128").unwrap();
    let value = Value::Int(Word::from_u128(1 << 127));

    assert_eq!(
        encode(&table, ty, &value),
        Err(CodecError::OutOfRange("int128".to_string()))
    );
    assert!(encode(&table, ty, &Value::int(i128::MAX)).is_ok());
}

#[test]
fn integers_out_of_range() {
    let mut table = TypeTable::new();
    let int8 = table.resolve("int8").unwrap();
    let uint16 = table.resolve("uint16").unwrap();

    assert_eq!(
        encode(&table, int8, &Value::int(128)),
        Err(CodecError::OutOfRange("int8".to_string()))
    );
    assert_eq!(
        encode(&table, uint16, &Value::uint(65536)),
        Err(CodecError::OutOfRange("uint16".to_string()))
    );
    assert_eq!(
        decode(&table, uint16, &[0x83, 0x01, 0x00, 0x00]),
        Err(CodecError::OutOfRange("uint16".to_string()))
    );
}

#[test]
fn integer_with_leading_zero_is_rejected() {
    let mut table = TypeTable::new();
    let ty = table.resolve("uint32").unwrap();

    assert!(matches!(
        decode(&table, ty, &[0x00]),
        Err(CodecError::NonCanonical(_))
    ));
    assert!(matches!(
        decode(&table, ty, &[0x82, 0x00, 0x01]),
        Err(CodecError::NonCanonical(_))
    ));
}

#[test]
fn booleans() {
    let mut table = TypeTable::new();

    assert_eq!(round_trip(&mut table, "bool", Value::Bool(true)), [0x01]);
    assert_eq!(round_trip(&mut table, "bool", Value::Bool(false)), [0x80]);

    let ty = table.resolve("bool").unwrap();
    assert_eq!(
        decode(&table, ty, &[0x02]),
        Err(CodecError::OutOfRange("bool".to_string()))
    );
}

#[test]
fn strings_bytes_and_addresses() {
    let mut table = TypeTable::new();

    assert_eq!(
        round_trip(&mut table, "string", Value::string("dog")),
        [0x83, b'd', b'o', b'g']
    );
    assert_eq!(round_trip(&mut table, "string", Value::string("")), [0x80]);
    assert_eq!(
        round_trip(&mut table, "uint8[]", Value::Bytes(vec![0xde, 0xad])),
        [0x82, 0xde, 0xad]
    );

    let address = round_trip(&mut table, "FixedHash<20>", Value::Address([0x11; 20]));
    assert_eq!(address[0], 0x94);
    assert_eq!(address.len(), 21);

    round_trip(&mut table, "FixedHash<4>", Value::FixedBytes(vec![1, 2, 3, 4]));

    let ty = table.resolve("string").unwrap();
    assert_eq!(decode(&table, ty, &[0x81, 0xff]), Err(CodecError::InvalidUtf8));
}

#[test]
fn fixed_bytes_length_is_checked() {
    let mut table = TypeTable::new();
    let ty = table.resolve("FixedHash<4>").unwrap();

    assert_eq!(
        encode(&table, ty, &Value::FixedBytes(vec![1, 2, 3])),
        Err(CodecError::Length {
            expected: 4,
            found: 3
        })
    );
}

#[test]
fn arrays() {
    let mut table = TypeTable::new();

    assert_eq!(
        round_trip(&mut table, "uint32[]", Value::List(vec![])),
        [0xc0]
    );
    assert_eq!(
        round_trip(
            &mut table,
            "uint32[]",
            Value::List(vec![Value::uint(1), Value::uint(2), Value::uint(3)])
        ),
        [0xc3, 0x01, 0x02, 0x03]
    );
    round_trip(
        &mut table,
        "string[][]",
        Value::List(vec![
            Value::List(vec![Value::string("a"), Value::string("bc")]),
            Value::List(vec![]),
        ]),
    );
}

#[test]
fn fixed_array_length_is_checked() {
    let mut table = TypeTable::new();
    let ty = table.resolve("uint32[3]").unwrap();
    let short = Value::List(vec![Value::uint(1), Value::uint(2)]);

    assert_eq!(
        encode(&table, ty, &short),
        Err(CodecError::Length {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        decode(&table, ty, &[0xc2, 0x01, 0x02]),
        Err(CodecError::Length {
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn tuples() {
    let mut table = TypeTable::new();

    assert_eq!(
        round_trip(
            &mut table,
            "tuple<uint32 id,string name>",
            Value::Record(vec![Value::uint(1), Value::string("a")])
        ),
        [0xc2, 0x01, 0x61]
    );
    round_trip(
        &mut table,
        "tuple<uint32,tuple<bool,string[]>>",
        Value::Record(vec![
            Value::uint(7),
            Value::Record(vec![
                Value::Bool(true),
                Value::List(vec![Value::string("x"), Value::string("y")]),
            ]),
        ]),
    );
}

#[test]
fn shape_mismatch() {
    let mut table = TypeTable::new();
    let tuple = table.resolve("tuple<bool,bool>").unwrap();
    let uint = table.resolve("uint32").unwrap();

    assert_eq!(
        encode(&table, tuple, &Value::uint(1)),
        Err(CodecError::Mismatch {
            expected: "tuple<bool,bool>".to_string(),
            found: "uint".to_string(),
        })
    );
    assert_eq!(
        decode(&table, tuple, &[0x01]),
        Err(CodecError::Mismatch {
            expected: "tuple<bool,bool>".to_string(),
            found: "byte string".to_string(),
        })
    );
    assert_eq!(
        decode(&table, uint, &[0xc0]),
        Err(CodecError::Mismatch {
            expected: "uint32".to_string(),
            found: "list".to_string(),
        })
    );
}

#[test]
fn maps_are_lists_of_pairs() {
    let mut table = TypeTable::new();
    let value = Value::List(vec![
        Value::Record(vec![Value::uint(2), Value::string("b")]),
        Value::Record(vec![Value::uint(1), Value::string("a")]),
    ]);

    assert_eq!(
        round_trip(&mut table, "map<uint32,string>", value),
        [0xc6, 0xc2, 0x02, 0x62, 0xc2, 0x01, 0x61]
    );
}

#[test]
fn encode_map_follows_key_order() {
    let mut table = TypeTable::new();
    let ty = table.resolve("map<uint32,string>").unwrap();
    let entries = HashMap::from([
        (Value::uint(1), Value::string("a")),
        (Value::uint(2), Value::string("b")),
    ]);

    let forward = encode_map(&table, ty, &entries, &[Value::uint(1), Value::uint(2)]).unwrap();
    let reverse = encode_map(&table, ty, &entries, &[Value::uint(2), Value::uint(1)]).unwrap();

    assert_eq!(forward, [0xc6, 0xc2, 0x01, 0x61, 0xc2, 0x02, 0x62]);
    assert_eq!(reverse, [0xc6, 0xc2, 0x02, 0x62, 0xc2, 0x01, 0x61]);
    assert_eq!(
        decode(&table, ty, &reverse).unwrap(),
        Value::List(vec![
            Value::Record(vec![Value::uint(2), Value::string("b")]),
            Value::Record(vec![Value::uint(1), Value::string("a")]),
        ])
    );
}

#[test]
fn encode_map_rejects_bad_keys() {
    let mut table = TypeTable::new();
    let ty = table.resolve("map<uint32,string>").unwrap();
    let slice = table.resolve("uint32[]").unwrap();
    let entries = HashMap::from([
        (Value::uint(1), Value::string("a")),
        (Value::uint(2), Value::string("b")),
    ]);

    assert_eq!(
        encode_map(&table, slice, &entries, &[]),
        Err(CodecError::NotAMap("uint32[]".to_string()))
    );
    assert_eq!(
        encode_map(&table, ty, &entries, &[Value::uint(1)]),
        Err(CodecError::KeyCount {
            keys: 1,
            entries: 2
        })
    );
    assert_eq!(
        encode_map(&table, ty, &entries, &[Value::uint(1), Value::uint(1)]),
        Err(CodecError::DuplicateKey("1".to_string()))
    );
    assert_eq!(
        encode_map(&table, ty, &entries, &[Value::uint(1), Value::uint(3)]),
        Err(CodecError::MissingKey("3".to_string()))
    );
}

#[test]
fn call_payload() {
    let mut table = TypeTable::new();
    let ty = table.resolve("uint32").unwrap();
    let arg = encode(&table, ty, &Value::uint(5)).unwrap();

    assert_eq!(
        encode_call("set", &[arg]),
        [0xc5, 0x83, b's', b'e', b't', 0x05]
    );
    assert_eq!(encode_call("get", &[]), [0xc4, 0x83, b'g', b'e', b't']);
}

#[test]
fn trailing_bytes_after_value() {
    let mut table = TypeTable::new();
    let ty = table.resolve("uint32").unwrap();

    assert_eq!(
        decode(&table, ty, &[0x05, 0x06]),
        Err(CodecError::TrailingBytes(1))
    );
}

#[test]
fn record_plan_lists_fields_in_wire_order() {
    let mut table = TypeTable::new();
    let ty = table.resolve("tuple<uint32 id,string[] tags>").unwrap();
    let tags = table.resolve("string[]").unwrap();
    let TypeRef::Record(id) = ty else {
        panic!("tuple should map to a record");
    };
    let TypeRef::List(tags) = tags else {
        panic!("slice should map to a list");
    };

    let Some(CodecPlan::Record { fields, .. }) = plan(&table, Vertex::Record(id)) else {
        panic!("record vertex should have a record plan");
    };
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].strategy, Strategy::Scalar(Scalar::UInt(32)));
    assert_eq!(fields[1].index, 1);
    assert_eq!(fields[1].strategy, Strategy::Nested(Vertex::List(tags)));

    let name = &table.record(id).name;
    assert_eq!(encoder_name(&table, Vertex::Record(id)), format!("encode_{name}"));
    assert_eq!(decoder_name(&table, Vertex::Record(id)), format!("decode_{name}"));
    assert!(plan(&table, Vertex::Root(0)).is_none());
}

#[test]
fn list_plan_names_element_strategy() {
    let mut table = TypeTable::new();
    let ty = table.resolve("bool[2]").unwrap();
    let TypeRef::List(id) = ty else {
        panic!("fixed array should map to a list");
    };

    let Some(CodecPlan::List { def, elem, .. }) = plan(&table, Vertex::List(id)) else {
        panic!("list vertex should have a list plan");
    };
    assert_eq!(def.len, Some(2));
    assert_eq!(elem, Strategy::Scalar(Scalar::Bool));
}
