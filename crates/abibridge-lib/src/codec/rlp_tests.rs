use super::CodecError;
use super::rlp::{Item, decode_exact, decode_item, encode_bytes, encode_list, list_items};

fn bytes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_bytes(&mut out, input);
    out
}

#[test]
fn short_byte_strings() {
    assert_eq!(bytes(&[]), [0x80]);
    assert_eq!(bytes(&[0x00]), [0x00]);
    assert_eq!(bytes(&[0x7f]), [0x7f]);
    assert_eq!(bytes(&[0x80]), [0x81, 0x80]);
    assert_eq!(bytes(b"dog"), [0x83, b'd', b'o', b'g']);
}

#[test]
fn long_byte_string_uses_length_of_length() {
    let input = [0xaa; 56];
    let out = bytes(&input);

    assert_eq!(&out[..2], &[0xb8, 56]);
    assert_eq!(&out[2..], &input[..]);

    let input = vec![0xbb; 1024];
    let out = bytes(&input);
    assert_eq!(&out[..3], &[0xb9, 0x04, 0x00]);
    assert_eq!(out.len(), 1027);
}

#[test]
fn lists_wrap_encoded_items() {
    let mut out = Vec::new();
    encode_list(&mut out, [bytes(b"cat"), bytes(b"dog")]);
    assert_eq!(
        out,
        [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
    );

    let mut empty = Vec::new();
    encode_list(&mut empty, Vec::<Vec<u8>>::new());
    assert_eq!(empty, [0xc0]);
}

#[test]
fn long_list_header() {
    let items = vec![bytes(b"abcdefghij"); 6];
    let mut out = Vec::new();
    encode_list(&mut out, &items);

    assert_eq!(&out[..2], &[0xf8, 66]);
    assert_eq!(out.len(), 68);
}

#[test]
fn decode_splits_items() {
    let input = [0x83, b'd', b'o', b'g', 0xc2, 0x01, 0x02];

    let (first, rest) = decode_item(&input).unwrap();
    assert_eq!(first, Item::Bytes(b"dog"));

    let (second, rest) = decode_item(rest).unwrap();
    assert_eq!(second, Item::List(&[0x01, 0x02]));
    assert!(rest.is_empty());

    let Item::List(payload) = second else {
        unreachable!()
    };
    assert_eq!(
        list_items(payload).unwrap(),
        vec![Item::Bytes(&[0x01]), Item::Bytes(&[0x02])]
    );
}

#[test]
fn decode_long_forms() {
    let encoded = bytes(&[0x11; 60]);
    assert_eq!(decode_exact(&encoded).unwrap(), Item::Bytes(&[0x11; 60]));

    let mut list = Vec::new();
    encode_list(&mut list, vec![bytes(&[0x22; 60])]);
    let Item::List(payload) = decode_exact(&list).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(payload.len(), 62);
}

#[test]
fn decode_rejects_truncated_input() {
    assert_eq!(decode_item(&[]), Err(CodecError::Truncated));
    assert_eq!(decode_item(&[0x83, b'd']), Err(CodecError::Truncated));
    assert_eq!(decode_item(&[0xb8]), Err(CodecError::Truncated));
    assert_eq!(decode_item(&[0xc3, 0x01]), Err(CodecError::Truncated));
}

#[test]
fn decode_rejects_non_canonical_forms() {
    assert!(matches!(
        decode_item(&[0x81, 0x05]),
        Err(CodecError::NonCanonical(_))
    ));
    assert!(matches!(
        decode_item(&[0xb8, 0x05, 1, 2, 3, 4, 5]),
        Err(CodecError::NonCanonical(_))
    ));
    assert!(matches!(
        decode_item(&[0xb9, 0x00, 0x40]),
        Err(CodecError::NonCanonical(_))
    ));
    assert!(matches!(
        decode_item(&[0xf8, 0x01, 0x01]),
        Err(CodecError::NonCanonical(_))
    ));
}

#[test]
fn decode_exact_rejects_trailing_bytes() {
    assert_eq!(
        decode_exact(&[0x01, 0x02]),
        Err(CodecError::TrailingBytes(1))
    );
}
