//! Recursive length-prefix framing.
//!
//! - a single byte below `0x80` is its own encoding
//! - a byte string of up to 55 bytes: `0x80 + len`, then the bytes
//! - a longer byte string: `0xb7 + len(len)`, big-endian length, the bytes
//! - a list payload of up to 55 bytes: `0xc0 + len`, then the payload
//! - a longer list payload: `0xf7 + len(len)`, big-endian length, the payload
//!
//! Decoding is strict and only accepts the canonical encoding.

use super::CodecError;

const SHORT_LIMIT: usize = 55;
const BYTES_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;

/// One decoded item. List items carry their raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item<'a> {
    Bytes(&'a [u8]),
    List(&'a [u8]),
}

pub fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    if let [b] = bytes
        && *b < BYTES_OFFSET
    {
        out.push(*b);
        return;
    }
    encode_header(out, bytes.len(), BYTES_OFFSET);
    out.extend_from_slice(bytes);
}

/// Wrap already-encoded items into a list.
pub fn encode_list<I, T>(out: &mut Vec<u8>, items: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut payload = Vec::new();
    for item in items {
        payload.extend_from_slice(item.as_ref());
    }
    encode_header(out, payload.len(), LIST_OFFSET);
    out.extend_from_slice(&payload);
}

fn encode_header(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= SHORT_LIMIT {
        out.push(offset + len as u8);
        return;
    }
    let len_bytes = len.to_be_bytes();
    let skip = len_bytes.iter().take_while(|&&b| b == 0).count();
    let len_bytes = &len_bytes[skip..];
    out.push(offset + SHORT_LIMIT as u8 + len_bytes.len() as u8);
    out.extend_from_slice(len_bytes);
}

/// Decode one item from the front of `input`, returning it and the rest.
pub fn decode_item(input: &[u8]) -> Result<(Item<'_>, &[u8]), CodecError> {
    let (&prefix, rest) = input.split_first().ok_or(CodecError::Truncated)?;

    match prefix {
        0x00..=0x7f => Ok((Item::Bytes(&input[..1]), rest)),
        0x80..=0xb7 => {
            let len = (prefix - BYTES_OFFSET) as usize;
            let (body, rest) = take(rest, len)?;
            if len == 1 && body[0] < BYTES_OFFSET {
                return Err(CodecError::NonCanonical("single byte wrapped in a string header"));
            }
            Ok((Item::Bytes(body), rest))
        }
        0xb8..=0xbf => {
            let (len, rest) = long_length(rest, (prefix - 0xb7) as usize)?;
            let (body, rest) = take(rest, len)?;
            Ok((Item::Bytes(body), rest))
        }
        0xc0..=0xf7 => {
            let (body, rest) = take(rest, (prefix - LIST_OFFSET) as usize)?;
            Ok((Item::List(body), rest))
        }
        0xf8..=0xff => {
            let (len, rest) = long_length(rest, (prefix - 0xf7) as usize)?;
            let (body, rest) = take(rest, len)?;
            Ok((Item::List(body), rest))
        }
    }
}

/// Decode exactly one item spanning all of `input`.
pub fn decode_exact(input: &[u8]) -> Result<Item<'_>, CodecError> {
    let (item, rest) = decode_item(input)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }
    Ok(item)
}

/// Split a list payload into its items.
pub fn list_items(mut payload: &[u8]) -> Result<Vec<Item<'_>>, CodecError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, rest) = decode_item(payload)?;
        items.push(item);
        payload = rest;
    }
    Ok(items)
}

fn take(input: &[u8], len: usize) -> Result<(&[u8], &[u8]), CodecError> {
    if input.len() < len {
        return Err(CodecError::Truncated);
    }
    Ok(input.split_at(len))
}

fn long_length(input: &[u8], len_of_len: usize) -> Result<(usize, &[u8]), CodecError> {
    let (len_bytes, rest) = take(input, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(CodecError::NonCanonical("length with leading zero"));
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(CodecError::Truncated);
    }

    let len = len_bytes
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len <= SHORT_LIMIT {
        return Err(CodecError::NonCanonical("long form for a short length"));
    }
    Ok((len, rest))
}
