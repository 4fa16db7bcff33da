//! Names for synthesized records and list codecs.
//!
//! A name is `<prefix><hex>` where `<hex>` is a prefix of the SHA-256 digest
//! of the shape's canonical descriptor. The digest is for display only:
//! shape identity is decided on the full descriptor, and a name that is
//! already taken grows its digest prefix until it is unique.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

pub const MAP_PREFIX: &str = "mapping_";
pub const TUPLE_PREFIX: &str = "tuple_";
pub const LIST_PREFIX: &str = "list_";

const SHORT_DIGEST_LEN: usize = 8;

pub fn digest_hex(descriptor: &str) -> String {
    hex::encode(Sha256::digest(descriptor.as_bytes()))
}

pub fn unique_name(prefix: &str, descriptor: &str, taken: &HashSet<String>) -> String {
    let digest = digest_hex(descriptor);

    let mut len = SHORT_DIGEST_LEN;
    while len <= digest.len() {
        let name = format!("{prefix}{}", &digest[..len]);
        if !taken.contains(&name) {
            return name;
        }
        len += 2;
    }

    let mut counter = 2;
    loop {
        let name = format!("{prefix}{digest}_{counter}");
        if !taken.contains(&name) {
            return name;
        }
        counter += 1;
    }
}
