/// Whether `s` is usable as an identifier in both Solidity and C++.
///
/// # Examples
/// ```
/// use abibridge_core::utils::is_identifier;
/// assert!(is_identifier("my_contract"));
/// assert!(!is_identifier("2fast"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Turn an arbitrary string (typically a file stem) into an identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit gets a `_`
/// prefix.
///
/// # Examples
/// ```
/// use abibridge_core::utils::to_identifier;
/// assert_eq!(to_identifier("my-token.v2"), "my_token_v2");
/// assert_eq!(to_identifier("1inch"), "_1inch");
/// ```
pub fn to_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
