//! Canonical percent-encoding of path segments.
//!
//! # Responsibilities
//! - Strictly decode percent-encoded segments (malformed escapes are errors)
//! - Re-encode with a fixed safe set so equivalent spellings compare equal
//! - Normalize runtime pathnames into the same canonical form as patterns
//!
//! # Design Decisions
//! - Safe set is `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, hex digits are uppercase
//! - Canonical output only contains bytes in `0x21..=0x7E`, which is what
//!   the compiled tables index on

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped by canonical encoding.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Why a segment could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` not followed by two hex digits, at this byte offset.
    Malformed(usize),
    /// The decoded bytes are not UTF-8.
    NotUtf8,
}

/// Returns true if canonical encoding leaves `byte` unchanged.
#[inline]
pub fn is_safe_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

/// Offset of the first `%` that does not start a valid escape.
pub fn find_malformed_escape(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

/// Strictly percent-decode a segment.
pub fn decode_component(segment: &str) -> Result<Cow<'_, str>, DecodeError> {
    if let Some(offset) = find_malformed_escape(segment) {
        return Err(DecodeError::Malformed(offset));
    }
    percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| DecodeError::NotUtf8)
}

/// Percent-encode raw data with the canonical safe set.
pub fn encode_component(data: &str) -> String {
    utf8_percent_encode(data, COMPONENT).to_string()
}

/// Decode then re-encode, yielding the canonical spelling of a segment.
pub fn canonicalize_segment(segment: &str) -> Result<String, DecodeError> {
    let decoded = decode_component(segment)?;
    Ok(encode_component(&decoded))
}

/// Canonicalize every segment of an absolute pathname.
///
/// Returns `None` if some segment cannot be decoded; such a path matches
/// nothing. Paths made only of safe bytes and `/` are returned as-is.
pub fn normalize_path(path: &str) -> Option<Cow<'_, str>> {
    if path.bytes().all(|b| b == b'/' || is_safe_byte(b)) {
        return Some(Cow::Borrowed(path));
    }

    let mut normalized = String::with_capacity(path.len() + 8);
    for (i, segment) in path.split('/').enumerate() {
        if i > 0 {
            normalized.push('/');
        }
        normalized.push_str(&canonicalize_segment(segment).ok()?);
    }
    Some(Cow::Owned(normalized))
}

/// Decode a canonical segment into a variable value.
pub fn decode_value(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_spellings_agree() {
        assert_eq!(canonicalize_segment("foo").unwrap(), "foo");
        assert_eq!(canonicalize_segment("fo%6f").unwrap(), "foo");
        assert_eq!(canonicalize_segment("fo%6F").unwrap(), "foo");
        assert_eq!(canonicalize_segment("enc%6Fded&").unwrap(), "encoded%26");
        assert_eq!(canonicalize_segment("%00weird%2f").unwrap(), "%00weird%2F");
        assert_eq!(canonicalize_segment("a*b(c)").unwrap(), "a*b(c)");
    }

    #[test]
    fn test_malformed_escapes() {
        assert_eq!(find_malformed_escape("bar%PP"), Some(3));
        assert_eq!(find_malformed_escape("bar%F"), Some(3));
        assert_eq!(find_malformed_escape("%"), Some(0));
        assert_eq!(find_malformed_escape("%41%42"), None);
        assert_eq!(decode_component("bar%FG"), Err(DecodeError::Malformed(3)));
        assert_eq!(decode_component("%FF"), Err(DecodeError::NotUtf8));
    }

    #[test]
    fn test_encode_treats_percent_as_data() {
        assert_eq!(encode_component("{foo}+"), "%7Bfoo%7D%2B");
        assert_eq!(encode_component("%6F"), "%256F");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/foo/bar").unwrap(), "/foo/bar");
        assert_eq!(normalize_path("/fo%6f/b%61r").unwrap(), "/foo/bar");
        assert_eq!(normalize_path("/encoded&").unwrap(), "/encoded%26");
        assert_eq!(normalize_path("/x//y/").unwrap(), "/x//y/");
        assert!(normalize_path("/%FF").is_none());
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(decode_value("a%20b"), "a b");
        assert_eq!(decode_value("%7Bx%7D"), "{x}");
    }
}
