//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate implements the path plumbing shared by the diff/patch/merge
//! engine: parsing and formatting of [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! strings, token escaping, and traversal of `serde_json` documents.
//!
//! A [`Path`] is a pure value type — an ordered list of string tokens with no
//! backing pointer into any document. Resolving a path against a document is
//! always an explicit traversal ([`get`], [`get_mut`]).
//!
//! # Example
//!
//! ```
//! use json_mend_pointer::{parse_pointer, format_pointer, get};
//!
//! let path = parse_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//! assert_eq!(format_pointer(&path), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use serde_json::Value;
use thiserror::Error;

/// A single token of a JSON Pointer path.
///
/// Object keys are used verbatim; array indices are decimal strings. The
/// token `-` addresses the position one past the end of an array.
pub type PathToken = String;

/// A JSON Pointer path: an ordered sequence of tokens from the document root.
pub type Path = Vec<PathToken>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("NO_PARENT")]
    NoParent,
}

/// Unescapes a JSON Pointer token.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_mend_pointer::unescape_token;
///
/// assert_eq!(unescape_token("a~0b"), "a~b");
/// assert_eq!(unescape_token("c~1d"), "c/d");
/// assert_eq!(unescape_token("plain"), "plain");
/// ```
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    token.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer token.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use json_mend_pointer::escape_token;
///
/// assert_eq!(escape_token("a~b"), "a~0b");
/// assert_eq!(escape_token("c/d"), "c~1d");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> String {
    if !token.contains('/') && !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~ must be escaped before /
    token.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path tokens.
///
/// The empty string denotes the document root and yields an empty path. A
/// pointer `/` yields a single empty token (the member named `""`). A
/// non-empty pointer missing its leading `/` is tolerated and parsed as if
/// it had one; callers that must enforce RFC syntax check the prefix
/// themselves.
///
/// # Example
///
/// ```
/// use json_mend_pointer::parse_pointer;
///
/// assert_eq!(parse_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_pointer("/"), vec![""]);
/// assert_eq!(parse_pointer("/foo/0"), vec!["foo", "0"]);
/// assert_eq!(parse_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let rest = pointer.strip_prefix('/').unwrap_or(pointer);
    rest.split('/').map(unescape_token).collect()
}

/// Format path tokens into a JSON Pointer string.
///
/// The root path formats as the empty string.
///
/// # Example
///
/// ```
/// use json_mend_pointer::format_pointer;
///
/// assert_eq!(format_pointer(&[]), "");
/// assert_eq!(
///     format_pointer(&["a~b".to_string(), "c/d".to_string()]),
///     "/a~0b/c~1d"
/// );
/// ```
pub fn format_pointer(path: &[PathToken]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(path.len() * 8);
    for token in path {
        out.push('/');
        out.push_str(&escape_token(token));
    }
    out
}

/// Check whether a token is a valid array index.
///
/// RFC 6901 array indices are decimal with no sign and no leading zeros
/// (except `"0"` itself).
///
/// # Example
///
/// ```
/// use json_mend_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("42"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let bytes = token.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `path` starts with `prefix`.
///
/// A path starts with itself; the empty prefix matches every path. Used by
/// the patch applier to reject moving a value into one of its own
/// descendants.
pub fn starts_with(path: &[PathToken], prefix: &[PathToken]) -> bool {
    if path.len() < prefix.len() {
        return false;
    }
    path[..prefix.len()] == *prefix
}

/// The parent of a path.
///
/// # Errors
///
/// Returns [`PointerError::NoParent`] for the root path.
pub fn parent(path: &[PathToken]) -> Result<Path, PointerError> {
    if path.is_empty() {
        return Err(PointerError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}

/// Resolve a path to a shared reference into `doc`.
///
/// Returns `None` if any step fails to resolve. The `-` token never
/// resolves (it names a position, not an element).
pub fn get<'a>(doc: &'a Value, path: &[PathToken]) -> Option<&'a Value> {
    let mut current = doc;
    for token in path {
        match current {
            Value::Object(members) => {
                current = members.get(token)?;
            }
            Value::Array(elements) => {
                if !is_valid_index(token) {
                    return None;
                }
                let index: usize = token.parse().ok()?;
                current = elements.get(index)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Resolve a path to an exclusive reference into `doc`.
///
/// Same resolution rules as [`get`].
pub fn get_mut<'a>(doc: &'a mut Value, path: &[PathToken]) -> Option<&'a mut Value> {
    let mut current = doc;
    for token in path {
        match current {
            Value::Object(members) => {
                current = members.get_mut(token)?;
            }
            Value::Array(elements) => {
                if !is_valid_index(token) {
                    return None;
                }
                let index: usize = token.parse().ok()?;
                current = elements.get_mut(index)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
