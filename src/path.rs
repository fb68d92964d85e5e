//! Path grammar shared by the engine operations.
//!
//! ```text
//! path    := segment ( '.' segment | '[' index ']' )*
//! segment := key        -- non-empty, excludes '.', '[', ']'
//! index   := digit+
//! ```

use std::fmt;
use std::fmt::Write as _;

/// Characters that delimit path segments.
pub const DELIMITERS: [char; 3] = ['.', '[', ']'];

/// A single step of a path, as seen by `read`.
///
/// Tokenization only knows whether the text looks like an index; the
/// container being walked decides what the step means. An `Index` applied
/// to an object looks up the member named by `raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// A member name.
    Key(&'a str),
    /// A token made only of digits.
    Index {
        /// Parsed value of `raw`.
        index: usize,
        /// Token text, used as the member name against an object.
        raw: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Classifies one token.
    #[must_use]
    pub fn classify(token: &'a str) -> Self {
        match parse_index(token) {
            Some(index) => Self::Index { index, raw: token },
            None => Self::Key(token),
        }
    }

    /// The token text this segment was parsed from.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        match self {
            Self::Key(raw) | Self::Index { raw, .. } => *raw,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index { index, .. } => write!(f, "[{index}]"),
        }
    }
}

/// Splits `path` on the delimiters, skipping empty tokens.
///
/// Empty tokens come from adjacent delimiters such as `]` followed by `.`.
///
/// ```
/// use flatpath::path::{segments, Segment};
///
/// let steps: Vec<_> = segments("foo[1].bar").collect();
/// assert_eq!(steps, vec![
///     Segment::Key("foo"),
///     Segment::Index { index: 1, raw: "1" },
///     Segment::Key("bar"),
/// ]);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = Segment<'_>> {
    path.split(DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(Segment::classify)
}

/// Parses a non-negative integer literal: ASCII digits only, no sign.
///
/// Returns `None` for anything else, including values that overflow `usize`.
#[must_use]
pub fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Returns true if `key` can be written as a path segment and read back.
#[must_use]
pub fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(DELIMITERS)
}

/// Appends an object member step to `buf`.
pub(crate) fn push_key(buf: &mut String, key: &str) {
    if !buf.is_empty() {
        buf.push('.');
    }
    buf.push_str(key);
}

/// Appends an array element step to `buf`.
pub(crate) fn push_index(buf: &mut String, index: usize) {
    // Writing into a String cannot fail.
    let _ = write!(buf, "[{index}]");
}
