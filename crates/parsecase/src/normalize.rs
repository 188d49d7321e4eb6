//! Normalization of hand-written expected trees.
//!
//! Fixture authors may spread an expected tree over several indented lines:
//!
//! ```text
//! Expr(
//!   Number,
//!   Number
//! )
//! ```
//!
//! [`normalize_expected`] folds that back into the single-line form produced
//! by [`tree_to_string`](crate::tree_to_string): `Expr(Number, Number)`.

/// Join trimmed lines and put exactly one space after every comma that is
/// directly followed by a non-whitespace character.
///
/// Only applied to expected strings, never to serialized trees.
pub fn normalize_expected(expected: &str) -> String {
    let joined: String = expected.split('\n').map(str::trim).collect();

    let mut out = String::with_capacity(joined.len() + joined.len() / 4);
    let mut chars = joined.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ','
            && let Some(next) = chars.peek()
            && !next.is_whitespace()
        {
            out.push(' ');
        }
    }
    out
}
