//! Exact comparison of expected and actual serializations.

use crate::error::CaseMismatchError;

/// Character index at which `a` and `b` start to differ.
///
/// When one string is a prefix of the other this is the length (in
/// characters) of the shorter one.
pub fn diff_index(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Succeed when `expected == actual`, otherwise describe where they diverge.
pub fn compare(expected: &str, actual: &str) -> Result<(), CaseMismatchError> {
    if expected == actual {
        return Ok(());
    }
    Err(CaseMismatchError {
        expected: expected.to_string(),
        actual: actual.to_string(),
        index: diff_index(expected, actual),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::identical("abc", "abc", 3)]
    #[case::first_char("abc", "xbc", 0)]
    #[case::middle("Expr(Number)", "Expr(String)", 5)]
    #[case::prefix("Expr", "Expr(Number)", 4)]
    #[case::prefix_reversed("Expr(Number)", "Expr", 4)]
    #[case::empty("", "Expr", 0)]
    #[case::multibyte("⚠(A)", "⚠(B)", 2)]
    fn finds_divergence(#[case] a: &str, #[case] b: &str, #[case] index: usize) {
        assert_eq!(diff_index(a, b), index);
    }

    #[test]
    fn equal_strings_compare_ok() {
        assert_eq!(compare("Expr(Number)", "Expr(Number)"), Ok(()));
    }

    #[test]
    fn mismatch_points_at_first_difference() {
        let err = compare("Expr(Number)", "Expr(String)").unwrap_err();
        assert_eq!(err.index, 5);
        assert_eq!(err.expected.chars().nth(err.index), Some('N'));
        assert_eq!(err.actual.chars().nth(err.index), Some('S'));
    }

    #[test]
    fn mismatch_message_aligns_caret() {
        let err = compare("Expr(Number)", "Expr(String)").unwrap_err();
        let message = err.to_string();
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Expected: Expr(Number)");
        assert_eq!(lines[3], "Actual:   Expr(String)");
        let caret = lines[2].find('^').unwrap();
        assert_eq!(&lines[1][caret..caret + 1], "N");
        assert_eq!(&lines[3][caret..caret + 1], "S");
        assert_eq!(
            message,
            "\nExpected: Expr(Number)\n               ^\nActual:   Expr(String)"
        );
    }

    #[test]
    fn mismatch_on_truncated_actual() {
        let err = compare("Expr(Number, Number)", "Expr(Number)").unwrap_err();
        assert_eq!(err.index, 11);
    }
}
