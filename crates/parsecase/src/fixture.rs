//! # Fixture Files
//!
//! A fixture file holds any number of test cases, each made of a header, the
//! input to parse, a `==>` separator and the expected tree:
//!
//! ```text
//! # simple add
//! 1 + 2
//! ==>
//! Expr(BinOp(Number, Plus, Number))
//!
//! # strict call{"strict": true}
//! max(1, 2)
//! ==>
//! Expr(
//!   FunctionCall(Identifier, Arguments(Number, Number))
//! )
//! ```
//!
//! ## Block Grammar
//!
//! Blocks are matched one after the other from a cursor that only moves
//! forward:
//!
//! 1. optional whitespace, then `#`, then the header up to the end of the line
//!    (the line break is required)
//! 2. the input: everything up to the first run of two or more `=` directly
//!    followed by `>`
//! 3. the separator itself (`==>`, `===>`, ...)
//! 4. the expected tree: everything up to the end of the file, or up to a run
//!    of line breaks directly followed by `#`; that `#` starts the next block
//!    and is not consumed
//!
//! The header is a free-form name, optionally ending in a JSON object with
//! parser options: `# name{"strict": true}`.
//!
//! When a block cannot be matched where the cursor stands, extraction stops
//! with a [`MalformedFixtureError`] showing the text from that point on. No
//! partial list of cases is returned.

use serde_json::{Map, Value};

use crate::Parser;
use crate::compare::compare;
use crate::error::{FixtureError, MalformedFixtureError, RunError};
use crate::normalize::normalize_expected;
use crate::options::ParserOptions;
use crate::serialize::tree_to_string;

/// How many characters of context a malformed-fixture error shows, at least.
const CONTEXT_CHARS: usize = 80;

/// One test case extracted from a fixture file.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    name: String,
    config: Option<Map<String, Value>>,
    input: String,
    expected: String,
    line: usize,
}

impl Case {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parser options from the header, if any.
    pub fn config(&self) -> Option<&Map<String, Value>> {
        self.config.as_ref()
    }

    /// Input text, trimmed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Expected tree as written in the file, trimmed but not normalized.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// 1-based line of the case header.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Parse the input with `parser` and check the result against the
    /// expected tree.
    ///
    /// The parser is reconfigured with `strict: false`, overridden by the
    /// case's own options.
    pub fn run<P: Parser>(&self, parser: &P) -> Result<(), RunError> {
        let options = ParserOptions::for_case(self.config.as_ref());
        log::trace!("running '{}' with options {:?}", self.name, options);

        let parser = parser
            .configure(&options)
            .map_err(|e| RunError::Configure(Box::new(e)))?;
        let tree = parser
            .parse(&self.input)
            .map_err(|e| RunError::Parse(Box::new(e)))?;

        let actual = tree_to_string(&tree);
        let expected = normalize_expected(&self.expected);
        compare(&expected, &actual)?;
        Ok(())
    }
}

/// Extract every case from a fixture file.
///
/// `file_name` is only used in error messages.
pub fn file_tests(text: &str, file_name: &str) -> Result<Vec<Case>, FixtureError> {
    Cases::new(text, file_name).collect()
}

/// Lazily extracts the cases of a fixture file, in file order.
///
/// Yields at most one error, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Cases<'a> {
    scanner: Scanner<'a>,
    file_name: &'a str,
    done: bool,
}

impl<'a> Cases<'a> {
    pub fn new(text: &'a str, file_name: &'a str) -> Self {
        Self {
            scanner: Scanner::new(text),
            file_name,
            done: false,
        }
    }

    fn malformed(&self, at: usize) -> FixtureError {
        MalformedFixtureError {
            file_name: self.file_name.to_string(),
            context: line_context(self.scanner.text, at),
        }
        .into()
    }

    fn case(&self, block: Block<'a>) -> Result<Case, FixtureError> {
        let (name, config) = split_header(block.header);
        let config = match config {
            None => None,
            Some(raw) => match serde_json::from_str(raw) {
                Ok(Value::Object(map)) => Some(map),
                Ok(_) => {
                    return Err(FixtureError::ConfigNotObject {
                        file_name: self.file_name.to_string(),
                        case: name.to_string(),
                    });
                }
                Err(source) => {
                    return Err(FixtureError::InvalidConfig {
                        file_name: self.file_name.to_string(),
                        case: name.to_string(),
                        source,
                    });
                }
            },
        };

        Ok(Case {
            name: name.to_string(),
            config,
            input: block.input.trim().to_string(),
            expected: block.expected.trim().to_string(),
            line: block.line,
        })
    }
}

impl Iterator for Cases<'_> {
    type Item = Result<Case, FixtureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.scanner.pos;
        let result = match self.scanner.block() {
            Some(block)
                if block.input.trim().is_empty() || block.expected.trim().is_empty() =>
            {
                Err(self.malformed(start))
            }
            Some(block) => self.case(block),
            None => Err(self.malformed(start)),
        };

        match &result {
            Ok(case) => {
                log::debug!(
                    "extracted case '{}' from {} (line {})",
                    case.name,
                    self.file_name,
                    case.line
                );
                self.done = self.scanner.at_end();
            }
            Err(e) => {
                log::debug!("stopped extracting from {}: {e}", self.file_name);
                self.done = true;
            }
        }
        Some(result)
    }
}

/// Raw text of one block, before trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block<'a> {
    header: &'a str,
    input: &'a str,
    expected: &'a str,
    line: usize,
}

/// Forward-only cursor over a fixture file.
#[derive(Debug, Clone)]
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Match one block at the cursor. On failure the cursor does not move.
    fn block(&mut self) -> Option<Block<'a>> {
        let text = self.text;
        let bytes = text.as_bytes();

        let rest = &text[self.pos..];
        let hash = self.pos + (rest.len() - rest.trim_start_matches(is_space).len());
        if bytes.get(hash) != Some(&b'#') {
            return None;
        }

        let mut pos = hash + 1;
        while let Some(c) = text[pos..].chars().next()
            && is_space(c)
            && c != '\r'
            && c != '\n'
        {
            pos += c.len_utf8();
        }

        let header_end = pos + text[pos..].find(['\r', '\n'])?;
        let header = &text[pos..header_end];
        let input_start = header_end + line_break_len(&text[header_end..]);

        let (separator_start, separator_end) = find_separator(bytes, input_start)?;
        let (expected_end, next) = find_block_end(bytes, separator_end);

        let line = self.line + count_line_breaks(&text[self.pos..hash]);
        self.line += count_line_breaks(&text[self.pos..next]);
        self.pos = next;

        Some(Block {
            header,
            input: &text[input_start..separator_start],
            expected: &text[separator_end..expected_end],
            line,
        })
    }
}

/// Whitespace between blocks, including a byte order mark.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Number of line breaks in `s`, where `\r\n`, `\r` and `\n` each count once.
fn count_line_breaks(s: &str) -> usize {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

fn line_break_len(s: &str) -> usize {
    if s.starts_with("\r\n") { 2 } else { 1 }
}

/// First `={2,}>` at or after `from`, as `(start, end)`.
fn find_separator(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'=' {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j] == b'=' {
            j += 1;
        }
        if j - i >= 2 && bytes.get(j) == Some(&b'>') {
            return Some((i, j + 1));
        }
        i = j;
    }
    None
}

/// End of the expected text starting at `from`, and where the next block
/// starts.
///
/// The expected text ends at the first run of line breaks followed by `#`
/// (the next block starts at that `#`), or at the end of the file.
fn find_block_end(bytes: &[u8], from: usize) -> (usize, usize) {
    let is_break = |b: u8| b == b'\r' || b == b'\n';
    let mut i = from;
    while i < bytes.len() {
        if !is_break(bytes[i]) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < bytes.len() && is_break(bytes[j]) {
            j += 1;
        }
        if bytes.get(j) == Some(&b'#') {
            return (i, j);
        }
        i = j;
    }
    (bytes.len(), bytes.len())
}

/// Split a header into its name and the raw JSON options, if any.
///
/// The options are the text from the first `{` to the end of the line, when
/// the line ends with `}`.
fn split_header(header: &str) -> (&str, Option<&str>) {
    if header.ends_with('}')
        && let Some(open) = header.find('{')
    {
        return (header[..open].trim(), Some(&header[open..]));
    }
    (header.trim(), None)
}

/// The text from `at` to the end of the line that contains the character
/// [`CONTEXT_CHARS`] positions later, each line prefixed with `  | `.
fn line_context(text: &str, at: usize) -> String {
    let rest = &text[at..];
    let limit = rest
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(rest.len(), |(i, _)| i);
    let end = rest[limit..].find('\n').map_or(rest.len(), |i| limit + i);

    rest[..end]
        .split('\n')
        .map(|line| format!("  | {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::tree::MemoryTree;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::cell::RefCell;
    use std::fmt;

    fn single(text: &str) -> Case {
        let mut cases = file_tests(text, "test.txt").unwrap();
        assert_eq!(cases.len(), 1, "expected exactly one case");
        cases.remove(0)
    }

    fn malformed(text: &str) -> MalformedFixtureError {
        match file_tests(text, "broken.txt") {
            Err(FixtureError::Malformed(e)) => e,
            other => panic!("expected a malformed fixture error, got {other:?}"),
        }
    }

    #[test]
    fn extracts_simple_case() {
        let case = single("# simple add\n1 + 2\n==>\nExpr(BinOp(Number, Plus, Number))\n");

        assert_eq!(case.name(), "simple add");
        assert_eq!(case.config(), None);
        assert_eq!(case.input(), "1 + 2");
        assert_eq!(case.expected(), "Expr(BinOp(Number, Plus, Number))");
        assert_eq!(case.line(), 1);
    }

    #[test]
    fn extracts_config_object() {
        let case = single("# strict test{\"strict\":true}\n1\n==>\nExpr(Number)");

        assert_eq!(case.name(), "strict test");
        assert_eq!(case.config(), json!({"strict": true}).as_object());
    }

    #[test]
    fn trims_space_before_config() {
        let case = single("# spaced {\"a\": [1, 2]}\n1\n==>\nExpr(Number)");

        assert_eq!(case.name(), "spaced");
        assert_eq!(case.config(), json!({"a": [1, 2]}).as_object());
    }

    #[test]
    fn braces_without_trailing_brace_stay_in_name() {
        let case = single("# uses {braces} inline\n1\n==>\nExpr(Number)");

        assert_eq!(case.name(), "uses {braces} inline");
        assert_eq!(case.config(), None);
    }

    #[test]
    fn extracts_cases_in_file_order() {
        let text = "\
# first
1
==>
Expr(Number)

# second{\"strict\": true}
a
===>
Expr(Identifier)


# third
f(1,
  2)
==>
Expr(
  FunctionCall(Identifier, Arguments(Number,Number))
)
";
        let cases = file_tests(text, "ordered.txt").unwrap();
        let summary: Vec<_> = cases
            .iter()
            .map(|c| (c.name(), c.line(), c.input(), c.config().is_some()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("first", 1, "1", false),
                ("second", 6, "a", true),
                ("third", 12, "f(1,\n  2)", false),
            ]
        );
        assert_eq!(
            cases[2].expected(),
            "Expr(\n  FunctionCall(Identifier, Arguments(Number,Number))\n)"
        );
    }

    #[test]
    fn input_keeps_inner_lines_verbatim() {
        let case = single("#multi\n  a\n\n    b  \n==>\nX");
        assert_eq!(case.name(), "multi");
        assert_eq!(case.input(), "a\n\n    b");
    }

    #[test]
    fn accepts_leading_whitespace_and_crlf() {
        let cases = file_tests(
            "\r\n\r\n  #  one\r\n1\r\n==>\r\nExpr(Number)\r\n\r\n# two\r\n2\r\n==>\r\nExpr(Number)",
            "crlf.txt",
        )
        .unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name(), "one");
        assert_eq!(cases[0].line(), 3);
        assert_eq!(cases[0].expected(), "Expr(Number)");
        assert_eq!(cases[1].name(), "two");
        assert_eq!(cases[1].line(), 8);
    }

    #[test]
    fn bare_carriage_returns_count_as_lines() {
        let cases = file_tests("# a\r1\r==>\rX\r\r# b\r2\r==>\rY", "cr.txt").unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].line(), 1);
        assert_eq!(cases[1].name(), "b");
        assert_eq!(cases[1].line(), 6);
    }

    #[rstest]
    #[case::newline("a\nb\n", 2)]
    #[case::crlf("a\r\nb\r\n", 2)]
    #[case::bare_cr("a\rb\r", 2)]
    #[case::mixed("\r\n\r\n\r", 4)]
    #[case::none("abc", 0)]
    fn counts_line_breaks(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(count_line_breaks(text), expected);
    }

    #[test]
    fn leading_byte_order_mark_is_skipped() {
        let case = single("\u{feff}# a\n1\n==>\nX");

        assert_eq!(case.name(), "a");
        assert_eq!(case.input(), "1");
        assert_eq!(case.line(), 1);
    }

    #[test]
    fn hash_inside_a_line_does_not_split_blocks() {
        let case = single("# comment\nx # not a header\n==>\nA # still expected\n  # indented");
        assert_eq!(case.input(), "x # not a header");
        assert_eq!(case.expected(), "A # still expected\n  # indented");
    }

    #[test]
    fn separator_inside_input_ends_it() {
        let case = single("# arrows\na => b\n==>\nExpr");
        assert_eq!(case.input(), "a => b");
        assert_eq!(case.expected(), "Expr");

        let case = single("# arrows\na ==> b\n==>\nExpr");
        assert_eq!(case.input(), "a");
        assert_eq!(case.expected(), "b\n==>\nExpr");
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = malformed("# no separator\n1 + 2\nExpr(Number)\n");

        assert_eq!(err.file_name, "broken.txt");
        assert!(!err.context.is_empty());
        assert_eq!(
            err.to_string(),
            "Unexpected file format in broken.txt around\n\n  \
             | # no separator\n  | 1 + 2\n  | Expr(Number)\n  | "
        );
    }

    #[test]
    fn malformed_block_after_good_one_reports_its_position() {
        let err = malformed("# ok\n1\n==>\nExpr(Number)\n\n# broken\n2\n");
        assert_eq!(err.context, "  | # broken\n  | 2\n  | ");
    }

    #[test]
    fn header_without_line_break_is_malformed() {
        let err = malformed("# just a name");
        assert_eq!(err.context, "  | # just a name");
    }

    #[test]
    fn text_before_first_header_is_malformed() {
        let err = malformed("stray\n# case\n1\n==>\nX");
        assert_eq!(err.context, "  | stray\n  | # case\n  | 1\n  | ==>\n  | X");
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace_only("  \n\n")]
    #[case::empty_input("# empty\n\n==>\nExpr")]
    #[case::empty_expected("# empty\n1\n==>\n  \n")]
    fn degenerate_files_are_malformed(#[case] text: &str) {
        let err = malformed(text);
        assert!(err.context.starts_with("  | "));
    }

    #[test]
    fn context_is_cut_after_the_line_holding_char_80() {
        let long_line = "x".repeat(100);
        let text = format!("{long_line}\nsecond\n");
        let err = malformed(&text);
        assert_eq!(err.context, format!("  | {long_line}"));

        let text = format!("short\n{long_line}\nthird\n");
        let err = malformed(&text);
        assert_eq!(err.context, format!("  | short\n  | {long_line}"));
    }

    #[test]
    fn invalid_config_json_is_reported() {
        match file_tests("# bad{strict: true}\n1\n==>\nX", "cfg.txt") {
            Err(FixtureError::InvalidConfig {
                file_name, case, ..
            }) => {
                assert_eq!(file_name, "cfg.txt");
                assert_eq!(case, "bad");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lazy_iteration_stops_after_error() {
        let mut cases = Cases::new("# ok\n1\n==>\nX\n\n# broken\n", "lazy.txt");
        assert!(matches!(cases.next(), Some(Ok(_))));
        assert!(matches!(cases.next(), Some(Err(FixtureError::Malformed(_)))));
        assert!(cases.next().is_none());
    }

    #[rstest]
    #[case("name", ("name", None))]
    #[case("name {}", ("name", Some("{}")))]
    #[case("a{b}{c}", ("a", Some("{b}{c}")))]
    #[case("{\"x\":1}", ("", Some("{\"x\":1}")))]
    #[case("trailing }", ("trailing }", None))]
    fn splits_headers(#[case] header: &str, #[case] expected: (&str, Option<&str>)) {
        assert_eq!(split_header(header), expected);
    }

    /// Parser double that returns a fixed tree and records its options.
    #[derive(Debug, Default)]
    struct FixedParser {
        tree: Option<MemoryTree>,
        configured: RefCell<Vec<ParserOptions>>,
        fail_parse: bool,
    }

    #[derive(Debug)]
    struct Refused;

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("refused")
        }
    }

    impl std::error::Error for Refused {}

    impl Parser for FixedParser {
        type Tree = MemoryTree;
        type Error = Refused;

        fn configure(&self, options: &ParserOptions) -> Result<Self, Refused> {
            self.configured.borrow_mut().push(options.clone());
            if options.get("refuse").is_some() {
                return Err(Refused);
            }
            Ok(Self {
                tree: self.tree.clone(),
                configured: RefCell::new(Vec::new()),
                fail_parse: options.strict() == Some(true),
            })
        }

        fn parse(&self, _text: &str) -> Result<MemoryTree, Refused> {
            if self.fail_parse {
                return Err(Refused);
            }
            Ok(self.tree.clone().unwrap_or_else(|| MemoryTree::anonymous(vec![])))
        }
    }

    fn expr_number() -> FixedParser {
        FixedParser {
            tree: Some(MemoryTree::node("Expr", vec![MemoryTree::leaf("Number")])),
            ..Default::default()
        }
    }

    #[test]
    fn run_passes_on_matching_tree() {
        let parser = expr_number();
        let case = single("# number\n1\n==>\nExpr(\n  Number\n)");

        case.run(&parser).unwrap();
        assert_eq!(
            parser.configured.borrow().as_slice(),
            &[ParserOptions::new().with("strict", false)]
        );
    }

    #[test]
    fn run_reports_mismatch() {
        let parser = expr_number();
        let case = single("# string\n\"s\"\n==>\nExpr(String)");

        let err = case.run(&parser).unwrap_err();
        let mismatch = err.as_mismatch().unwrap();
        assert_eq!(mismatch.expected, "Expr(String)");
        assert_eq!(mismatch.actual, "Expr(Number)");
        assert_eq!(mismatch.index, 5);
    }

    #[test]
    fn run_merges_case_config_over_non_strict_default() {
        let parser = expr_number();
        let case = single("# strict{\"strict\": true, \"dialect\": \"x\"}\n1\n==>\nExpr(Number)");

        let err = case.run(&parser).unwrap_err();
        assert!(matches!(err, RunError::Parse(_)));
        assert_eq!(
            parser.configured.borrow().as_slice(),
            &[ParserOptions::new()
                .with("strict", true)
                .with("dialect", "x")]
        );
    }

    #[test]
    fn run_surfaces_configure_errors() {
        let parser = expr_number();
        let case = single("# refuse{\"refuse\": 1}\n1\n==>\nExpr(Number)");

        let err = case.run(&parser).unwrap_err();
        assert!(matches!(err, RunError::Configure(_)));
        let source: &BoxError = match &err {
            RunError::Configure(source) => source,
            _ => unreachable!(),
        };
        assert_eq!(source.to_string(), "refused");
    }
}
