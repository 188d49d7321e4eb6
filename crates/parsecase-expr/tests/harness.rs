use parsecase::{FixtureError, Parser, RunError, file_tests};
use parsecase_expr::ExprParser;
use pretty_assertions::assert_eq;

#[test]
fn simple_add_round_trip() {
    let cases = file_tests(
        "# simple add\n1 + 2\n==>\nExpr(BinOp(Number, Plus, Number))\n",
        "add.txt",
    )
    .unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].name(), "simple add");
    assert!(cases[0].config().is_none());
    cases[0].run(&ExprParser::new()).unwrap();
}

#[test]
fn header_config_reaches_parser() {
    let text = "# strict call {\"strict\": true}\nf(1,\n==>\n\
                Expr(FunctionCall(Identifier, Arguments(Number, ⚠, ⚠)))\n";
    let cases = file_tests(text, "config.txt").unwrap();

    assert_eq!(cases[0].name(), "strict call");
    let error = cases[0].run(&ExprParser::new()).unwrap_err();
    assert!(matches!(error, RunError::Parse(_)), "{error}");
}

#[test]
fn bad_option_fails_configure() {
    let text = "# odd {\"strict\": 1}\n1\n==>\nExpr(Number)\n";
    let cases = file_tests(text, "odd.txt").unwrap();

    let error = cases[0].run(&ExprParser::new()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Failed to configure parser: option `strict` must be a boolean, got 1"
    );
}

#[test]
fn multi_line_expected_is_normalized() {
    let text = "# layout\n1 + 2\n==>\nExpr(\n  BinOp(\n    Number,\n    Plus,\n    Number\n  )\n)\n";
    let cases = file_tests(text, "layout.txt").unwrap();
    cases[0].run(&ExprParser::new()).unwrap();
}

#[test]
fn mismatch_points_at_first_difference() {
    let text = "# wrong\n\"a\"\n==>\nExpr(Number)\n";
    let cases = file_tests(text, "wrong.txt").unwrap();

    let error = cases[0].run(&ExprParser::new()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "\nExpected: Expr(Number)\n               ^\nActual:   Expr(String)"
    );
}

#[test]
fn malformed_fixture_is_fatal() {
    let text = "# good\n1\n==>\nExpr(Number)\n\n# no separator\n2\n";
    let error = file_tests(text, "broken.txt").unwrap_err();

    match error {
        FixtureError::Malformed(malformed) => {
            assert_eq!(malformed.file_name, "broken.txt");
            assert!(malformed.context.starts_with("  | "));
        }
        other => panic!("expected a malformed fixture, got {other}"),
    }
}

#[test]
fn cases_share_one_parser() {
    let text = "# lenient\n1 +\n==>\nExpr(BinOp(Number, Plus, ⚠))\n\n\
                # plain\n1 + 2\n==>\nExpr(BinOp(Number, Plus, Number))\n";
    let parser = ExprParser::new();

    for case in file_tests(text, "shared.txt").unwrap() {
        case.run(&parser).unwrap();
    }
    assert!(parser.is_strict());
    assert!(parser.parse("1 +").is_err());
}
