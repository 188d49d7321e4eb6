//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.expect()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`,
//!    or `p.checkpoint()` → `precede()` for left-recursive rules)
//!
//! ## Module Structure
//!
//! - [`expressions`] - Operators, atoms, calls and grouping
//!
//! ## Error Recovery
//!
//! Grammar functions never bail out. A missing expression becomes an empty
//! ERROR node, an unexpected token is wrapped in one, and parsing carries on
//! so the tree always covers the whole input. Whether recovered errors are
//! acceptable is decided by the caller, not the grammar.

mod expressions;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root node.
///
/// ROOT holds a single EXPR, followed by an ERROR node for every token left
/// over once the expression is complete.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.eat_trivia();

    let expr = p.start();
    expressions::expr(p);
    expr.complete(p, SyntaxKind::EXPR);

    while !p.at_end() {
        p.err_and_bump("unexpected token");
    }
    p.eat_trivia();

    m.complete(p, SyntaxKind::ROOT);
}
