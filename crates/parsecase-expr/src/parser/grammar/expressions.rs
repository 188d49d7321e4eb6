//! Expression grammar rules.
//!
//! Binary operators use Pratt parsing: each operator has a left and a right
//! binding power, and a loop keeps absorbing operators whose left power is at
//! least the minimum the caller allows.
//!
//! | Operator   | Binding power | Node       |
//! |------------|---------------|------------|
//! | `+` `-`    | (1, 2)        | `BIN_OP`   |
//! | `*` `/`    | (3, 4)        | `BIN_OP`   |
//! | prefix `-` | 5             | `UNARY_OP` |

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

const PREFIX_MINUS_BP: u8 = 5;

/// Parse a complete expression.
pub fn expr(p: &mut Parser<'_, '_>) {
    expr_bp(p, 0);
}

fn expr_bp(p: &mut Parser<'_, '_>, min_bp: u8) {
    let lhs = p.checkpoint();
    operand(p);

    while let Some((left_bp, right_bp)) = infix_binding_power(p.current())
        && left_bp >= min_bp
    {
        let m = lhs.precede(p);
        p.bump();
        expr_bp(p, right_bp);
        m.complete(p, SyntaxKind::BIN_OP);
    }
}

fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    match kind {
        SyntaxKind::PLUS | SyntaxKind::MINUS => Some((1, 2)),
        SyntaxKind::STAR | SyntaxKind::SLASH => Some((3, 4)),
        _ => None,
    }
}

/// Parse one operand: a literal, name, call, group or negation.
fn operand(p: &mut Parser<'_, '_>) {
    match p.current() {
        SyntaxKind::NUMBER | SyntaxKind::STRING => p.bump(),
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::LPAREN => call(p),
        SyntaxKind::IDENT => p.bump(),
        SyntaxKind::LPAREN => paren(p),
        SyntaxKind::MINUS => unary(p),
        SyntaxKind::ERROR_TOKEN => p.err_and_bump("expected expression"),
        // Leave closing tokens and operators for the enclosing rule.
        _ => p.error("expected expression"),
    }
}

fn unary(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    expr_bp(p, PREFIX_MINUS_BP);
    m.complete(p, SyntaxKind::UNARY_OP);
}

fn paren(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    expr_bp(p, 0);
    p.expect(SyntaxKind::RPAREN, "')'");
    m.complete(p, SyntaxKind::PAREN_EXPR);
}

/// `name(arg, arg, ...)`; the argument list may be empty.
fn call(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();

    let args = p.start();
    p.bump();
    if !p.at(SyntaxKind::RPAREN) {
        loop {
            expr_bp(p, 0);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::RPAREN, "')'");
    args.complete(p, SyntaxKind::ARGUMENTS);

    m.complete(p, SyntaxKind::FUNCTION_CALL);
}
