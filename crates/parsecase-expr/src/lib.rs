//! # parsecase-expr
//!
//! A lossless syntax tree for small arithmetic expressions using [Rowan] +
//! [Logos], following the [rust-analyzer] architecture model. It is the
//! grammar the `parsecase` runner tests by default, and the workspace's own
//! fixture corpus is written against it.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree keeps every byte of the input, whitespace and unrecognized
//! characters included. Syntax errors never abort tree construction: they
//! are recorded next to the tree and the offending spot becomes an `ERROR`
//! node (rendered `⚠`).
//!
//! ## Module Structure
//!
//! ```text
//! parsecase-expr/
//! ├── lib.rs           # This file - ExprParser and fixture tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker/Checkpoint, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs          # Root node
//!         └── expressions.rs  # Operators, calls, grouping
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use parsecase::{Parser, ParserOptions, tree_to_string};
//! use parsecase_expr::ExprParser;
//!
//! let parser = ExprParser::default();
//! let tree = parser.parse("1 + 2").unwrap();
//! assert_eq!(tree_to_string(&tree), "Expr(BinOp(Number, Plus, Number))");
//!
//! // Strict parsing rejects syntax errors; lenient parsing keeps them in the tree.
//! assert!(parser.parse("1 +").is_err());
//! let lenient = parser
//!     .configure(&ParserOptions::new().with("strict", false))
//!     .unwrap();
//! let tree = lenient.parse("1 +").unwrap();
//! assert_eq!(tree_to_string(&tree), "Expr(BinOp(Number, Plus, ⚠))");
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

use parsecase::ParserOptions;
use parsecase::options::STRICT;
use serde_json::Value;
use thiserror::Error;

pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{ExprLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Errors from configuring or running an [`ExprParser`].
#[derive(Debug, Error)]
pub enum ExprError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("option `{key}` must be a boolean, got {value}")]
    InvalidOption { key: String, value: Value },
}

/// The expression grammar behind the [`parsecase::Parser`] contract.
///
/// Strict by default: any syntax error fails [`parse`](parsecase::Parser::parse)
/// with the first error found. With `strict` off, the tree is returned with
/// its `⚠` nodes in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprParser {
    strict: bool,
}

impl Default for ExprParser {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ExprParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn with_strict(self, strict: bool) -> Self {
        Self { strict }
    }
}

impl parsecase::Parser for ExprParser {
    type Tree = SyntaxNode;
    type Error = ExprError;

    fn configure(&self, options: &ParserOptions) -> Result<Self, ExprError> {
        let mut configured = *self;
        for (key, value) in options.iter() {
            match (key.as_str(), value) {
                (STRICT, Value::Bool(strict)) => configured.strict = *strict,
                (STRICT, other) => {
                    return Err(ExprError::InvalidOption {
                        key: key.clone(),
                        value: other.clone(),
                    });
                }
                _ => log::trace!("ignoring unknown option `{key}`"),
            }
        }
        Ok(configured)
    }

    fn parse(&self, text: &str) -> Result<SyntaxNode, ExprError> {
        let parse = parse(text);
        if self.strict
            && let Some(error) = parse.errors().first()
        {
            return Err(error.clone().into());
        }
        Ok(parse.into_tree())
    }
}
