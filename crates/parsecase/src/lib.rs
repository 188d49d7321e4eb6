//! # parsecase
//!
//! Test harness utilities for parser test corpora: split fixture files into
//! cases, render parse trees in a compact canonical form, and compare the
//! rendering against the expected tree with a caret pointing at the first
//! difference.
//!
//! ## Pipeline
//!
//! ```text
//! fixture text ──► file_tests ──► Case { name, config, input, expected }
//!                                   │
//!                         Case::run(&parser)
//!                                   │
//!          parser.configure(options) ─► parse(input) ─► tree_to_string
//!                                                           │
//!                    normalize_expected(expected) ──► compare ──► Ok / RunError
//! ```
//!
//! The parser under test is anything implementing [`Parser`]; its trees only
//! need to implement [`Tree`], which every [`rowan::SyntaxNode`] does once its
//! kind implements [`NodeType`].
//!
//! ## Quick Start
//!
//! ```
//! use parsecase::{MemoryTree, file_tests, tree_to_string};
//!
//! let cases = file_tests("# one\n1\n==>\nExpr(Number)\n", "example.txt").unwrap();
//! assert_eq!(cases[0].name(), "one");
//!
//! let tree = MemoryTree::node("Expr", vec![MemoryTree::leaf("Number")]);
//! assert_eq!(tree_to_string(&tree), "Expr(Number)");
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! parsecase/
//! ├── lib.rs        # This file - Parser contract and re-exports
//! ├── tree.rs       # Tree / Visitor / NodeType traits, rowan + in-memory trees
//! ├── serialize.rs  # TreeWriter and tree_to_string
//! ├── normalize.rs  # Folding multi-line expected trees
//! ├── compare.rs    # Divergence index and mismatch errors
//! ├── fixture.rs    # Fixture file scanner and Case
//! ├── options.rs    # ParserOptions
//! └── error.rs      # Error types
//! ```

pub mod compare;
pub mod error;
pub mod fixture;
pub mod normalize;
pub mod options;
pub mod serialize;
pub mod tree;

pub use compare::{compare, diff_index};
pub use error::{BoxError, CaseMismatchError, FixtureError, MalformedFixtureError, RunError};
pub use fixture::{Case, Cases, file_tests};
pub use normalize::normalize_expected;
pub use options::ParserOptions;
pub use serialize::{TreeWriter, tree_to_string};
pub use tree::{MemoryTree, MemoryType, NodeType, Tree, Visitor};

/// A parser under test.
///
/// Implementations are expected to be cheap to reconfigure: every case run
/// calls [`configure`](Parser::configure) once.
pub trait Parser: Sized {
    type Tree: Tree;
    type Error: std::error::Error + Send + Sync + 'static;

    /// A parser with `options` merged over this parser's configuration.
    ///
    /// `strict` toggles strict parsing; every other key is grammar-specific.
    fn configure(&self, options: &ParserOptions) -> Result<Self, Self::Error>;

    fn parse(&self, text: &str) -> Result<Self::Tree, Self::Error>;
}
