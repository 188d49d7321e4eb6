//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree building.
//! Instead of building the tree directly, the parser emits a **flat sequence**
//! of events that describe the tree structure:
//!
//! ```text
//! Start(EXPR)
//!   Start(BIN_OP)
//!     Token(NUMBER)
//!     Token(WHITESPACE)
//!     Token(PLUS)
//!     Token(WHITESPACE)
//!     Token(NUMBER)
//!   Finish
//! Finish
//! ```
//!
//! The Sink processes these in order, maintaining a stack of open nodes.
//! Start pushes, Finish pops.
//!
//! Binary operations are only recognized after their left operand has been
//! parsed. Their `Start` is inserted back at a
//! [`Checkpoint`](super::Checkpoint) taken before the operand, so the event
//! list is always in tree order by the time the Sink sees it.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add the next lexer token to the current node.
    Token { kind: SyntaxKind },

    /// Finish the current node.
    Finish,

    /// A placeholder that will be replaced.
    ///
    /// `parser.start()` pushes one; `marker.complete()` turns it into a
    /// `Start`, and an abandoned marker leaves it for the Sink to ignore.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}
