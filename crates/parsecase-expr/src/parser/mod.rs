//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the **event-based**
//! architecture from rust-analyzer: grammar functions emit a flat list of
//! [`Event`]s and the [`Sink`] builds the Rowan tree from them.
//!
//! ## Trivia
//!
//! Grammar functions never see whitespace. [`Parser::current`] and
//! [`Parser::nth`] look past it, and [`Parser::bump`] emits any pending
//! whitespace tokens right before the token it consumes, so trivia ends up
//! inside whichever node is open at that point.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that **must** be either completed
//! with `marker.complete(parser, KIND)` or abandoned with
//! `marker.abandon(parser)`. Dropping it otherwise panics.
//!
//! ## Checkpoints
//!
//! A binary operation is only known to exist once its operator shows up,
//! after the left operand was parsed. [`Parser::checkpoint`] remembers the
//! position before the operand and [`Checkpoint::precede`] opens a node
//! there later:
//!
//! ```ignore
//! let lhs = p.checkpoint();
//! atom(p);                               // "1"
//! if p.at(SyntaxKind::PLUS) {
//!     let m = lhs.precede(p);            // node starts before "1"
//!     p.bump();                          // "+"
//!     atom(p);                           // "2"
//!     m.complete(p, SyntaxKind::BIN_OP);
//! }
//! ```
//!
//! Preceding inserts a placeholder into the event list. Markers that are
//! still open were all started before the checkpoint, so their positions
//! stay valid.

pub mod event;
pub mod sink;

mod grammar;

use thiserror::Error;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// A syntax error found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    /// Byte offset of the offending token.
    pub offset: usize,
    pub message: String,
}

/// Result of parsing: a tree that covers the whole input, plus the errors
/// that were recovered from while building it.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    pub fn into_tree(self) -> SyntaxNode {
        self.tree
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The parser state machine.
///
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`, `expect()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
/// - Report problems: `error()`, `err_and_bump()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let tree = Sink::new(self.tokens, self.events).finish();
        Parse {
            tree,
            errors: self.errors,
        }
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Remember the current position so a node can be opened there later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.events.len(),
        }
    }

    /// Current significant token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n significant tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if only trivia is left.
    pub fn at_end(&self) -> bool {
        self.current() == SyntaxKind::EOF
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token, or record an error if it does not match.
    pub fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {what}"));
        false
    }

    /// Consume pending trivia and the current token.
    pub fn bump(&mut self) {
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.events.push(Event::token(token.kind));
            self.pos += 1;
        }
    }

    /// Consume whitespace up to the next significant token.
    pub fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.events.push(Event::token(token.kind));
            self.pos += 1;
        }
    }

    /// Record an error and leave an empty ERROR node for the missing piece.
    pub fn error(&mut self, message: impl Into<String>) {
        self.record_error(message.into());
        let m = self.start();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Record an error and wrap the current token in an ERROR node.
    pub fn err_and_bump(&mut self, message: impl Into<String>) {
        self.record_error(message.into());
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::ERROR);
    }

    fn record_error(&mut self, message: String) {
        let offset = self.current_offset();
        log::trace!("syntax error at {offset}: {message}");
        self.errors.push(SyntaxError { offset, message });
    }

    /// Byte offset of the current significant token.
    fn current_offset(&self) -> usize {
        let skipped = self.tokens[self.pos..]
            .iter()
            .take_while(|t| t.kind.is_trivia())
            .count();
        self.tokens[..self.pos + skipped]
            .iter()
            .map(|t| t.text.len())
            .sum()
    }
}

/// A marker for a node being constructed.
///
/// Must be completed or abandoned; dropping it otherwise panics.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Removes the placeholder if nothing was pushed after it, otherwise
    /// leaves it for the Sink to ignore.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A position in the event list where a node may be opened later.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
}

impl Checkpoint {
    /// Open a node at this checkpoint; everything emitted since becomes its
    /// first children.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        p.events.insert(self.pos, Event::Placeholder);
        Marker {
            pos: self.pos,
            completed: false,
        }
    }
}

/// Parse expression source into a syntax tree, recovering from errors.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
