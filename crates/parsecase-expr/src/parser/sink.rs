//! Sink for converting parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Converts parser events and tokens into a Rowan syntax tree.
pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the syntax tree.
    ///
    /// Tokens no event consumed are appended to the root so the tree keeps
    /// every byte of the input.
    pub fn finish(mut self) -> SyntaxNode {
        let events = std::mem::take(&mut self.events);
        let mut depth = 0usize;

        for event in events {
            match event {
                Event::Start { kind } => {
                    self.builder.start_node(kind.into());
                    depth += 1;
                }
                Event::Token { kind } => self.token(kind),
                Event::Finish => {
                    if depth == 1 {
                        self.flush_remaining();
                    }
                    self.builder.finish_node();
                    depth -= 1;
                }
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&mut self, kind: SyntaxKind) {
        let text = self.tokens[self.cursor].text;
        self.cursor += 1;
        self.builder.token(kind.into(), text);
    }

    fn flush_remaining(&mut self) {
        while self.cursor < self.tokens.len() {
            let kind = self.tokens[self.cursor].kind;
            self.token(kind);
        }
    }
}
