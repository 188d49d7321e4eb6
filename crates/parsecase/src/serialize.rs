//! Canonical string form of a parse tree.
//!
//! Only named nodes are rendered. A named node with rendered children
//! becomes `Name(child, child)`, one without becomes a bare `Name`, and
//! anonymous nodes are transparent: their children render as children of the
//! nearest named ancestor.
//!
//! ```text
//! Expr                      Expr(BinOp(Number, Plus, Number))
//! └── BinOp
//!     ├── Number
//!     ├── (whitespace)
//!     ├── Plus
//!     ├── (whitespace)
//!     └── Number
//! ```

use crate::tree::{NodeType, Tree, Visitor};

/// Render `tree` in its canonical parenthesized form.
///
/// A tree without any named node renders as the empty string.
pub fn tree_to_string<T: Tree + ?Sized>(tree: &T) -> String {
    let mut writer = TreeWriter::new();
    tree.iterate(&mut writer);
    writer.finish()
}

/// Accumulates the canonical form while a tree is walked.
///
/// Keeps one flag per open named node (plus one for the top level) telling
/// whether a child has already been written at that level. The flag, not the
/// buffer contents, decides when a `", "` separator is needed.
#[derive(Debug)]
pub struct TreeWriter {
    out: String,
    levels: Vec<bool>,
}

impl TreeWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            levels: vec![false],
        }
    }

    fn open(&mut self, name: &str) {
        if let Some(has_sibling) = self.levels.last_mut() {
            if *has_sibling {
                self.out.push_str(", ");
            }
            *has_sibling = true;
        }
        self.out.push_str(name);
        self.out.push('(');
        self.levels.push(false);
    }

    fn close(&mut self) {
        // The top-level flag is never popped, so an unbalanced leave is a no-op.
        if self.levels.len() == 1 {
            return;
        }
        match self.levels.pop() {
            Some(true) => self.out.push(')'),
            _ => {
                let paren = self.out.pop();
                debug_assert_eq!(paren, Some('('));
            }
        }
    }

    /// The rendered tree.
    ///
    /// Nodes left open by an incomplete walk are closed.
    pub fn finish(mut self) -> String {
        while self.levels.len() > 1 {
            self.close();
        }
        self.out
    }
}

impl Default for TreeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// An empty name counts as anonymous.
fn rendered_name<T: NodeType + ?Sized>(ty: &T) -> Option<&str> {
    ty.name().filter(|name| !name.is_empty())
}

impl<T: NodeType + ?Sized> Visitor<T> for TreeWriter {
    fn enter(&mut self, ty: &T, _start: usize) {
        if let Some(name) = rendered_name(ty) {
            self.open(name);
        }
    }

    fn leave(&mut self, ty: &T, _start: usize) {
        if rendered_name(ty).is_some() {
            self.close();
        }
    }
}
