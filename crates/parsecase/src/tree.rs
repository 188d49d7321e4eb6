//! # Tree Traversal Contract
//!
//! The harness never looks inside a parse tree directly. It only needs a
//! depth-first walk that reports, for every node, an **enter** event before
//! its children and a **leave** event after them:
//!
//! ```text
//! Expr(BinOp(Number, Plus, Number))
//!
//! enter Expr
//!   enter BinOp
//!     enter Number   leave Number
//!     enter Plus     leave Plus
//!     enter Number   leave Number
//!   leave BinOp
//! leave Expr
//! ```
//!
//! Each event carries the node's type (whose name may be absent for
//! anonymous nodes such as whitespace or punctuation) and its source offset.
//!
//! Two implementations ship with the crate:
//!
//! - any [`rowan::SyntaxNode`] whose language kind implements [`NodeType`];
//!   nodes and tokens both produce events, tokens as leaves
//! - [`MemoryTree`], an owned tree that is convenient to build by hand

use rowan::WalkEvent;

/// The type of a node in a parse tree.
pub trait NodeType {
    /// The node's display name, or `None` for anonymous nodes.
    fn name(&self) -> Option<&str>;
}

/// Receives enter/leave events from [`Tree::iterate`].
pub trait Visitor<T: NodeType + ?Sized> {
    fn enter(&mut self, ty: &T, start: usize);
    fn leave(&mut self, ty: &T, start: usize);
}

/// A parse tree that can be walked depth-first.
pub trait Tree {
    type Type: NodeType;

    /// Walk the whole tree synchronously, calling `enter` before a node's
    /// children and `leave` after them.
    fn iterate(&self, visitor: &mut dyn Visitor<Self::Type>);
}

impl<L> Tree for rowan::SyntaxNode<L>
where
    L: rowan::Language,
    L::Kind: NodeType,
{
    type Type = L::Kind;

    fn iterate(&self, visitor: &mut dyn Visitor<Self::Type>) {
        for event in self.preorder_with_tokens() {
            match event {
                WalkEvent::Enter(element) => {
                    visitor.enter(&element.kind(), element_start(&element))
                }
                WalkEvent::Leave(element) => {
                    visitor.leave(&element.kind(), element_start(&element))
                }
            }
        }
    }
}

fn element_start<L: rowan::Language>(element: &rowan::SyntaxElement<L>) -> usize {
    usize::from(element.text_range().start())
}

/// Node type of a [`MemoryTree`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryType(Option<String>);

impl MemoryType {
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl NodeType for MemoryType {
    fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// An owned, hand-built parse tree.
///
/// ```
/// use parsecase::{MemoryTree, tree_to_string};
///
/// let tree = MemoryTree::node("Expr", vec![
///     MemoryTree::anonymous(vec![MemoryTree::leaf("Number")]),
/// ]);
/// assert_eq!(tree_to_string(&tree), "Expr(Number)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTree {
    ty: MemoryType,
    start: usize,
    children: Vec<MemoryTree>,
}

impl MemoryTree {
    /// A named node with children.
    pub fn node(name: impl Into<String>, children: Vec<MemoryTree>) -> Self {
        Self {
            ty: MemoryType::named(name),
            start: 0,
            children,
        }
    }

    /// A named node without children.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::node(name, Vec::new())
    }

    /// An unnamed node; only its children show up in the serialized form.
    pub fn anonymous(children: Vec<MemoryTree>) -> Self {
        Self {
            ty: MemoryType::anonymous(),
            start: 0,
            children,
        }
    }

    /// Set the source offset reported for this node.
    pub fn at(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn children(&self) -> &[MemoryTree] {
        &self.children
    }

    fn walk(&self, visitor: &mut dyn Visitor<MemoryType>) {
        visitor.enter(&self.ty, self.start);
        for child in &self.children {
            child.walk(visitor);
        }
        visitor.leave(&self.ty, self.start);
    }
}

impl Tree for MemoryTree {
    type Type = MemoryType;

    fn iterate(&self, visitor: &mut dyn Visitor<Self::Type>) {
        self.walk(visitor);
    }
}
