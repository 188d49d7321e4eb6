//! SyntaxKind enum for all tokens and nodes in the expression CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

use parsecase::NodeType;

/// All syntax kinds for the expression CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Spaces, tabs and line breaks
    WHITESPACE,
    /// Integer or decimal literal
    NUMBER,
    /// Identifier (`max`, `x_1`)
    IDENT,
    /// Double-quoted string literal
    STRING,
    /// `+`
    PLUS,
    /// `-`
    MINUS,
    /// `*`
    STAR,
    /// `/`
    SLASH,
    /// `(`
    LPAREN,
    /// `)`
    RPAREN,
    /// `,`
    COMMA,
    /// Character the lexer does not recognize
    ERROR_TOKEN,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root node, wraps the expression and any trailing trivia
    ROOT,
    /// The top-level expression
    EXPR,
    /// Binary operation (`1 + 2`)
    BIN_OP,
    /// Prefix operation (`-x`)
    UNARY_OP,
    /// Parenthesized expression
    PAREN_EXPR,
    /// Function call (`max(1, 2)`)
    FUNCTION_CALL,
    /// Argument list of a function call
    ARGUMENTS,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Name used when the tree is rendered for fixture comparison.
    ///
    /// Trivia, punctuation and the root are anonymous.
    pub fn display_name(self) -> Option<&'static str> {
        let name = match self {
            Self::NUMBER => "Number",
            Self::IDENT => "Identifier",
            Self::STRING => "String",
            Self::PLUS => "Plus",
            Self::MINUS => "Minus",
            Self::STAR => "Times",
            Self::SLASH => "Divide",
            Self::EXPR => "Expr",
            Self::BIN_OP => "BinOp",
            Self::UNARY_OP => "UnaryOp",
            Self::PAREN_EXPR => "ParenExpr",
            Self::FUNCTION_CALL => "FunctionCall",
            Self::ARGUMENTS => "Arguments",
            Self::ERROR => "⚠",
            Self::WHITESPACE
            | Self::LPAREN
            | Self::RPAREN
            | Self::COMMA
            | Self::ERROR_TOKEN
            | Self::EOF
            | Self::ROOT => return None,
        };
        Some(name)
    }
}

impl NodeType for SyntaxKind {
    fn name(&self) -> Option<&str> {
        self.display_name()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExprLang {}

impl rowan::Language for ExprLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<ExprLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<ExprLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<ExprLang>;
