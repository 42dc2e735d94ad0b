//! Syntax node kinds.

use std::fmt;

/// The kind of a syntax node.
///
/// The analyzer only inspects the call-expression shapes below; anything
/// else a host models can be wrapped in [`SyntaxKind::Group`] or emitted
/// as raw [`SyntaxKind::Token`] leaves and will be carried through edits
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of a parsed source file.
    SourceFile,
    /// A generic interior node the analyzer does not inspect.
    Group,
    /// Invocation of a callee with an argument list.
    ///
    /// Children: callee expression, [`SyntaxKind::ArgumentList`].
    Invocation,
    /// Access of a named member on a receiver expression.
    ///
    /// Children: receiver expression, `.` token, [`SyntaxKind::Identifier`].
    MemberAccess,
    /// Parenthesized, comma-separated argument list.
    ///
    /// Children: `(` token, [`SyntaxKind::Argument`] nodes interleaved
    /// with `,` tokens, `)` token.
    ArgumentList,
    /// A single argument.
    ///
    /// Children: one expression.
    Argument,
    /// An identifier leaf. The token text is the identifier's value.
    Identifier,
    /// Any other leaf: punctuation, keywords, literals, raw source.
    Token,
}

impl SyntaxKind {
    /// Whether nodes of this kind are leaves (carry text, no children).
    pub fn is_leaf(&self) -> bool {
        matches!(self, SyntaxKind::Identifier | SyntaxKind::Token)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The variant names are the canonical kind names.
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_kinds() {
        assert!(SyntaxKind::Identifier.is_leaf());
        assert!(SyntaxKind::Token.is_leaf());
        assert!(!SyntaxKind::Invocation.is_leaf());
        assert!(!SyntaxKind::Group.is_leaf());
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(SyntaxKind::MemberAccess.to_string(), "MemberAccess");
    }
}
