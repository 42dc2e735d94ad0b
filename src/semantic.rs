//! Type symbols and the type-resolution seam.
//!
//! Semantic classification is delegated to an external resolution
//! service. Rather than capturing an ambient semantic model, the
//! [`TypeResolver`] is passed explicitly into every classification call,
//! keeping the matcher a pure function of its inputs and trivially
//! testable without standing up a full analysis context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mapfix_syntax::{NodeId, SyntaxTree};

/// An interface/contract implemented by a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSymbol {
    /// Simple (non-generic) name of the interface.
    pub name: String,
    /// Number of generic type parameters.
    pub arity: u32,
}

impl InterfaceSymbol {
    /// Create an interface symbol.
    pub fn new(name: impl Into<String>, arity: u32) -> Self {
        InterfaceSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// The resolved semantic type of an expression, as reported by the
/// external resolution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Simple (non-generic) name of the type.
    pub name: String,
    /// Number of generic type parameters.
    pub arity: u32,
    /// All interfaces the type implements, transitively.
    #[serde(default)]
    pub interfaces: Vec<InterfaceSymbol>,
}

impl TypeSymbol {
    /// Create a type symbol with no declared interfaces.
    pub fn new(name: impl Into<String>, arity: u32) -> Self {
        TypeSymbol {
            name: name.into(),
            arity,
            interfaces: Vec::new(),
        }
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, name: impl Into<String>, arity: u32) -> Self {
        self.interfaces.push(InterfaceSymbol::new(name, arity));
        self
    }

    /// Whether the type declares an interface with this exact name and
    /// arity.
    pub fn implements(&self, name: &str, arity: u32) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.name == name && i.arity == arity)
    }
}

/// The external type-resolution service.
///
/// `None` means "unresolvable" — which legitimately occurs for
/// partially-typed or erroneous code — and callers must treat it as a
/// definitive non-match rather than guessing. Implementations must be
/// safe for concurrent read access; classification may run from many
/// threads at once.
pub trait TypeResolver: Sync {
    /// Resolve the semantic type of an expression node.
    fn resolve_type(&self, tree: &SyntaxTree, expr: NodeId) -> Option<TypeSymbol>;
}

/// A name→type table resolver.
///
/// Resolves identifier expressions by their text; everything else is
/// unresolvable. Suitable for hosts with precomputed binding tables and
/// for tests.
#[derive(Debug, Default)]
pub struct StaticTypeResolver {
    bindings: HashMap<String, TypeSymbol>,
}

impl StaticTypeResolver {
    /// Create an empty resolver (everything unresolvable).
    pub fn new() -> Self {
        StaticTypeResolver::default()
    }

    /// Bind an identifier name to a type.
    pub fn with_binding(mut self, name: impl Into<String>, ty: TypeSymbol) -> Self {
        self.bindings.insert(name.into(), ty);
        self
    }

    /// Build a resolver from a precomputed binding table, e.g. one
    /// deserialized from the host's project metadata.
    pub fn from_bindings(bindings: HashMap<String, TypeSymbol>) -> Self {
        StaticTypeResolver { bindings }
    }
}

impl TypeResolver for StaticTypeResolver {
    fn resolve_type(&self, tree: &SyntaxTree, expr: NodeId) -> Option<TypeSymbol> {
        let name = tree.identifier_text(expr)?;
        self.bindings.get(name).cloned()
    }
}
