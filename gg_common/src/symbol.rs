//! Typed labels carried by nodes and edges.
//!
//! A [`Symbol`] is a name plus a [`SymbolKind`]. The `Asterisk` kind is the
//! wildcard: it matches any other symbol during pattern search, and rule
//! replacements never let it overwrite a more specific symbol.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The role a [`Symbol`] plays in a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Wildcard; matches any symbol.
    #[default]
    Asterisk,
    /// A node symbol the grammar still has rules for.
    NonTerminal,
    /// A node symbol no rule rewrites further.
    Terminal,
    /// An edge symbol.
    Edge,
}

/// Error returned when a symbol kind cannot be parsed from a string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized symbol kind: {0:?}")]
pub struct SymbolKindParseError(pub String);

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Asterisk => "Asterisk",
            SymbolKind::NonTerminal => "Non Terminal",
            SymbolKind::Terminal => "Terminal",
            SymbolKind::Edge => "Edge",
        };
        f.write_str(s)
    }
}

impl FromStr for SymbolKind {
    type Err = SymbolKindParseError;

    // Lenient on purpose: editor payloads spell these several ways.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower.contains("non") {
            Ok(SymbolKind::NonTerminal)
        } else if lower.contains("terminal") {
            Ok(SymbolKind::Terminal)
        } else if lower.contains("edge") {
            Ok(SymbolKind::Edge)
        } else if lower.contains('*') || lower.contains("asterisk") || lower.is_empty() {
            Ok(SymbolKind::Asterisk)
        } else {
            Err(SymbolKindParseError(s.to_string()))
        }
    }
}

/// A typed label attached to a node or an edge.
///
/// Equality is structural over name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Display name; `"*"` for the wildcard.
    pub name: String,
    /// The symbol's grammar role.
    pub kind: SymbolKind,
}

impl Default for Symbol {
    fn default() -> Self {
        Self::asterisk()
    }
}

impl Symbol {
    /// The wildcard symbol.
    pub fn asterisk() -> Self {
        Symbol {
            name: "*".to_string(),
            kind: SymbolKind::Asterisk,
        }
    }

    /// A terminal node symbol.
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Terminal,
        }
    }

    /// A non-terminal node symbol.
    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    /// An edge symbol.
    pub fn edge(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Edge,
        }
    }

    /// Whether this symbol is the wildcard.
    pub fn is_asterisk(&self) -> bool {
        self.kind == SymbolKind::Asterisk
    }

    /// Two symbols are equivalent if either is the wildcard or they are
    /// structurally equal.
    pub fn are_equivalent(a: &Symbol, b: &Symbol) -> bool {
        a.is_asterisk() || b.is_asterisk() || a == b
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Symbol::terminal("k"))]
    #[case(Symbol::non_terminal("S"))]
    #[case(Symbol::edge("door"))]
    #[case(Symbol::asterisk())]
    fn wildcard_absorbs_everything(#[case] s: Symbol) {
        assert!(Symbol::are_equivalent(&Symbol::asterisk(), &s));
        assert!(Symbol::are_equivalent(&s, &Symbol::asterisk()));
    }

    #[rstest]
    #[case(Symbol::terminal("k"))]
    #[case(Symbol::non_terminal("S"))]
    #[case(Symbol::edge("door"))]
    fn equivalence_is_reflexive(#[case] s: Symbol) {
        assert!(Symbol::are_equivalent(&s, &s));
    }

    #[test]
    fn same_name_different_kind_is_not_equivalent() {
        let t = Symbol::terminal("a");
        let nt = Symbol::non_terminal("a");
        assert!(!Symbol::are_equivalent(&t, &nt));
    }

    #[test]
    fn kind_parses_leniently() {
        assert_eq!("Non Terminal".parse(), Ok(SymbolKind::NonTerminal));
        assert_eq!("nonterminal".parse(), Ok(SymbolKind::NonTerminal));
        assert_eq!("Terminal".parse(), Ok(SymbolKind::Terminal));
        assert_eq!("edge".parse(), Ok(SymbolKind::Edge));
        assert_eq!("*".parse(), Ok(SymbolKind::Asterisk));
        assert!("frobnicate".parse::<SymbolKind>().is_err());
    }

    #[test]
    fn kind_display_roundtrips() {
        for kind in [
            SymbolKind::Asterisk,
            SymbolKind::NonTerminal,
            SymbolKind::Terminal,
            SymbolKind::Edge,
        ] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }
}
