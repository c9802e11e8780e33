use serde::Serialize;

use crate::Kind;

/// A single symbol on the right-hand side of a grammar rule: either a
/// terminal (matches a token kind directly) or a non-terminal (expands via
/// further rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GrammarSymbol {
    pub terminal: bool,
    pub kind: Kind,
}

impl GrammarSymbol {
    /// Build a terminal symbol matching token kind `kind`.
    pub fn terminal(kind: Kind) -> Self {
        Self {
            terminal: true,
            kind,
        }
    }

    /// Build a non-terminal symbol for non-terminal kind `kind`.
    pub fn non_terminal(kind: Kind) -> Self {
        Self {
            terminal: false,
            kind,
        }
    }
}

/// A production `lhs -> rhs`. `lhs` is always a non-terminal kind; an empty
/// `rhs` denotes an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarRule {
    pub lhs: Kind,
    pub rhs: Vec<GrammarSymbol>,
}

impl GrammarRule {
    /// Build a rule `lhs -> rhs`.
    pub fn new(lhs: Kind, rhs: Vec<GrammarSymbol>) -> Self {
        Self { lhs, rhs }
    }

    /// Whether this rule's right-hand side is empty (an epsilon production).
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_and_non_terminal_constructors() {
        let t = GrammarSymbol::terminal(Kind::new(1));
        assert!(t.terminal);
        assert_eq!(t.kind, Kind::new(1));

        let n = GrammarSymbol::non_terminal(Kind::new(2));
        assert!(!n.terminal);
        assert_eq!(n.kind, Kind::new(2));
    }

    #[test]
    fn epsilon_rule_has_empty_rhs() {
        let rule = GrammarRule::new(Kind::new(0), vec![]);
        assert!(rule.is_epsilon());

        let rule = GrammarRule::new(Kind::new(0), vec![GrammarSymbol::terminal(Kind::new(1))]);
        assert!(!rule.is_epsilon());
    }
}
