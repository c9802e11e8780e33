//! Recursive-descent parsing-expression-grammar driver.
//!
//! Unlike [the LL(1) driver](https://docs.rs/langfront-grammar), a `PegParser`
//! performs no analysis and therefore no validation up front: the rule list
//! is interpreted directly as ordered alternatives, tried in declared order,
//! with backtracking on failure. No memoization is performed, so a
//! pathological grammar (e.g. one with left recursion) can fail to
//! terminate; that is a property of the grammar the caller supplied, not a
//! bug in this driver.

use rustc_hash::FxHashMap;
use tracing::trace;

use langfront_common::{GrammarRule, GrammarSymbol, Kind, ParseError, ParseTree, Token};

/// A recursive-descent PEG parser built from a rule list.
///
/// Productions sharing a left-hand side form that non-terminal's ordered
/// choice, in the order they appeared in the input rule list.
pub struct PegParser {
    productions: FxHashMap<Kind, Vec<Vec<GrammarSymbol>>>,
    start: Kind,
    eof: Kind,
}

impl PegParser {
    /// Group `rules` by left-hand side, preserving declaration order within
    /// each non-terminal's alternatives. No validation is performed: a
    /// non-terminal with zero productions simply has an empty choice set
    /// (every attempt to expand it fails).
    pub fn new(rules: &[GrammarRule], start: Kind, eof: Kind) -> Self {
        let mut productions: FxHashMap<Kind, Vec<Vec<GrammarSymbol>>> = FxHashMap::default();
        for rule in rules {
            productions.entry(rule.lhs).or_default().push(rule.rhs.clone());
        }
        Self { productions, start, eof }
    }

    /// Parse `tokens` into the `start` subtree, trying alternatives in
    /// declared order and backtracking on failure.
    #[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
    pub fn parse(&self, tokens: &[Token]) -> Result<ParseTree, ParseError> {
        let mut root = ParseTree::interior(GrammarSymbol::non_terminal(self.start));
        let seq = [
            GrammarSymbol::non_terminal(self.start),
            GrammarSymbol::terminal(self.eof),
        ];
        let end = self
            .match_sequence(&seq, tokens, 0, &mut root)
            .ok_or(ParseError::ExhaustedAlternatives)?;
        let _ = end;

        let [start_child, eof_child] = <[ParseTree; 2]>::try_from(root.children)
            .map_err(|_| ParseError::InternalTreeShape)?;
        if eof_child.symbol.kind != self.eof || start_child.symbol.kind != self.start {
            return Err(ParseError::InternalTreeShape);
        }
        Ok(start_child)
    }

    /// Match `seq` against `tokens[pos..]`, attaching matched children to
    /// `parent`. Returns the token position immediately after the match on
    /// success, or `None` on failure -- in which case `parent`'s children
    /// are left exactly as they were on entry.
    fn match_sequence(
        &self,
        seq: &[GrammarSymbol],
        tokens: &[Token],
        pos: usize,
        parent: &mut ParseTree,
    ) -> Option<usize> {
        let Some((s, rest)) = seq.split_first() else {
            return Some(pos);
        };
        let s = *s;

        if s.terminal {
            let tok = tokens.get(pos)?;
            if tok.kind != s.kind {
                return None;
            }
            parent.push_child(ParseTree::leaf(s, tok.clone()));
            let after = self.match_sequence(rest, tokens, pos + 1, parent);
            if after.is_none() {
                parent.pop_child();
            }
            after
        } else {
            let empty: Vec<Vec<GrammarSymbol>> = Vec::new();
            let alternatives = self.productions.get(&s.kind).unwrap_or(&empty);
            for (choice_index, production) in alternatives.iter().enumerate() {
                // Each alternative is attempted against a detached child
                // node; it is only spliced into `parent` once both the
                // production itself and the remainder of `seq` succeed.
                let mut child = ParseTree::interior(s);
                let Some(mid) = self.match_sequence(production, tokens, pos, &mut child) else {
                    trace!(kind = s.kind.raw(), choice_index, "alternative failed");
                    continue;
                };
                parent.push_child(child);
                match self.match_sequence(rest, tokens, mid, parent) {
                    Some(final_pos) => return Some(final_pos),
                    None => {
                        parent.pop_child();
                    }
                }
            }
            None
        }
    }
}
