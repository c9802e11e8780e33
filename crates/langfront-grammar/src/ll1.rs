use std::collections::VecDeque;

use tracing::trace;

use langfront_common::{GrammarRule, GrammarSymbol, Kind, ParseError, ParseTree, Token};

use crate::analyzer::{GrammarAnalyzer, GrammarError};

/// A token-list iterator that supports peeking the front token without
/// consuming it. Pure cursor bookkeeping; it carries no fixpoint state of
/// its own.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn pop(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }
}

/// One frame of the explicit matcher stack.
///
/// `symbol` is the non-terminal this frame is expanding, or `None` for the
/// synthetic root frame that matches `[start, eof]`. `children` accumulates
/// this frame's own subtree as its `remaining` symbols are matched; once
/// `remaining` is empty the frame is complete and its finished node (built
/// from `symbol` and `children`) is appended to the new top-of-stack frame.
struct Matcher {
    symbol: Option<GrammarSymbol>,
    remaining: VecDeque<GrammarSymbol>,
    children: Vec<ParseTree>,
}

/// Given a built [`GrammarAnalyzer`], drives an iterative LL(1) parse.
///
/// The driver walks an explicit matcher stack rather than recursing, so
/// parse depth is bounded only by available heap, not the native call
/// stack.
pub struct LL1Parser {
    table: GrammarAnalyzer,
    start: Kind,
    eof: Kind,
}

impl LL1Parser {
    /// Build the LL(1) table for `rules` and wrap it into a parser for
    /// `start`/`eof`. Fails the same way [`GrammarAnalyzer::analyze`] does.
    pub fn new(rules: &[GrammarRule], start: Kind, eof: Kind) -> Result<Self, GrammarError> {
        let table = GrammarAnalyzer::analyze(rules, start, eof)?;
        Ok(Self { table, start, eof })
    }

    /// Parse `tokens` (which must end in an *eof* token of kind `self.eof`)
    /// into the `start` subtree.
    #[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
    pub fn parse(&self, tokens: &[Token]) -> Result<ParseTree, ParseError> {
        let mut cursor = TokenCursor::new(tokens);

        let mut stack = vec![Matcher {
            symbol: None,
            remaining: VecDeque::from(vec![
                GrammarSymbol::non_terminal(self.start),
                GrammarSymbol::terminal(self.eof),
            ]),
            children: Vec::new(),
        }];

        let mut finished_root: Option<Vec<ParseTree>> = None;

        while let Some(mut m) = stack.pop() {
            let Some(s) = m.remaining.pop_front() else {
                let node = m.symbol.map(|sym| ParseTree {
                    symbol: sym,
                    token: None,
                    children: m.children,
                });
                match (node, stack.last_mut()) {
                    (Some(node), Some(parent)) => parent.children.push(node),
                    (None, _) => finished_root = Some(m.children),
                    (Some(_), None) => return Err(ParseError::InternalTreeShape),
                }
                continue;
            };

            if s.terminal {
                let token = cursor.pop().ok_or(ParseError::UnexpectedEndOfStream)?;
                if token.kind != s.kind {
                    return Err(ParseError::UnexpectedToken {
                        lexeme: token.lexeme.clone(),
                    });
                }
                trace!(kind = s.kind.raw(), lexeme = %token.lexeme, "matched terminal");
                m.children.push(ParseTree::leaf(s, token.clone()));
                stack.push(m);
            } else {
                let lookahead = cursor.peek().ok_or(ParseError::UnexpectedEndOfStream)?;
                let production = self
                    .table
                    .table_entry(s.kind, lookahead.kind)
                    .ok_or_else(|| ParseError::UnexpectedToken {
                        lexeme: lookahead.lexeme.clone(),
                    })?
                    .to_vec();

                trace!(
                    kind = s.kind.raw(),
                    lookahead = lookahead.kind.raw(),
                    "expanding non-terminal"
                );

                stack.push(m);
                stack.push(Matcher {
                    symbol: Some(s),
                    remaining: VecDeque::from(production),
                    children: Vec::new(),
                });
            }
        }

        let root_children = finished_root.ok_or(ParseError::InternalTreeShape)?;
        let [start_child, eof_child] = <[ParseTree; 2]>::try_from(root_children)
            .map_err(|_| ParseError::InternalTreeShape)?;
        if eof_child.symbol.kind != self.eof || start_child.symbol.kind != self.start {
            return Err(ParseError::InternalTreeShape);
        }
        Ok(start_child)
    }
}
