use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use langfront_common::{Kind, LexError, Token};

use crate::Dfa;

/// Tokenizes a character slice by driving a [`Dfa`] with longest-prefix
/// matching.
///
/// A `Lexer` borrows its `Dfa` and is otherwise just its three sentinel
/// kinds -- it carries no mutable state of its own, so the same `Lexer`
/// can tokenize many independent inputs, including concurrently from
/// multiple threads.
pub struct Lexer<'dfa> {
    dfa: &'dfa Dfa,
    default_kind: Kind,
    eof_kind: Kind,
    ignored: FxHashSet<Kind>,
}

impl<'dfa> Lexer<'dfa> {
    /// Configure a lexer over `dfa` with the given sentinel kinds.
    pub fn new(dfa: &'dfa Dfa, default_kind: Kind, eof_kind: Kind, ignored: FxHashSet<Kind>) -> Self {
        Self {
            dfa,
            default_kind,
            eof_kind,
            ignored,
        }
    }

    /// Scan exactly one token starting at the DFA root, by longest-prefix
    /// match over `chars`. Returns the token and the remaining, unconsumed
    /// suffix.
    fn scan_one<'a>(&self, chars: &'a [char]) -> Result<(Token, &'a [char]), LexError> {
        let mut node = self.dfa.root();
        let mut lexeme = String::new();
        let mut rest = chars;

        while let Some(&c) = rest.first() {
            match self.dfa.matches(node, c) {
                Some(next) => {
                    node = next;
                    lexeme.push(c);
                    rest = &rest[1..];
                }
                None => break,
            }
        }

        let kind = self.dfa.kind(node);
        if kind == self.default_kind {
            if lexeme.is_empty() && rest.is_empty() {
                return Ok((Token::new(self.eof_kind, ""), rest));
            }
            let context: String = rest.iter().take(8).collect();
            debug!(partial_lexeme = %lexeme, "lexer hit default state on non-empty input");
            return Err(LexError::InvalidToken {
                partial_lexeme: lexeme,
                context,
            });
        }

        Ok((Token::new(kind, lexeme), rest))
    }

    /// Tokenize the whole input, dropping tokens whose kind is in the
    /// ignored set. The returned list always ends with an *eof* token.
    #[tracing::instrument(skip_all, fields(input_len = chars.len()))]
    pub fn tokenize(&self, chars: &[char]) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut rest = chars;
        loop {
            let (token, next_rest) = self.scan_one(rest)?;
            rest = next_rest;
            let is_eof = token.kind == self.eof_kind;
            trace!(kind = ?token.kind, lexeme_len = token.lexeme.len(), "scanned token");
            if !self.ignored.contains(&token.kind) {
                tokens.push(token);
            }
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
