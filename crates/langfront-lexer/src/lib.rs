//! DFA-driven, longest-match, non-backtracking lexer.
//!
//! Callers build a [`Dfa`] directly (this crate does not compile regular
//! expressions) and drive it with a [`Lexer`] to turn a `&[char]` into a
//! `Vec<Token>` terminated by an *eof* token.

mod dfa;
mod lexer;

pub use dfa::{Dfa, NodeId};
pub use lexer::Lexer;
