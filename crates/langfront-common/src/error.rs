use std::fmt;

/// An error raised by the lexer while scanning a character stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The DFA landed in the *default* (non-accepting) state on non-empty
    /// input. Carries the partial lexeme accumulated so far and up to 8
    /// following characters for context.
    InvalidToken { partial_lexeme: String, context: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { partial_lexeme, context } => {
                write!(f, "invalid token: {partial_lexeme}{context}")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// An error raised while parsing a token stream, by either parser driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token cursor was exhausted while a terminal was still expected.
    UnexpectedEndOfStream,
    /// The next token's kind did not match what the grammar expected.
    UnexpectedToken { lexeme: String },
    /// (PEG only) every ordered alternative for a non-terminal failed.
    ExhaustedAlternatives,
    /// The driver finished with a parse tree shape the algorithm cannot
    /// produce under correct operation; this signals a bug in this crate,
    /// not bad caller input.
    InternalTreeShape,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfStream => write!(f, "unexpected end of token stream"),
            Self::UnexpectedToken { lexeme } => write!(f, "unexpected token: {lexeme}"),
            Self::ExhaustedAlternatives => write!(f, "exhausted alternatives"),
            Self::InternalTreeShape => write!(f, "internal parser error: unexpected parse tree shape"),
        }
    }
}

impl std::error::Error for ParseError {}
