use serde::Serialize;

/// An opaque integer identifier for a token kind or a grammar symbol kind.
///
/// Callers assign `Kind` values however they like -- by hand, or through a
/// [`crate::SymbolGenerator`]. Token kinds and non-terminal kinds share this
/// same integer domain; [`crate::GrammarSymbol`] carries the bit that tells
/// the two apart, not `Kind` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Kind(pub u32);

impl Kind {
    /// Wrap a raw integer as a `Kind`.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The wrapped integer value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for Kind {
    fn from(raw: u32) -> Self {
        Kind(raw)
    }
}
