use crate::Kind;

/// Hands out fresh [`Kind`] values from a single counter.
///
/// Exists so callers can declare many token kinds and non-terminal kinds
/// without tracking integers by hand. A generator is a per-caller object:
/// create a fresh one per grammar rather than sharing one process-wide, so
/// that two unrelated grammars built in the same process don't fight over
/// the same counter.
#[derive(Debug, Default)]
pub struct SymbolGenerator {
    next: u32,
}

impl SymbolGenerator {
    /// Create a generator whose first `next()` call returns `Kind(0)`.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next fresh `Kind`, advancing the counter.
    pub fn next(&mut self) -> Kind {
        let kind = Kind::new(self.next);
        self.next += 1;
        kind
    }
}
