use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use langfront_common::{GrammarRule, GrammarSymbol, Kind};

use crate::sets::{ChangeTrackingMap, ChangeTrackingSet};

/// An error raised while building the LL(1) parse table from a rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A non-terminal appears on some rule's right-hand side but has no
    /// production of its own.
    UndefinedNonterminal(Kind),
    /// Two productions of the same non-terminal compete for the same
    /// `(non-terminal, lookahead)` table cell. Carries the index (in
    /// declared order) of the second, conflicting rule.
    NotLL1DuplicateRule(usize),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedNonterminal(kind) => {
                write!(f, "non-terminal lacks production rule: {}", kind.raw())
            }
            Self::NotLL1DuplicateRule(index) => {
                write!(f, "grammar is not LL(1): duplicate rule {index}")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// NULLABLE, FIRST, FOLLOW, and the LL(1) parse table derived from a rule
/// list, plus the `start`/`eof` symbols the table was built against.
///
/// All four are computed once, at construction, by monotonic fixpoint
/// iteration; afterwards a `GrammarAnalyzer` is a read-only lookup table
/// safe to share across threads.
pub struct GrammarAnalyzer {
    nullable: FxHashSet<Kind>,
    first: FxHashMap<Kind, FxHashSet<Kind>>,
    follow: FxHashMap<Kind, FxHashSet<Kind>>,
    table: FxHashMap<(Kind, Kind), Vec<GrammarSymbol>>,
}

impl GrammarAnalyzer {
    /// Validate `rules` and compute NULLABLE/FIRST/FOLLOW and the LL(1)
    /// table for the grammar rooted at `start`, with `eof` as the
    /// end-of-input terminal.
    #[tracing::instrument(skip_all, fields(rule_count = rules.len()))]
    pub fn analyze(rules: &[GrammarRule], start: Kind, eof: Kind) -> Result<Self, GrammarError> {
        let defined: FxHashSet<Kind> = rules.iter().map(|r| r.lhs).collect();
        for rule in rules {
            for sym in &rule.rhs {
                if !sym.terminal && !defined.contains(&sym.kind) {
                    return Err(GrammarError::UndefinedNonterminal(sym.kind));
                }
            }
        }

        let nullable = compute_nullable(rules);
        let first = compute_first(rules, &nullable);
        let follow = compute_follow(rules, &nullable, &first, start, eof);
        let table = compute_table(rules, &nullable, &first, &follow)?;

        Ok(Self {
            nullable,
            first,
            follow,
            table,
        })
    }

    pub fn is_nullable(&self, kind: Kind) -> bool {
        self.nullable.contains(&kind)
    }

    pub fn first(&self, non_terminal: Kind) -> Option<&FxHashSet<Kind>> {
        self.first.get(&non_terminal)
    }

    pub fn follow(&self, non_terminal: Kind) -> Option<&FxHashSet<Kind>> {
        self.follow.get(&non_terminal)
    }

    /// Look up the production to use for `non_terminal` under lookahead
    /// `terminal`. Absence means a parse error at this cell.
    pub fn table_entry(&self, non_terminal: Kind, terminal: Kind) -> Option<&[GrammarSymbol]> {
        self.table.get(&(non_terminal, terminal)).map(|v| v.as_slice())
    }
}

/// Whether sequence `seq` is nullable: every symbol in it is a nullable
/// non-terminal, or the sequence is empty.
fn sequence_is_nullable(seq: &[GrammarSymbol], nullable: &FxHashSet<Kind>) -> bool {
    seq.iter().all(|s| !s.terminal && nullable.contains(&s.kind))
}

fn compute_nullable(rules: &[GrammarRule]) -> FxHashSet<Kind> {
    let mut nullable = ChangeTrackingSet::new();
    let mut passes = 0u32;
    loop {
        passes += 1;
        let snapshot: FxHashSet<Kind> = nullable.iter().collect();
        for rule in rules {
            if sequence_is_nullable(&rule.rhs, &snapshot) {
                nullable.insert(rule.lhs);
            }
        }
        if !nullable.take_changed() {
            break;
        }
    }
    debug!(passes, "nullable fixpoint converged");
    nullable.into_set()
}

/// FIRST of a sequence, given the FIRST map computed so far and the final
/// NULLABLE set.
fn first_of_sequence(
    seq: &[GrammarSymbol],
    first: &FxHashMap<Kind, FxHashSet<Kind>>,
    nullable: &FxHashSet<Kind>,
) -> FxHashSet<Kind> {
    let mut acc = FxHashSet::default();
    for sym in seq {
        if sym.terminal {
            acc.insert(sym.kind);
            break;
        }
        if let Some(set) = first.get(&sym.kind) {
            acc.extend(set.iter().copied());
        }
        if !nullable.contains(&sym.kind) {
            break;
        }
    }
    acc
}

fn compute_first(rules: &[GrammarRule], nullable: &FxHashSet<Kind>) -> FxHashMap<Kind, FxHashSet<Kind>> {
    let mut first = ChangeTrackingMap::new();
    let mut passes = 0u32;
    loop {
        passes += 1;
        let snapshot = map_snapshot(&first);
        for rule in rules {
            let seq_first = first_of_sequence(&rule.rhs, &snapshot, nullable);
            first.union(rule.lhs, seq_first);
        }
        if !first.take_changed() {
            break;
        }
    }
    debug!(passes, "first fixpoint converged");
    first.into_map()
}

/// `first_of_sequence`/`follow_snapshot_for` only read the map, so a
/// cheap per-pass snapshot keeps the borrow checker happy without
/// needing interior mutability on `ChangeTrackingMap`.
fn map_snapshot(map: &ChangeTrackingMap) -> FxHashMap<Kind, FxHashSet<Kind>> {
    map.keys()
        .into_iter()
        .filter_map(|k| map.get(k).map(|set| (k, set.clone())))
        .collect()
}

fn compute_follow(
    rules: &[GrammarRule],
    nullable: &FxHashSet<Kind>,
    first: &FxHashMap<Kind, FxHashSet<Kind>>,
    start: Kind,
    eof: Kind,
) -> FxHashMap<Kind, FxHashSet<Kind>> {
    let mut follow = ChangeTrackingMap::new();
    follow.insert(start, eof);

    let mut passes = 0u32;
    loop {
        passes += 1;
        let snapshot = map_snapshot(&follow);
        for rule in rules {
            for (n, sym) in rule.rhs.iter().enumerate() {
                if sym.terminal {
                    continue;
                }
                let beta = &rule.rhs[n + 1..];
                let beta_first = first_of_sequence(beta, first, nullable);
                follow.union(sym.kind, beta_first);
                if sequence_is_nullable(beta, nullable) {
                    if let Some(follow_of_lhs) = snapshot.get(&rule.lhs) {
                        follow.union(sym.kind, follow_of_lhs.iter().copied());
                    }
                }
            }
        }
        if !follow.take_changed() {
            break;
        }
    }
    debug!(passes, "follow fixpoint converged");
    follow.into_map()
}

fn compute_table(
    rules: &[GrammarRule],
    nullable: &FxHashSet<Kind>,
    first: &FxHashMap<Kind, FxHashSet<Kind>>,
    follow: &FxHashMap<Kind, FxHashSet<Kind>>,
) -> Result<FxHashMap<(Kind, Kind), Vec<GrammarSymbol>>, GrammarError> {
    let mut table: FxHashMap<(Kind, Kind), Vec<GrammarSymbol>> = FxHashMap::default();

    for (index, rule) in rules.iter().enumerate() {
        let seq_first = first_of_sequence(&rule.rhs, first, nullable);
        for terminal in &seq_first {
            set_table_cell(&mut table, rule.lhs, *terminal, &rule.rhs, index)?;
        }
        if sequence_is_nullable(&rule.rhs, nullable) {
            if let Some(follow_set) = follow.get(&rule.lhs) {
                for terminal in follow_set {
                    set_table_cell(&mut table, rule.lhs, *terminal, &rule.rhs, index)?;
                }
            }
        }
    }

    Ok(table)
}

fn set_table_cell(
    table: &mut FxHashMap<(Kind, Kind), Vec<GrammarSymbol>>,
    non_terminal: Kind,
    terminal: Kind,
    rhs: &[GrammarSymbol],
    rule_index: usize,
) -> Result<(), GrammarError> {
    if table.contains_key(&(non_terminal, terminal)) {
        return Err(GrammarError::NotLL1DuplicateRule(rule_index));
    }
    table.insert((non_terminal, terminal), rhs.to_vec());
    Ok(())
}
