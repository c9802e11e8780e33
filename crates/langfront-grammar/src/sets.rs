use rustc_hash::{FxHashMap, FxHashSet};

use langfront_common::Kind;

/// A set of [`Kind`]s that remembers whether it grew since the last
/// [`ChangeTrackingSet::take_changed`] call.
///
/// Each of the four analysis passes (NULLABLE, FIRST, FOLLOW, and the
/// duplicate-rule check folded into table construction) runs as "visit
/// every rule, repeat until a full pass adds nothing." This type is the
/// shared idiom all of them use to detect that condition without each
/// pass re-deriving its own growth check.
#[derive(Debug, Default)]
pub struct ChangeTrackingSet {
    items: FxHashSet<Kind>,
    changed: bool,
}

impl ChangeTrackingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.items.contains(&kind)
    }

    /// Insert `kind`, marking this set changed if it was not already present.
    /// Returns whether the insert was new.
    pub fn insert(&mut self, kind: Kind) -> bool {
        let inserted = self.items.insert(kind);
        if inserted {
            self.changed = true;
        }
        inserted
    }

    /// Read the changed flag and reset it to `false`.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn iter(&self) -> impl Iterator<Item = Kind> + '_ {
        self.items.iter().copied()
    }

    pub fn into_set(self) -> FxHashSet<Kind> {
        self.items
    }
}

/// A map from [`Kind`] to a set of [`Kind`]s, with the same changed-flag
/// idiom as [`ChangeTrackingSet`]. Backs both FIRST and FOLLOW, each of
/// which maps a non-terminal kind to a set of terminal kinds.
#[derive(Debug, Default)]
pub struct ChangeTrackingMap {
    map: FxHashMap<Kind, FxHashSet<Kind>>,
    changed: bool,
}

impl ChangeTrackingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: Kind) -> Option<&FxHashSet<Kind>> {
        self.map.get(&key)
    }

    /// Insert `value` into the set at `key`, marking this map changed if it
    /// was not already present. Returns whether the insert was new.
    pub fn insert(&mut self, key: Kind, value: Kind) -> bool {
        let inserted = self.map.entry(key).or_default().insert(value);
        if inserted {
            self.changed = true;
        }
        inserted
    }

    /// Union `values` into the set at `key`.
    pub fn union(&mut self, key: Kind, values: impl IntoIterator<Item = Kind>) {
        for v in values {
            self.insert(key, v);
        }
    }

    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn keys(&self) -> Vec<Kind> {
        self.map.keys().copied().collect()
    }

    pub fn into_map(self) -> FxHashMap<Kind, FxHashSet<Kind>> {
        self.map
    }
}
