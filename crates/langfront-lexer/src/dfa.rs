use rustc_hash::FxHashMap;

use langfront_common::Kind;

/// An index into a [`Dfa`]'s node arena.
///
/// Transitions are non-owning links within the arena: the graph may contain
/// cycles (a whitespace loop transitions back to itself), which a
/// reference-counted-pointer or `Box`-owned tree could not represent
/// without extra machinery. The arena is released in one shot when the
/// owning `Dfa` is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

struct Node {
    kind: Kind,
    transitions: FxHashMap<char, NodeId>,
}

/// A deterministic finite automaton: a trie-shaped transition graph whose
/// nodes each carry an accepting `Kind`.
///
/// Construction mutates the graph via [`Dfa::add_transitions`] and
/// [`Dfa::add_path`]; lexing only ever calls [`Dfa::matches`] and
/// [`Dfa::kind`], so once built a `Dfa` is logically immutable and safe to
/// share across threads (`&Dfa` is `Send + Sync`).
pub struct Dfa {
    nodes: Vec<Node>,
}

impl Dfa {
    /// Create a DFA whose root node carries `kind`.
    ///
    /// `kind` is typically the *default* kind: a root with no outgoing
    /// transitions yet recognizes nothing, so the root should not be
    /// mistaken for an accepting state until real tokens are wired in.
    pub fn new(kind: Kind) -> Self {
        Self {
            nodes: vec![Node {
                kind,
                transitions: FxHashMap::default(),
            }],
        }
    }

    /// The root node, i.e. the lexer's starting state.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Allocate a fresh, unconnected node carrying `kind`.
    ///
    /// Mirrors the source's `NewDfa(kind)`, which can construct any node,
    /// not just the root -- callers wire standalone nodes like a
    /// whitespace-loop state into the graph with [`Dfa::add_transitions`].
    pub fn new_node(&mut self, kind: Kind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            transitions: FxHashMap::default(),
        });
        id
    }

    /// For every character in `chars`, set `from`'s transition on that
    /// character to `target`, overwriting any prior transition.
    pub fn add_transitions(&mut self, from: NodeId, chars: &[char], target: NodeId) {
        for &c in chars {
            self.node_mut(from).transitions.insert(c, target);
        }
    }

    /// Walk from `from` along `path`, creating a fresh node with kind
    /// `default_kind` wherever a transition is missing, and assign `kind`
    /// to the node reached at the end of `path`. Returns that final node.
    ///
    /// An empty `path` assigns `kind` to `from` itself and returns `from`.
    pub fn add_path(&mut self, from: NodeId, path: &[char], kind: Kind, default_kind: Kind) -> NodeId {
        let mut cur = from;
        for &c in path {
            cur = match self.node(cur).transitions.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.new_node(default_kind);
                    self.node_mut(cur).transitions.insert(c, next);
                    next
                }
            };
        }
        self.node_mut(cur).kind = kind;
        cur
    }

    /// Look up `node`'s transition on `ch`. Returns `None` if there is no
    /// outgoing transition for that character.
    pub fn matches(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.node(node).transitions.get(&ch).copied()
    }

    /// The accepting kind carried by `node`.
    pub fn kind(&self, node: NodeId) -> Kind {
        self.node(node).kind
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }
}
