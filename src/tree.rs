//! The persistent per-monitor BSP tree ("btrtile").
//!
//! Nodes live in an arena: each node is addressed by a stable [`NodeId`]
//! rather than a pointer, so in-place conversion of a client leaf into a
//! split node (insertion) and sibling-lifting (removal) never need to
//! touch a parent's child pointer — only the arena slot's contents change.
use crate::host::Handle;
use std::collections::HashMap;

/// A stable index into a [`BspTree`]'s arena. `NodeId`s are only ever
/// handed out by [`BspTree`] itself and are invalidated when the node they
/// refer to is freed (by [`remove_client`][BspTree::remove_client] lifting
/// it away, or by tearing down the whole tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The two variants a tree node can be, stored as one record so that
/// insertion can repurpose a client leaf's arena slot as a split node
/// without relocating it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeKind<C> {
    /// A leaf holding a single managed client.
    Client(C),
    /// An internal node splitting its area between two children.
    Split {
        /// `true` = left/right children (a vertical divider between
        /// them); `false` = top/bottom children (a horizontal divider).
        vertical: bool,
        /// Fraction of the parent's axis given to `left`, always in
        /// `[min_ratio, max_ratio]`.
        ratio: f32,
        left: NodeId,
        right: NodeId,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<C> {
    pub(crate) kind: NodeKind<C>,
    /// Weak back-reference to the owning split node; `None` at the root.
    /// Only ever read for upward traversal, never mutated to re-parent a
    /// node (ownership still flows from the arena and the root pointer).
    pub(crate) parent: Option<NodeId>,
}

/// A persistent binary space-partitioning tree for one monitor.
///
/// `C` is the host's opaque client handle type. A fresh `BspTree` has no
/// root; the first [`insert_client`][BspTree::insert_client] call creates
/// one.
#[derive(Debug, Clone)]
pub struct BspTree<C: Handle> {
    pub(crate) arena: Vec<Option<Node<C>>>,
    pub(crate) free: Vec<NodeId>,
    pub(crate) root: Option<NodeId>,
}

impl<C: Handle> Default for BspTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Handle> BspTree<C> {
    /// Create an empty tree, as happens when a monitor is constructed.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    /// The root node of this tree, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Whether this tree currently has no clients at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<C>> {
        self.arena.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<C>> {
        self.arena.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind<C>, parent: Option<NodeId>) -> NodeId {
        let node = Node { kind, parent };

        if let Some(id) = self.free.pop() {
            self.arena[id.0] = Some(node);
            return id;
        }

        self.arena.push(Some(node));
        NodeId(self.arena.len() - 1)
    }

    /// Free a node's arena slot, making it eligible for reuse. Does not
    /// touch `parent`'s child pointers — callers are responsible for
    /// relinking before calling this (see [`crate::mutate`]).
    pub(crate) fn free(&mut self, id: NodeId) {
        self.arena[id.0] = None;
        self.free.push(id);
    }

    /// The client handle held by a client leaf, or `None` if `id` is a
    /// split node or does not resolve.
    pub fn client_at(&self, id: NodeId) -> Option<C> {
        match self.node(id)?.kind {
            NodeKind::Client(c) => Some(c),
            NodeKind::Split { .. } => None,
        }
    }

    /// Build a reverse index from client handle to the node holding it.
    /// Used by callers that need to look up many clients at once (the
    /// arity/uniqueness property tests); single lookups should prefer
    /// [`find_client_node`][crate::query::find_client_node].
    pub(crate) fn client_index(&self) -> HashMap<C, NodeId> {
        let mut index = HashMap::new();

        for (i, slot) in self.arena.iter().enumerate() {
            if let Some(Node {
                kind: NodeKind::Client(c),
                ..
            }) = slot
            {
                index.insert(*c, NodeId(i));
            }
        }

        index
    }
}
