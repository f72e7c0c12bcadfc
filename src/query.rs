//! Read-only traversals over a [`BspTree`]: visibility counting, column
//! enumeration, the aspect policy, and ancestor-split lookup.
use crate::{
    config::AspectThresholds,
    geometry::Rect,
    host::{Handle, Host},
    tree::{BspTree, Node, NodeId, NodeKind},
};

impl<C: Handle> BspTree<C> {
    /// Number of leaves under `id` whose client is currently tiled and
    /// visible on `m`. A client leaf contributes 1 iff
    /// `host.visible_on(c, m) && !is_floating(c) && !is_fullscreen(c)`;
    /// split nodes sum their children.
    pub fn visible_count<M: Handle>(&self, host: &impl Host<C, M>, m: M, id: NodeId) -> u32 {
        match self.node(id).map(|n| &n.kind) {
            None => 0,
            Some(NodeKind::Client(c)) => {
                let c = *c;
                (host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c)) as u32
            }
            Some(NodeKind::Split { left, right, .. }) => {
                let (left, right) = (*left, *right);
                self.visible_count(host, m, left) + self.visible_count(host, m, right)
            }
        }
    }

    /// Identical semantics to [`visible_count`][Self::visible_count].
    ///
    /// The original source carries two names for this function "for
    /// historical reasons"; they must remain equal, so this is a plain
    /// alias rather than a re-implementation that could drift.
    #[inline]
    pub fn placement_count<M: Handle>(&self, host: &impl Host<C, M>, m: M, id: NodeId) -> u32 {
        self.visible_count(host, m, id)
    }

    /// Depth-first, left-before-right search for the leaf holding `c`.
    pub fn find_client_node(&self, c: C) -> Option<NodeId> {
        fn go<C: Handle>(tree: &BspTree<C>, id: NodeId, target: C) -> Option<NodeId> {
            match tree.node(id)?.kind {
                NodeKind::Client(c) if c == target => Some(id),
                NodeKind::Client(_) => None,
                NodeKind::Split { left, right, .. } => {
                    go(tree, left, target).or_else(|| go(tree, right, target))
                }
            }
        }

        go(self, self.root?, c)
    }

    /// The tree's horizontal column count, independent of visibility: a
    /// client is 1 column, a vertical split sums its children's column
    /// counts, a horizontal split takes the max.
    pub fn count_columns(&self, id: NodeId) -> u32 {
        match self.node(id).map(|n| &n.kind) {
            None => 0,
            Some(NodeKind::Client(_)) => 1,
            Some(NodeKind::Split {
                vertical,
                left,
                right,
                ..
            }) => {
                let (vertical, left, right) = (*vertical, *left, *right);
                let l = self.count_columns(left);
                let r = self.count_columns(right);

                if vertical {
                    l + r
                } else {
                    l.max(r)
                }
            }
        }
    }

    /// Starting at `start` (or `start`'s parent if `start` is a client
    /// leaf), walk parent links upward and return the first split whose
    /// orientation matches `need_vertical` and whose left and right
    /// subtrees each have at least one visible client on `m`.
    pub fn find_suitable_split<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        m: M,
        start: NodeId,
        need_vertical: bool,
    ) -> Option<NodeId> {
        let mut cursor = match self.node(start)?.kind {
            NodeKind::Client(_) => self.node(start)?.parent,
            NodeKind::Split { .. } => Some(start),
        };

        while let Some(id) = cursor {
            if let Some(Node {
                kind:
                    NodeKind::Split {
                        vertical,
                        left,
                        right,
                        ..
                    },
                parent,
            }) = self.node(id)
            {
                let (vertical, left, right, parent) = (*vertical, *left, *right, *parent);

                if vertical == need_vertical
                    && self.visible_count(host, m, left) > 0
                    && self.visible_count(host, m, right) > 0
                {
                    return Some(id);
                }

                cursor = parent;
            } else {
                break;
            }
        }

        None
    }

    /// The leftmost (DFS) client under `id` that is visible on `m` and not
    /// floating/fullscreen.
    pub fn first_visible_client<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        m: M,
        id: NodeId,
    ) -> Option<C> {
        match self.node(id)?.kind {
            NodeKind::Client(c) => {
                (host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c))
                    .then_some(c)
            }
            NodeKind::Split { left, right, .. } => self
                .first_visible_client(host, m, left)
                .or_else(|| self.first_visible_client(host, m, right)),
        }
    }

    /// `first_active_client` and `first_visible_client` apply the same
    /// predicate in a different traversal order in the original source; the
    /// two are semantically identical here, as there.
    #[inline]
    pub fn first_active_client<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        m: M,
        id: NodeId,
    ) -> Option<C> {
        self.first_visible_client(host, m, id)
    }

    /// Enumerate this tree's columns: traversing only vertical splits
    /// downward, a column is any non-vertical subtree root (a horizontal
    /// split or a client leaf). Columns with zero placement count are
    /// dropped, matching `collect_columns`'s early return in the original
    /// source.
    pub(crate) fn collect_columns<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        m: M,
        id: NodeId,
    ) -> Vec<ColumnInfo<C>> {
        match self.node(id).map(|n| &n.kind) {
            None => vec![],
            Some(NodeKind::Split {
                vertical: true,
                left,
                right,
                ..
            }) => {
                let (left, right) = (*left, *right);
                let mut cols = self.collect_columns(host, m, left);
                cols.extend(self.collect_columns(host, m, right));
                cols
            }
            // A client leaf or a horizontal split is itself a single column.
            Some(_) => {
                let count = self.placement_count(host, m, id);
                if count == 0 {
                    return vec![];
                }

                vec![ColumnInfo {
                    node: id,
                    count,
                    representative: self.first_active_client(host, m, id),
                }]
            }
        }
    }
}

/// One column as returned by [`BspTree::collect_columns`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnInfo<C> {
    pub(crate) node: NodeId,
    pub(crate) count: u32,
    pub(crate) representative: Option<C>,
}

/// Column count this monitor's geometry should target, per the coarse
/// aspect policy: wide monitors fill into more columns before subdividing
/// rows.
pub fn target_columns(area: Rect) -> u32 {
    target_columns_with(area, AspectThresholds::default())
}

/// As [`target_columns`] but with caller-supplied thresholds, for hosts
/// that expose the policy as configuration.
pub fn target_columns_with(area: Rect, thresholds: AspectThresholds) -> u32 {
    if area.h == 0 {
        return 2;
    }

    let ratio = area.aspect();
    if ratio >= thresholds.four_col {
        4
    } else if ratio >= thresholds.three_col {
        3
    } else {
        2
    }
}

/// Two-phase point-to-client resolution: an exact hit against a visible
/// tiled client's geometry, falling back to the nearest such client by
/// Euclidean distance to its rect. Grounded on the original source's
/// `xytoclient`; adjacent to the BSP engine (used to resolve pointer
/// clicks against the host's client set) but independent of tree state,
/// so it takes a plain client list rather than a `BspTree`.
pub fn nearest_client_to_point<C: Copy>(clients: &[(C, Rect)], x: f64, y: f64) -> Option<C> {
    for &(c, r) in clients.iter().rev() {
        if r.contains_point((x as i32, y as i32)) {
            return Some(c);
        }
    }

    clients
        .iter()
        .rev()
        .map(|&(c, r)| (c, dist_to_rect(r, x, y)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(c, _)| c)
}

fn dist_to_rect(r: Rect, x: f64, y: f64) -> f64 {
    let dx = if x < r.x as f64 {
        r.x as f64 - x
    } else if x > (r.x + r.w as i32) as f64 {
        x - (r.x + r.w as i32) as f64
    } else {
        0.0
    };

    let dy = if y < r.y as f64 {
        r.y as f64 - y
    } else if y > (r.y + r.h as i32) as f64 {
        y - (r.y + r.h as i32) as f64
    } else {
        0.0
    };

    (dx * dx + dy * dy).sqrt()
}
