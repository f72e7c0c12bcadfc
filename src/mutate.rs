//! Tree edits: reconciling a tree with the host's client list
//! (`arrange`), inserting a client (in-place leaf-to-split conversion),
//! and removing one (sibling lifting).
use crate::{
    config::{Config, Toggles},
    error::{Error, Result},
    geometry::Rect,
    host::{Handle, Host},
    query::target_columns_with,
    tree::{BspTree, NodeId, NodeKind},
};
use std::collections::HashSet;
use tracing::debug;

impl<C: Handle> BspTree<C> {
    /// Reconcile this tree with `host`'s current client list for monitor
    /// `m` and place everything.
    ///
    /// Tiled clients `host.clients_on(m)` reports that are missing from the
    /// tree are inserted; clients the tree holds that are no longer
    /// associated with `m`, or that became floating/fullscreen, are
    /// removed. If no client ends up both present and visible this frame,
    /// no `host.resize` calls are issued at all (matching the original
    /// source's early return when there is nothing to place).
    pub fn arrange<M: Handle>(
        &mut self,
        host: &mut impl Host<C, M>,
        toggles: &mut Toggles,
        cfg: &Config,
        m: M,
        area: Rect,
    ) {
        let associated: HashSet<C> = host.clients_on(m).into_iter().collect();

        for c in self.client_index().into_keys().collect::<Vec<_>>() {
            let still_tiled_here =
                associated.contains(&c) && !host.is_floating(c) && !host.is_fullscreen(c);

            if !still_tiled_here {
                debug!(?m, "removing client no longer tiled on this monitor");
                let _ = self.remove_client(c);
            }
        }

        let mut visible_this_frame = 0u32;
        for c in host.clients_on(m) {
            if host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c) {
                if self.find_client_node(c).is_none() {
                    debug!(?m, "inserting newly eligible client");
                    self.insert_client(host, toggles, cfg, m, None, c, area);
                }
                visible_this_frame += 1;
            }
        }

        if visible_this_frame == 0 {
            return;
        }

        self.apply_layout(host, m, area, cfg.gap_px);
    }

    /// Insert `new` into the tree on monitor `m` with work area `area`.
    ///
    /// If `focused` is `None`, or equal to `new` itself, a target client is
    /// picked with [`pick_target_client`][Self::pick_target_client]
    /// instead. The target's client leaf is converted in place into a
    /// split node holding two fresh leaves (the displaced target, and
    /// `new`); the converted node's arena slot never moves, so its own
    /// parent's child pointer is untouched.
    pub fn insert_client<M: Handle>(
        &mut self,
        host: &impl Host<C, M>,
        toggles: &mut Toggles,
        cfg: &Config,
        m: M,
        focused: Option<C>,
        new: C,
        area: Rect,
    ) {
        let target = match focused {
            Some(f) if f != new => Some(f),
            _ => self.pick_target_client(host, toggles, m, focused),
        };

        let Some(root) = self.root else {
            let id = self.alloc(NodeKind::Client(new), None);
            self.root = Some(id);
            return;
        };

        let target_node = target.and_then(|t| self.find_client_node(t));

        let Some(target_node) = target_node else {
            // The target couldn't be located (shouldn't happen when a root
            // exists): split the root with the new client instead of
            // dropping it.
            let new_leaf = self.alloc(NodeKind::Client(new), None);
            let split = self.alloc(
                NodeKind::Split {
                    vertical: true,
                    ratio: 0.5,
                    left: root,
                    right: new_leaf,
                },
                None,
            );
            self.node_mut(root).unwrap().parent = Some(split);
            self.node_mut(new_leaf).unwrap().parent = Some(split);
            self.root = Some(split);
            return;
        };

        let old_client = self
            .client_at(target_node)
            .expect("pick_target_client / find_client_node only ever return client leaves");
        let old_leaf = self.alloc(NodeKind::Client(old_client), Some(target_node));
        let new_leaf = self.alloc(NodeKind::Client(new), Some(target_node));

        let geom = host.geometry(old_client);
        let mut wider = geom.w >= geom.h;
        if self.count_columns(root) < target_columns_with(area, cfg.aspect_thresholds) {
            wider = true;
        }

        let old_count = self.visible_count(host, m, old_leaf);
        let new_count = self.visible_count(host, m, new_leaf);
        let place_new_first = if old_count > new_count {
            true
        } else if old_count == new_count {
            toggles.split_side
        } else {
            false
        };
        toggles.split_side = !toggles.split_side;

        let (left, right) = if place_new_first {
            (new_leaf, old_leaf)
        } else {
            (old_leaf, new_leaf)
        };

        self.node_mut(target_node).unwrap().kind = NodeKind::Split {
            vertical: wider,
            ratio: 0.5,
            left,
            right,
        };
    }

    /// Choose an insertion target when none was supplied: balance columns
    /// by picking the column with the smallest placement count, breaking
    /// ties with `toggles.col_pick` so repeated insertions spread
    /// deterministically across equally-sized columns.
    ///
    /// Falls back to `fallback` if the tree has no root yet, and to any
    /// active client if every tied column's representative has since
    /// disappeared.
    pub fn pick_target_client<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        toggles: &mut Toggles,
        m: M,
        fallback: Option<C>,
    ) -> Option<C> {
        let Some(root) = self.root else {
            return fallback;
        };

        let cols = self.collect_columns(host, m, root);
        if cols.is_empty() {
            return self.first_active_client(host, m, root);
        }

        let min_count = cols.iter().map(|c| c.count).min().unwrap();
        let tied: Vec<_> = cols.iter().filter(|c| c.count == min_count).collect();

        let start = (toggles.col_pick as usize) % tied.len();
        for offset in 0..tied.len() {
            let pick = tied[(start + offset) % tied.len()];
            if let Some(rep) = pick.representative {
                toggles.col_pick += 1;
                return Some(rep);
            }
        }

        self.first_active_client(host, m, root)
    }

    /// Remove `c` from the tree.
    ///
    /// A recursive rewrite: a split node that loses exactly one child lifts
    /// the survivor into its own slot, inheriting its parent link, so no
    /// split node is ever left with fewer than two children once this call
    /// returns. Returns [`Error::UnknownClient`] if `c` was not present; this
    /// is a tolerated no-op the caller is expected to handle, not fatal.
    pub fn remove_client(&mut self, c: C) -> Result<()> {
        let Some(root) = self.root else {
            return Err(Error::UnknownClient);
        };

        if self.find_client_node(c).is_none() {
            return Err(Error::UnknownClient);
        }

        self.root = self.remove_rec(root, c);
        Ok(())
    }

    fn remove_rec(&mut self, id: NodeId, target: C) -> Option<NodeId> {
        match self.node(id).unwrap().kind {
            NodeKind::Client(c) => {
                if c == target {
                    self.free(id);
                    None
                } else {
                    Some(id)
                }
            }
            NodeKind::Split {
                left,
                right,
                vertical,
                ratio,
            } => {
                let new_left = self.remove_rec(left, target);
                let new_right = self.remove_rec(right, target);

                match (new_left, new_right) {
                    (None, None) => {
                        self.free(id);
                        None
                    }
                    (Some(survivor), None) | (None, Some(survivor)) => {
                        let parent = self.node(id).unwrap().parent;
                        self.free(id);
                        if let Some(n) = self.node_mut(survivor) {
                            n.parent = parent;
                        }
                        Some(survivor)
                    }
                    (Some(l), Some(r)) => {
                        self.node_mut(id).unwrap().kind = NodeKind::Split {
                            vertical,
                            ratio,
                            left: l,
                            right: r,
                        };
                        Some(id)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestClient, TestHost};

    fn wide_monitor() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    #[test]
    fn scenario_a_first_insertion() {
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();

        tree.insert_client(&host, &mut toggles, &cfg, 0, None, c1, wide_monitor());
        assert_eq!(tree.client_at(tree.root().unwrap()), Some(c1));

        tree.apply_layout(&mut host, 0, wide_monitor(), 0);
        assert_eq!(host.placements.get(&c1), Some(&wide_monitor()));
    }

    #[test]
    fn scenario_b_second_insertion_is_vertical_half_split() {
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);
        let c2 = host.map(0, true, false, false);
        host.set_geometry(c1, wide_monitor());

        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();

        tree.insert_client(&host, &mut toggles, &cfg, 0, None, c1, wide_monitor());
        tree.insert_client(&host, &mut toggles, &cfg, 0, Some(c1), c2, wide_monitor());

        let root = tree.root().unwrap();
        match tree.node(root).unwrap().kind {
            NodeKind::Split { vertical, ratio, .. } => {
                assert!(vertical, "2 cols target on a 16:9 monitor forces a vertical split");
                assert_eq!(ratio, 0.5);
            }
            NodeKind::Client(_) => panic!("expected a split root"),
        }

        tree.apply_layout(&mut host, 0, wide_monitor(), 0);
        let mut widths: Vec<u32> = host.placements.values().map(|r| r.w).collect();
        widths.sort();
        assert_eq!(widths, vec![960, 960]);
        for r in host.placements.values() {
            assert_eq!(r.h, 1080);
        }
    }

    #[test]
    fn scenario_e_removal_lifts_sibling() {
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);
        let c2 = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();

        tree.insert_client(&host, &mut toggles, &cfg, 0, None, c1, wide_monitor());
        tree.insert_client(&host, &mut toggles, &cfg, 0, Some(c1), c2, wide_monitor());

        tree.remove_client(c2).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree.client_at(root), Some(c1));
        assert_eq!(tree.node(root).unwrap().parent, None);

        tree.apply_layout(&mut host, 0, wide_monitor(), 0);
        assert_eq!(host.placements.get(&c1), Some(&wide_monitor()));
    }

    #[test]
    fn remove_unknown_client_is_a_tolerated_no_op() {
        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);
        tree.insert_client(&host, &mut toggles, &cfg, 0, None, c1, wide_monitor());

        let ghost = TestClient(999);
        assert!(matches!(tree.remove_client(ghost), Err(Error::UnknownClient)));
        assert_eq!(tree.client_at(tree.root().unwrap()), Some(c1));
    }

    #[test]
    fn arrange_removes_a_client_that_became_floating() {
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);
        let c2 = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();
        let area = wide_monitor();

        tree.arrange(&mut host, &mut toggles, &cfg, 0, area);
        assert!(tree.find_client_node(c1).is_some());
        assert!(tree.find_client_node(c2).is_some());

        host.set_floating(c2, true);
        tree.arrange(&mut host, &mut toggles, &cfg, 0, area);

        assert!(tree.find_client_node(c1).is_some());
        assert!(tree.find_client_node(c2).is_none());
    }

    #[test]
    fn remove_lifts_grandchild_past_removed_intermediate_split() {
        // Build: split(split(c1, c2), c3) and remove c2. The surviving c1
        // should be lifted all the way to be a direct sibling of c3, with
        // its parent pointing at the *outer* split, not a freed node.
        let mut host = TestHost::new();
        let c1 = host.map(0, true, false, false);
        let c2 = host.map(0, true, false, false);
        let c3 = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let mut toggles = Toggles::default();
        let cfg = Config::default();

        tree.insert_client(&host, &mut toggles, &cfg, 0, None, c1, wide_monitor());
        tree.insert_client(&host, &mut toggles, &cfg, 0, Some(c1), c2, wide_monitor());
        tree.insert_client(&host, &mut toggles, &cfg, 0, Some(c1), c3, wide_monitor());

        tree.remove_client(c2).unwrap();

        let c1_node = tree.find_client_node(c1).unwrap();
        let c3_node = tree.find_client_node(c3).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(tree.node(c1_node).unwrap().parent, Some(root));
        assert_eq!(tree.node(c3_node).unwrap().parent, Some(root));
    }
}
