//! Recursive geometry assignment: turning a [`BspTree`] plus a monitor work
//! area into `host.resize` calls.
use crate::{
    geometry::Rect,
    host::{Handle, Host},
    tree::{BspTree, NodeId, NodeKind},
};
use tracing::trace;

impl<C: Handle> BspTree<C> {
    /// Place every visible tiled client under this tree's root into `area`,
    /// shrinking `area` by `gap_px` on all four sides first if gaps are
    /// enabled.
    ///
    /// A no-op on an empty tree. Deterministic and depth-first
    /// left-to-right: calling this twice with no intervening host state
    /// change produces the same sequence of `host.resize` calls.
    pub fn apply_layout<M: Handle>(&self, host: &mut impl Host<C, M>, m: M, area: Rect, gap_px: u32) {
        let Some(root) = self.root else { return };

        let area = if gap_px > 0 { area.shrink(gap_px) } else { area };
        self.apply_layout_at(host, m, root, area, gap_px);
    }

    fn apply_layout_at<M: Handle>(
        &self,
        host: &mut impl Host<C, M>,
        m: M,
        id: NodeId,
        area: Rect,
        gap_px: u32,
    ) {
        let Some(node) = self.node(id) else { return };

        match node.kind {
            NodeKind::Client(c) => {
                if host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c) {
                    trace!(?area, "placing client");
                    host.resize(c, area);
                }
            }
            NodeKind::Split {
                vertical,
                ratio,
                left,
                right,
            } => {
                let l = self.visible_count(host, m, left);
                let r = self.visible_count(host, m, right);

                match (l > 0, r > 0) {
                    (false, false) => {}
                    // The split is "collapsed" for this frame: the visible
                    // side expands to fill the slot its empty sibling would
                    // have taken, without mutating the tree.
                    (true, false) => self.apply_layout_at(host, m, left, area, gap_px),
                    (false, true) => self.apply_layout_at(host, m, right, area, gap_px),
                    (true, true) => {
                        let (left_area, right_area) = if vertical {
                            area.split_vertical(ratio, gap_px)
                        } else {
                            area.split_horizontal(ratio, gap_px)
                        };

                        self.apply_layout_at(host, m, left, left_area, gap_px);
                        self.apply_layout_at(host, m, right, right_area, gap_px);
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

    #[test]
    fn single_client_fills_area() {
        let mut host = TestHost::new();
        let c = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let id = tree.alloc(crate::tree::NodeKind::Client(c), None);
        tree.root = Some(id);

        let area = Rect::new(0, 0, 1920, 1080);
        tree.apply_layout(&mut host, 0, area, 0);

        assert_eq!(host.placements.get(&c), Some(&area));
    }

    #[test]
    fn invisible_collapsed_sibling_gives_full_area_to_survivor() {
        let mut host = TestHost::new();
        let visible = host.map(0, true, false, false);
        let hidden = host.map(0, false, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let left = tree.alloc(crate::tree::NodeKind::Client(hidden), None);
        let right = tree.alloc(crate::tree::NodeKind::Client(visible), None);
        let split = tree.alloc(
            crate::tree::NodeKind::Split {
                vertical: true,
                ratio: 0.5,
                left,
                right,
            },
            None,
        );
        tree.root = Some(split);
        tree.node_mut(left).unwrap().parent = Some(split);
        tree.node_mut(right).unwrap().parent = Some(split);

        let area = Rect::new(0, 0, 1920, 1080);
        tree.apply_layout(&mut host, 0, area, 0);

        assert_eq!(host.placements.get(&visible), Some(&area));
        assert!(!host.placements.contains_key(&hidden));
    }

    #[test]
    fn idempotent_across_two_arranges() {
        let mut host = TestHost::new();
        let a = host.map(0, true, false, false);
        let b = host.map(0, true, false, false);

        let mut tree: BspTree<TestClient> = BspTree::new();
        let left = tree.alloc(crate::tree::NodeKind::Client(a), None);
        let right = tree.alloc(crate::tree::NodeKind::Client(b), None);
        let split = tree.alloc(
            crate::tree::NodeKind::Split {
                vertical: true,
                ratio: 0.5,
                left,
                right,
            },
            None,
        );
        tree.root = Some(split);
        tree.node_mut(left).unwrap().parent = Some(split);
        tree.node_mut(right).unwrap().parent = Some(split);

        let area = Rect::new(0, 0, 1920, 1080);
        tree.apply_layout(&mut host, 0, area, 0);
        let first = host.placements.clone();
        tree.apply_layout(&mut host, 0, area, 0);

        assert_eq!(host.placements, first);
    }
}
