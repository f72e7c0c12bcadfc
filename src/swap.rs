//! Directional neighbor-finding and client swapping/rotation.
//!
//! Unlike [`crate::mutate`], none of this touches tree shape: a swap
//! exchanges which client two existing leaves hold, and a rotation only
//! reorders the host's own client list (`set_client_order`), leaving the
//! tree's split structure untouched.
use crate::{
    geometry::Rect,
    host::{Handle, Host},
    tree::{BspTree, NodeId, NodeKind},
};

/// A screen-space direction from a client's current position, used by
/// [`BspTree::swap_adjacent`].
///
/// Named after penrose's `RelativePosition`, which plays the same role for
/// workspace-relative layout queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl<C: Handle> BspTree<C> {
    /// Swap `c`'s client with whichever visible tiled client lies closest
    /// to it in `dir`, by Manhattan distance between rect centers, among
    /// clients whose center actually lies in that half-plane relative to
    /// `c`.
    ///
    /// Only the two leaves' `NodeKind::Client` payloads are exchanged; tree
    /// shape (and so both clients' sizes) is unchanged. A no-op, returning
    /// `false`, if `c` is not present or no client lies in `dir`.
    pub fn swap_adjacent<M: Handle>(
        &mut self,
        host: &impl Host<C, M>,
        m: M,
        c: C,
        dir: Direction,
    ) -> bool {
        let Some(from_node) = self.find_client_node(c) else {
            return false;
        };
        let from_rect = host.geometry(c);
        let (fx, fy) = from_rect.center();

        let Some(root) = self.root else { return false };
        let candidates = self.visible_client_rects(host, m, root);

        let best = candidates
            .into_iter()
            .filter(|&(other, _)| other != c)
            .filter_map(|(other, rect)| {
                let (ox, oy) = rect.center();
                let in_half_plane = match dir {
                    Direction::Left => ox < fx,
                    Direction::Right => ox > fx,
                    Direction::Up => oy < fy,
                    Direction::Down => oy > fy,
                };
                in_half_plane.then(|| (other, (ox - fx).unsigned_abs() + (oy - fy).unsigned_abs()))
            })
            .min_by_key(|&(_, dist)| dist)
            .map(|(other, _)| other);

        let Some(other) = best else { return false };
        let Some(other_node) = self.find_client_node(other) else {
            return false;
        };

        self.swap_leaf_payloads(from_node, other_node);
        true
    }

    fn swap_leaf_payloads(&mut self, a: NodeId, b: NodeId) {
        let a_client = self.client_at(a).expect("swap_adjacent only ever finds client leaves");
        let b_client = self.client_at(b).expect("swap_adjacent only ever finds client leaves");

        self.node_mut(a).unwrap().kind = NodeKind::Client(b_client);
        self.node_mut(b).unwrap().kind = NodeKind::Client(a_client);
    }

    /// All (client, geometry) pairs visible on `m` under `id`, depth-first.
    /// Shared with [`crate::resize`], which unions these to recover a
    /// split's bounding box at grab time.
    pub(crate) fn visible_client_rects<M: Handle>(
        &self,
        host: &impl Host<C, M>,
        m: M,
        id: NodeId,
    ) -> Vec<(C, Rect)> {
        match self.node(id).map(|n| &n.kind) {
            None => vec![],
            Some(NodeKind::Client(c)) => {
                let c = *c;
                if host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c) {
                    vec![(c, host.geometry(c))]
                } else {
                    vec![]
                }
            }
            Some(NodeKind::Split { left, right, .. }) => {
                let (left, right) = (*left, *right);
                let mut out = self.visible_client_rects(host, m, left);
                out.extend(self.visible_client_rects(host, m, right));
                out
            }
        }
    }
}

/// Rotate the visible tiled clients in the host's ordering for `m` by
/// `steps` (positive = the first of them moves to the end, wrapping;
/// negative = the last moves to the front), and tell the host about the
/// new order. Floating, fullscreen, and otherwise-hidden clients keep
/// their positions in the list untouched. Pure reordering: the tree itself
/// is never consulted or touched, since rotation is a host-list operation,
/// not a tree-shape one.
pub fn rotate_clients<C: Handle, M: Handle>(host: &mut impl Host<C, M>, m: M, steps: i32) {
    let mut order = host.clients_on(m);

    let eligible: Vec<usize> = order
        .iter()
        .enumerate()
        .filter(|&(_, &c)| host.visible_on(c, m) && !host.is_floating(c) && !host.is_fullscreen(c))
        .map(|(i, _)| i)
        .collect();

    if eligible.len() < 2 {
        return;
    }

    let mut rotated: Vec<C> = eligible.iter().map(|&i| order[i]).collect();
    let shift = steps.rem_euclid(rotated.len() as i32) as usize;
    rotated.rotate_left(shift);

    for (&i, c) in eligible.iter().zip(rotated) {
        order[i] = c;
    }

    host.set_client_order(m, order);
}
