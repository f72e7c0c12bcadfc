//! Interactive resize: dragging a tiled client's ancestor splits, or a
//! floating client's own box, from pointer motion.
//!
//! The session state here is deliberately kept out of [`BspTree`]: it is
//! ephemeral per-grab UI state, not part of the tree's own data model. The
//! shape of a grab-driven state machine (start data captured once, then
//! refined on each motion event) follows the same pattern as a Wayland
//! compositor's `PointerGrab` implementation, though no Wayland types are
//! involved here.
use crate::{
    config::Config,
    error::{Error, Result},
    geometry::Rect,
    host::{Handle, Host},
    tree::{BspTree, NodeId, NodeKind},
};

#[derive(Debug, Clone, Copy)]
struct AxisState {
    split: NodeId,
    start_ratio: f32,
    start_box: Rect,
}

#[derive(Debug, Clone, Copy)]
struct FloatingState {
    start_box: Rect,
    dir_x: i32,
    dir_y: i32,
    min_extent: u32,
}

#[derive(Debug, Clone, Copy)]
struct ResizeSession<C> {
    client: C,
    start_x: f64,
    start_y: f64,
    vertical: Option<AxisState>,
    horizontal: Option<AxisState>,
    splits_selected: bool,
    floating: Option<FloatingState>,
    last_time: Option<u32>,
    last_x: f64,
    last_y: f64,
}

/// Drives one interactive resize grab at a time. Holds no tree or host
/// reference of its own: every method takes the tree and host it needs to
/// act on, the same boundary [`BspTree`]'s own methods use.
#[derive(Debug)]
pub struct ResizeController<C> {
    session: Option<ResizeSession<C>>,
}

impl<C: Handle> Default for ResizeController<C> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<C: Handle> ResizeController<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a grab is currently in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a resize grab on `client` at pointer position `(x, y)`.
    ///
    /// Which ancestor splits the grab will drive is not decided here: that
    /// happens lazily on the first [`on_motion`][Self::on_motion] call. If
    /// `client` is floating, `min_extent` (`1 + 2*border` in the host's
    /// terms) clamps how small the floating resize can shrink it.
    pub fn begin_resize<M: Handle>(
        &mut self,
        host: &impl Host<C, M>,
        client: C,
        x: f64,
        y: f64,
        min_extent: u32,
    ) {
        let start_box = host.geometry(client);

        let floating = host.is_floating(client).then(|| {
            let (dir_x, dir_y) = pick_resize_handle(start_box, x, y);
            FloatingState {
                start_box,
                dir_x,
                dir_y,
                min_extent,
            }
        });

        self.session = Some(ResizeSession {
            client,
            start_x: x,
            start_y: y,
            vertical: None,
            horizontal: None,
            splits_selected: false,
            floating,
            last_time: None,
            last_x: x,
            last_y: y,
        });
    }

    /// Report pointer motion to `(x, y)` at `time_ms`.
    ///
    /// For a tiled client this mutates `tree`'s split ratios directly and
    /// asks `host` to rearrange if anything changed; for a floating client
    /// it resizes the client's box immediately via `host.resize`, bypassing
    /// the tree entirely. Throttled per `cfg.resize_interval_ms` /
    /// `cfg.resize_min_pixels`, except for the very first motion event
    /// after the grab started, which always applies.
    pub fn on_motion<M: Handle>(
        &mut self,
        tree: &mut BspTree<C>,
        host: &mut impl Host<C, M>,
        cfg: &Config,
        m: M,
        x: f64,
        y: f64,
        time_ms: u32,
    ) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::NoActiveResize)?;

        if let Some(state) = session.floating {
            apply_floating_resize(host, session.client, session.start_x, session.start_y, state, x, y);
            session.last_time = Some(time_ms);
            session.last_x = x;
            session.last_y = y;
            return Ok(());
        }

        if let Some(last_time) = session.last_time {
            let elapsed = time_ms.saturating_sub(last_time);
            let moved = (x - session.last_x).abs().max((y - session.last_y).abs());
            if elapsed < cfg.resize_interval_ms && moved < cfg.resize_min_pixels as f64 {
                return Ok(());
            }
        }

        if !session.splits_selected {
            session.splits_selected = true;
            if let Some(leaf) = tree.find_client_node(session.client) {
                session.vertical =
                    closest_split_node(tree, &*host, m, leaf, session.start_x, session.start_y, true);
                session.horizontal =
                    closest_split_node(tree, &*host, m, leaf, session.start_x, session.start_y, false);
            }
        }

        let mut changed = false;

        if let Some(axis) = session.vertical {
            let delta = (x - session.start_x) as f32 / axis.start_box.w.max(1) as f32;
            let new_ratio = cfg.clamp_ratio(axis.start_ratio + delta);
            changed |= set_split_ratio_if_changed(tree, axis.split, new_ratio, cfg.resize_ratio_epsilon)?;
        }

        if let Some(axis) = session.horizontal {
            let delta = (y - session.start_y) as f32 / axis.start_box.h.max(1) as f32;
            let new_ratio = cfg.clamp_ratio(axis.start_ratio + delta);
            changed |= set_split_ratio_if_changed(tree, axis.split, new_ratio, cfg.resize_ratio_epsilon)?;
        }

        session.last_time = Some(time_ms);
        session.last_x = x;
        session.last_y = y;

        if changed {
            host.request_rearrange(m);
        }

        Ok(())
    }

    /// End the current grab. Returns [`Error::NoActiveResize`] if none was
    /// in progress.
    pub fn end_resize(&mut self) -> Result<()> {
        self.session.take().map(|_| ()).ok_or(Error::NoActiveResize)
    }
}

/// `split` is a [`NodeId`] captured when the grab's ancestor splits were
/// selected; if a removal elsewhere freed it (or its arena slot was reused
/// for an unrelated node) before this motion event arrived, that is a
/// [`Error::StaleNode`], not a silent no-op.
fn set_split_ratio_if_changed<C: Handle>(
    tree: &mut BspTree<C>,
    split: NodeId,
    new_ratio: f32,
    epsilon: f32,
) -> Result<bool> {
    let node = tree.node_mut(split).ok_or(Error::StaleNode(split))?;
    let NodeKind::Split { ratio, .. } = &mut node.kind else {
        return Err(Error::StaleNode(split));
    };

    if (*ratio - new_ratio).abs() < epsilon {
        return Ok(false);
    }

    *ratio = new_ratio;
    Ok(true)
}

fn apply_floating_resize<C: Handle, M: Handle>(
    host: &mut impl Host<C, M>,
    client: C,
    start_x: f64,
    start_y: f64,
    state: FloatingState,
    x: f64,
    y: f64,
) {
    let dx = (x - start_x) as i32;
    let dy = (y - start_y) as i32;

    let mut rect = state.start_box;
    let min = state.min_extent as i32;

    match state.dir_x {
        -1 => {
            let new_w = (rect.w as i32 - dx).max(min);
            rect.x += rect.w as i32 - new_w;
            rect.w = new_w as u32;
        }
        1 => {
            rect.w = (rect.w as i32 + dx).max(min) as u32;
        }
        _ => {}
    }

    match state.dir_y {
        -1 => {
            let new_h = (rect.h as i32 - dy).max(min);
            rect.y += rect.h as i32 - new_h;
            rect.h = new_h as u32;
        }
        1 => {
            rect.h = (rect.h as i32 + dy).max(min) as u32;
        }
        _ => {}
    }

    host.resize(client, rect);
}

/// Walk `leaf`'s parent chain looking for ancestor splits of orientation
/// `vertical`, scoring each by how close its current divider position (at
/// the split's bounding box and ratio) is to the grab-time pointer position
/// on that axis, and keeping the closest. Unlike [`BspTree::find_suitable_split`], this
/// considers every qualifying ancestor rather than stopping at the first.
fn closest_split_node<C: Handle, M: Handle>(
    tree: &BspTree<C>,
    host: &impl Host<C, M>,
    m: M,
    leaf: NodeId,
    start_x: f64,
    start_y: f64,
    vertical: bool,
) -> Option<AxisState> {
    let mut cursor = tree.node(leaf)?.parent;
    let mut best: Option<(AxisState, f64)> = None;

    while let Some(id) = cursor {
        let node = tree.node(id)?;
        let NodeKind::Split {
            vertical: v,
            ratio,
            ..
        } = node.kind
        else {
            break;
        };

        if v == vertical {
            if let Some(bbox) = bounding_box(tree, host, m, id) {
                let divider = if vertical {
                    bbox.x as f64 + bbox.w as f64 * ratio as f64
                } else {
                    bbox.y as f64 + bbox.h as f64 * ratio as f64
                };
                let pointer_axis = if vertical { start_x } else { start_y };
                let score = (pointer_axis - divider).abs();

                if best.map_or(true, |(_, s)| score < s) {
                    best = Some((
                        AxisState {
                            split: id,
                            start_ratio: ratio,
                            start_box: bbox,
                        },
                        score,
                    ));
                }
            }
        }

        cursor = node.parent;
    }

    best.map(|(axis, _)| axis)
}

fn bounding_box<C: Handle, M: Handle>(
    tree: &BspTree<C>,
    host: &impl Host<C, M>,
    m: M,
    id: NodeId,
) -> Option<Rect> {
    tree.visible_client_rects(host, m, id)
        .into_iter()
        .map(|(_, r)| r)
        .reduce(|a, b| a.union(&b))
}

/// Given the pointer position at grab time relative to `box_`, decide which
/// horizontal and vertical edges were grabbed: the nearer horizontal side
/// sets `dir_x`, the nearer vertical side sets `dir_y`. Both are set only
/// when the grab is within `min(24, min(w, h) / 3)` pixels of a corner;
/// otherwise only the axis whose edge is closer contributes.
fn pick_resize_handle(box_: Rect, x: f64, y: f64) -> (i32, i32) {
    let left = x - box_.x as f64;
    let right = (box_.x as f64 + box_.w as f64) - x;
    let top = y - box_.y as f64;
    let bottom = (box_.y as f64 + box_.h as f64) - y;

    let h_dist = left.min(right);
    let v_dist = top.min(bottom);

    let corner_thresh = 24.0_f64.min(box_.w.min(box_.h) as f64 / 3.0);

    let dir_x = if left <= right { -1 } else { 1 };
    let dir_y = if top <= bottom { -1 } else { 1 };

    if h_dist <= corner_thresh && v_dist <= corner_thresh {
        (dir_x, dir_y)
    } else if h_dist <= v_dist {
        (dir_x, 0)
    } else {
        (0, dir_y)
    }
}

impl<C: Handle> BspTree<C> {
    /// Adjust the nearest suitable vertical-split ancestor of `focused` by
    /// `delta`, or reset it to `0.5` if `delta == 0.0`.
    pub fn set_ratio_v<M: Handle>(
        &mut self,
        host: &mut impl Host<C, M>,
        cfg: &Config,
        m: M,
        focused: C,
        delta: f32,
    ) -> Result<()> {
        self.set_ratio(host, cfg, m, focused, delta, true)
    }

    /// As [`set_ratio_v`][Self::set_ratio_v], for the nearest horizontal
    /// split ancestor.
    pub fn set_ratio_h<M: Handle>(
        &mut self,
        host: &mut impl Host<C, M>,
        cfg: &Config,
        m: M,
        focused: C,
        delta: f32,
    ) -> Result<()> {
        self.set_ratio(host, cfg, m, focused, delta, false)
    }

    fn set_ratio<M: Handle>(
        &mut self,
        host: &mut impl Host<C, M>,
        cfg: &Config,
        m: M,
        focused: C,
        delta: f32,
        vertical: bool,
    ) -> Result<()> {
        let leaf = self.find_client_node(focused).ok_or(Error::UnknownClient)?;
        let split = self
            .find_suitable_split(&*host, m, leaf, vertical)
            .ok_or(Error::NoSuitableSplit)?;

        let current = match self.node(split).unwrap().kind {
            NodeKind::Split { ratio, .. } => ratio,
            NodeKind::Client(_) => unreachable!("find_suitable_split only returns split nodes"),
        };

        let new_ratio = if delta == 0.0 {
            0.5
        } else {
            cfg.clamp_ratio(current + delta)
        };

        if let NodeKind::Split { ratio, .. } = &mut self.node_mut(split).unwrap().kind {
            *ratio = new_ratio;
        }

        host.request_rearrange(m);
        Ok(())
    }
}
