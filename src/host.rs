//! The boundary between this crate's pure tiling logic and the compositor
//! that owns window state, input, and rendering.
//!
//! `Host` is deliberately narrow: the tree never inspects a
//! client beyond what is asked of it here, and never performs any I/O of
//! its own. Implementing `Host` and driving `BspTree` from a real Wayland
//! event loop is out of scope for this crate, in the same way that
//! `x::XConn` is an abstraction boundary that concrete backends (X11,
//! Wayland) implement but that `penrose`'s `pure` module never depends on
//! directly.
use crate::geometry::Rect;
use std::{fmt, hash::Hash};

/// Bound shared by both the client handle and monitor handle types a
/// [`Host`] implementation uses. Handles are assumed to be cheap,
/// `Copy` identifiers (an integer id, a `Weak` pointer, ...), never
/// inspected beyond equality and hashing.
pub trait Handle: Copy + Eq + Hash + fmt::Debug {}
impl<T> Handle for T where T: Copy + Eq + Hash + fmt::Debug {}

/// Everything the tiling engine needs to know about, or do to, the
/// compositor's managed surfaces and monitors.
///
/// `C` is an opaque client handle and `M` an opaque monitor handle; the
/// tree never constructs or inspects either beyond what `Host` hands back.
pub trait Host<C: Handle, M: Handle> {
    /// All clients the host currently manages that are associated with
    /// monitor `m`, in host iteration order. This includes floating and
    /// fullscreen clients — filtering to tiled-and-visible is the tree's
    /// job, not the host's.
    fn clients_on(&self, m: M) -> Vec<C>;

    /// Whether `c` is visible on `m` (i.e. shares at least one active tag
    /// / workspace with the monitor and is mapped).
    fn visible_on(&self, c: C, m: M) -> bool;

    /// Whether `c` is currently floating.
    fn is_floating(&self, c: C) -> bool;

    /// Whether `c` is currently fullscreen.
    fn is_fullscreen(&self, c: C) -> bool;

    /// `c`'s current on-screen geometry.
    fn geometry(&self, c: C) -> Rect;

    /// Place `c` at `area`. Called once per visible tiled client per
    /// arrange pass.
    fn resize(&mut self, c: C, area: Rect);

    /// Invalidate and schedule a fresh `arrange(m)`. Used by the ratio
    /// setters when not already inside a motion callback.
    fn request_rearrange(&mut self, m: M);

    /// Replace the host's client ordering for `m` with `order`. Rotation
    /// asks the host to re-sort its client list accordingly; this is the
    /// method that performs that write.
    fn set_client_order(&mut self, m: M, order: Vec<C>);
}
