//! Error types raised by the tiling engine.
use crate::tree::NodeId;

/// Enum to store the ways that operations on a [BspTree][crate::tree::BspTree]
/// can fail.
///
/// Nothing in this crate is fatal: every variant here is raised from an
/// operation that is allowed to be a no-op (a client that raced its way out
/// of the tree, a node id that no longer resolves) rather than from one that
/// must propagate upward and abort the caller's event loop. `UnknownClient`
/// and `StaleNode` cover state that raced out from under the caller;
/// `NoSuitableSplit` and `NoActiveResize` are the resize controller's share
/// of the same category. Out-of-range ratios and near-zero subtree boxes
/// are clamped silently rather than raised as errors at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A client handle passed to [`remove_client`][crate::tree::BspTree::remove_client]
    /// or a ratio setter was not found in the tree.
    #[error("client is not present in this tree")]
    UnknownClient,

    /// A [`NodeId`] that no longer resolves to a live node was used. This can
    /// happen if a caller holds on to a `NodeId` across a mutation that freed
    /// it (e.g. a sibling-lifting removal).
    #[error("{0:?} does not refer to a live node")]
    StaleNode(NodeId),

    /// No ancestor split of the requested orientation had visible clients on
    /// both sides, so there was nothing to resize.
    #[error("no suitable ancestor split was found")]
    NoSuitableSplit,

    /// Interactive resize motion was reported without a resize session
    /// having been started with [`begin_resize`][crate::resize::ResizeController::begin_resize].
    #[error("no resize is in progress")]
    NoActiveResize,
}

/// Result type for errors raised by this crate's tree operations.
pub type Result<T> = std::result::Result<T, Error>;
