//! # btrtile
//!
//! A persistent, per-monitor binary space-partitioning tiling engine for
//! wlroots-style Wayland compositors.
//!
//! This crate owns exactly one thing: turning a set of mapped clients on a
//! monitor into a tree of horizontal/vertical splits, and that tree into
//! pixel rectangles. It does not talk to Wayland, does not own window
//! state, and does not perform any I/O; a compositor drives it through the
//! [`Host`] trait and calls [`BspTree::arrange`] after any event that could
//! change what should be visible where.
//!
//! ```text
//! tree → query → placement → mutate → swap → resize
//! ```
//! is the module dependency order: each later module only builds on the
//! ones before it.
#![warn(clippy::complexity, clippy::correctness, clippy::perf, clippy::style)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod mutate;
pub mod placement;
pub mod query;
pub mod resize;
pub mod swap;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use config::{AspectThresholds, Config, Toggles};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use host::{Handle, Host};
pub use query::{nearest_client_to_point, target_columns, target_columns_with};
pub use resize::ResizeController;
pub use swap::{rotate_clients, Direction};
pub use tree::{BspTree, NodeId};
