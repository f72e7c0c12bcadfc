//! Tunable constants and the process-wide toggles that make tied
//! insertions deterministic.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The aspect-ratio breakpoints used by [`target_columns`][crate::query::target_columns].
///
/// Hardcoded as a policy choice rather than physics: a host
/// may expose these as user configuration but should not change the
/// defaults without a specific reason.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectThresholds {
    /// Aspect ratio at or above which four columns are targeted.
    pub four_col: f32,
    /// Aspect ratio at or above which three columns are targeted.
    pub three_col: f32,
}

impl Default for AspectThresholds {
    fn default() -> Self {
        Self {
            four_col: 3.2,
            three_col: 2.2,
        }
    }
}

/// Tunable constants for a [`BspTree`][crate::tree::BspTree] and its
/// [`ResizeController`][crate::resize::ResizeController].
///
/// There is no file format or wire representation for this type that this
/// crate owns: a host that wants to persist these values is
/// free to (de)serialize `Config` with its own configuration loader behind
/// the `serde` feature.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Inter-tile and outer padding, in pixels, when gaps are enabled.
    /// `0` disables gaps entirely.
    pub gap_px: u32,
    /// Lower clamp for any split ratio.
    pub min_ratio: f32,
    /// Upper clamp for any split ratio.
    pub max_ratio: f32,
    /// Minimum time between applied resize-motion updates, in milliseconds.
    pub resize_interval_ms: u32,
    /// Minimum pointer movement, in pixels, before a throttled motion event
    /// is applied even if `resize_interval_ms` has not elapsed.
    pub resize_min_pixels: f32,
    /// The smallest ratio change considered worth writing back and
    /// requesting a rearrange for.
    pub resize_ratio_epsilon: f32,
    /// Monitor-aspect to column-count policy thresholds.
    pub aspect_thresholds: AspectThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap_px: 0,
            min_ratio: 0.05,
            max_ratio: 0.95,
            resize_interval_ms: 16,
            resize_min_pixels: 1.0,
            resize_ratio_epsilon: 0.0005,
            aspect_thresholds: AspectThresholds::default(),
        }
    }
}

impl Config {
    /// Clamp `ratio` into `[min_ratio, max_ratio]`.
    pub fn clamp_ratio(&self, ratio: f32) -> f32 {
        ratio.clamp(self.min_ratio, self.max_ratio)
    }
}

/// Process-wide state that makes tied insertion decisions deterministic
/// across a session. These are inputs to
/// the mutation engine, not tree invariants: a fresh [`Toggles::default`]
/// yields a valid, merely differently-ordered, layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    /// Flipped after every insertion that splits a node with equally-sized
    /// children; decides which of the two new leaves is placed first.
    pub split_side: bool,
    /// Advanced on every insertion that picks its target column from among
    /// several tied-for-smallest columns; rotates which tied column is
    /// chosen next.
    pub col_pick: u32,
}
