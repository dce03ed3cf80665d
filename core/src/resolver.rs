//! Spin resolution: random rotation in, winning segment out.
//!
//! Wheel frame (before rotation):
//!   - Segment `i` of `n` spans `[i*seg - 90, (i+1)*seg - 90)` degrees,
//!     so index 0 starts at 12 o'clock.
//!   - The pointer sits at 0 degrees (3 o'clock) and never moves.
//!
//! The wheel turns clockwise by `final_angle`. Whatever segment ends up
//! under the pointer wins. Nothing here knows about drawing.

use crate::{
    config::{RotationConfig, TimingConfig},
    types::Degrees,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Offset that moves index 0 from 3 o'clock to 12 o'clock.
pub const TOP_OFFSET: Degrees = 90.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpinOutcome {
    /// Total clockwise rotation applied to the wheel.
    pub final_angle:   Degrees,
    pub winning_index: usize,
}

/// Arc occupied by one segment, in the unrotated frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SegmentSpan {
    pub start: Degrees,
    pub end:   Degrees,
}

/// Resolve a spin with the default 3..7 full turns.
pub fn resolve<R>(item_count: usize, rng: R) -> SpinOutcome
where
    R: FnMut() -> f64,
{
    resolve_with(&RotationConfig::default(), item_count, rng)
}

/// Resolve a spin. Draws twice from `rng`: the number of full turns, then
/// the resting offset. Callers guarantee `item_count > 0`.
pub fn resolve_with<R>(rotation: &RotationConfig, item_count: usize, mut rng: R) -> SpinOutcome
where
    R: FnMut() -> f64,
{
    debug_assert!(item_count > 0, "resolve() called with zero items");

    let base_rotations = rotation.min_rotations + rng() * rotation.extra_rotations;
    let offset = rng() * 360.0;
    let final_angle = base_rotations * 360.0 + offset;

    // A single item always wins; the angle is still needed for the animation.
    if item_count <= 1 {
        return SpinOutcome { final_angle, winning_index: 0 };
    }

    SpinOutcome {
        final_angle,
        winning_index: winning_index_for(final_angle, item_count),
    }
}

/// Index of the segment under the pointer after rotating by `final_angle`.
pub fn winning_index_for(final_angle: Degrees, item_count: usize) -> usize {
    if item_count <= 1 {
        return 0;
    }
    let segment = segment_angle(item_count);
    let pointer_angle = normalize(-final_angle);
    let adjusted_angle = normalize(pointer_angle + TOP_OFFSET);
    (adjusted_angle / segment).floor() as usize % item_count
}

/// Width of one segment.
pub fn segment_angle(item_count: usize) -> Degrees {
    360.0 / item_count as f64
}

pub fn segment_span(index: usize, item_count: usize) -> SegmentSpan {
    let segment = segment_angle(item_count);
    SegmentSpan {
        start: index as f64 * segment - TOP_OFFSET,
        end:   (index + 1) as f64 * segment - TOP_OFFSET,
    }
}

/// Length of the spin animation: `min_spin_ms + draw * spin_jitter_ms`.
pub fn spin_duration(timing: &TimingConfig, draw: f64) -> Duration {
    let jitter = (draw * timing.spin_jitter_ms as f64).floor() as u64;
    Duration::from_millis(timing.min_spin_ms + jitter)
}

/// Map any angle into [0, 360).
fn normalize(angle: Degrees) -> Degrees {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { a - 360.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize(-1080.0), 0.0);
        assert_eq!(normalize(450.0), 90.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert!(normalize(-1e-17) < 360.0);
    }

    #[test]
    fn segment_spans_tile_the_circle_from_the_top() {
        let first = segment_span(0, 4);
        let last = segment_span(3, 4);
        assert_eq!(first.start, -90.0);
        assert_eq!(first.end, 0.0);
        assert_eq!(last.end, 270.0);
    }

    #[test]
    fn spin_duration_covers_configured_range() {
        let timing = TimingConfig::default();
        assert_eq!(spin_duration(&timing, 0.0), Duration::from_millis(500));
        assert_eq!(spin_duration(&timing, 0.5), Duration::from_millis(1000));
        assert!(spin_duration(&timing, 0.999_999) < Duration::from_millis(1500));
    }
}
