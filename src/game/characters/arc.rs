// Vertical motion arc used by jumps and dodges

use crate::core::math::lerp;

/// Triangular height profile for a timed hop.
///
/// The offset climbs linearly from 0 to `peak` during the first half of
/// `total` and falls back to 0 during the second half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionArc {
    /// Duration of the whole arc in seconds
    pub total: f32,
    /// Height reached at `total / 2`
    pub peak: f32,
}

impl MotionArc {
    pub fn new(total: f32, peak: f32) -> Self {
        Self { total, peak }
    }

    /// Height offset at `elapsed` seconds into an arc of length `total`.
    ///
    /// A non-positive `total` yields 0. `elapsed` is clamped to `[0, total]`.
    pub fn height(elapsed: f32, total: f32, peak: f32) -> f32 {
        if total <= 0.0 {
            return 0.0;
        }

        let half = total / 2.0;
        let elapsed = elapsed.clamp(0.0, total);

        if elapsed <= half {
            lerp(0.0, peak, elapsed / half)
        } else {
            lerp(peak, 0.0, (elapsed - half) / half)
        }
    }

    /// Height offset at `elapsed` seconds into this arc
    pub fn height_at(&self, elapsed: f32) -> f32 {
        Self::height(elapsed, self.total, self.peak)
    }

    /// Whether `elapsed` has reached the end of the arc
    pub fn is_complete(&self, elapsed: f32) -> bool {
        elapsed >= self.total
    }
}
