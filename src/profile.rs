//! Single-tooth face curve sampling.

use crate::float_types::Real;
use crate::involute::involute_point;

/// Number of segments for the curved tooth face, fixed across all gears.
pub const FLANK_SEGMENTS: usize = 5;

/// The radii and angular offset that describe one tooth's involute face.
///
/// `angle_offset` centers the profile on its angular slot; the outline
/// builder computes it from the involute angle at the pitch circle and the
/// tooth thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothProfile {
    pub root_radius: Real,
    pub base_radius: Real,
    pub outer_radius: Real,
    pub angle_offset: Real,
}

impl ToothProfile {
    /// A point on the tooth face, from root (`fraction` 0) to tip
    /// (`fraction` 1), on the `side` flank (+1.0 or -1.0).
    pub fn flank_point(&self, fraction: Real, side: Real) -> (Real, Real) {
        let start_radius = self.base_radius.max(self.root_radius);
        let radius = (1.0 - fraction) * start_radius + fraction * self.outer_radius;
        involute_point(self.base_radius, side, self.angle_offset, radius)
    }

    /// The full face curve: the rising flank root to tip, then the mirrored
    /// falling flank tip to root. Point-symmetric about the tooth
    /// centerline, ordered so that concatenation with root-circle endpoints
    /// yields a non-self-intersecting path across one tooth span.
    pub fn face_points(&self) -> Vec<(Real, Real)> {
        let mut points = Vec::with_capacity(2 * (FLANK_SEGMENTS + 1));
        for i in 0..=FLANK_SEGMENTS {
            let fraction = i as Real / FLANK_SEGMENTS as Real;
            points.push(self.flank_point(fraction, 1.0));
        }
        for i in (0..=FLANK_SEGMENTS).rev() {
            let fraction = i as Real / FLANK_SEGMENTS as Real;
            points.push(self.flank_point(fraction, -1.0));
        }
        points
    }
}
