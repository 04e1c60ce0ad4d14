//! Closed 2D gear outlines built from replicated involute tooth profiles.

use crate::errors::ValidationError;
use crate::float_types::{FRAC_PI_2, PI, Real, TAU};
use crate::involute::{involute_angle, polar};
use crate::profile::{FLANK_SEGMENTS, ToothProfile};

/// Parameters of a single gear.
///
/// `module` is the linear size per tooth (pitch diameter / tooth count).
/// Internal gears are cut into a surrounding ring blank whose outer circle
/// sits `ring_margin` modules beyond the addendum circle.
#[derive(Debug, Clone, PartialEq)]
pub struct GearSpec {
    /// Number of teeth, at least 3.
    pub teeth: usize,
    /// Linear size per tooth. Strictly positive.
    pub module: Real,
    /// Pressure angle in degrees, inside (0, 90).
    pub pressure_angle_deg: Real,
    /// Cut the teeth into a ring blank instead of a solid disc.
    pub internal: bool,
    /// Extrusion thickness along z. Zero leaves a flat face.
    pub thickness: Real,
    /// Ring blank margin in modules. Only meaningful when `internal`.
    pub ring_margin: Real,
}

impl GearSpec {
    /// A solid external gear.
    pub const fn external(
        teeth: usize,
        module: Real,
        pressure_angle_deg: Real,
        thickness: Real,
    ) -> Self {
        GearSpec {
            teeth,
            module,
            pressure_angle_deg,
            internal: false,
            thickness,
            ring_margin: 0.0,
        }
    }

    /// An internal ring gear with the given blank margin.
    pub const fn internal(
        teeth: usize,
        module: Real,
        pressure_angle_deg: Real,
        thickness: Real,
        ring_margin: Real,
    ) -> Self {
        GearSpec {
            teeth,
            module,
            pressure_angle_deg,
            internal: true,
            thickness,
            ring_margin,
        }
    }

    /// Radius of the pitch circle, `module * teeth / 2`.
    pub fn pitch_radius(&self) -> Real {
        0.5 * self.module * self.teeth as Real
    }

    /// Radius of the ring blank's outer circle.
    pub fn rim_radius(&self) -> Real {
        self.pitch_radius() + 2.0 * self.module + self.ring_margin * self.module
    }

    /// Vertex count of the ring blank's outer circle. Coarser than the tooth
    /// outline but never fewer than 64 vertices, so the rim stays round
    /// regardless of tooth density.
    pub fn rim_segments(&self) -> usize {
        (2 * self.teeth).max(64)
    }

    /// Reject invalid parameters before any geometry work.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_count("teeth", self.teeth, 3)?;
        ValidationError::require_positive("module", self.module)?;
        ValidationError::require_in_open_range(
            "pressure_angle_deg",
            self.pressure_angle_deg,
            0.0,
            90.0,
        )?;
        ValidationError::require_non_negative("thickness", self.thickness)?;
        ValidationError::require_non_negative("ring_margin", self.ring_margin)?;
        Ok(())
    }

    /// Build the closed 2D outline for this gear.
    ///
    /// One tooth is sampled as root point, rising flank, falling flank, root
    /// point, then replicated `teeth` times around the axis, each copy a
    /// rigid rotation of the first. Internal gears get their point order
    /// reversed so the ring's inner boundary winds opposite to a solid
    /// gear's outer boundary, and carry the rim circle as a second loop.
    pub fn outline(&self) -> Result<GearOutline, ValidationError> {
        self.validate()?;

        let z = self.teeth as Real;
        let pitch_radius = self.pitch_radius();
        let pressure_angle = self.pressure_angle_deg.to_radians();
        let base_radius = pitch_radius * pressure_angle.cos();
        let outer_radius = pitch_radius + self.module;
        let root_radius = pitch_radius - 1.25 * self.module;

        // Half the angular tooth thickness at the pitch circle, and the
        // offset that centers the involute on its angular slot.
        let half_tooth_angle = self.module * FRAC_PI_2 / pitch_radius;
        let angle_offset =
            -involute_angle(base_radius, pitch_radius) - half_tooth_angle / 2.0;

        // When the dedendum circle is inside the base circle the root arc
        // must meet the flanks where they actually start, otherwise it spans
        // the full angular pitch half-width.
        let (root_start, root_end) = if root_radius < base_radius {
            (angle_offset, -angle_offset)
        } else {
            (-PI / z, PI / z)
        };

        let profile = ToothProfile {
            root_radius,
            base_radius,
            outer_radius,
            angle_offset,
        };

        let mut tooth = Vec::with_capacity(2 * (FLANK_SEGMENTS + 1) + 2);
        tooth.push(polar(root_radius, root_start));
        tooth.extend(profile.face_points());
        tooth.push(polar(root_radius, root_end));

        let angular_pitch = TAU / z;
        let mut boundary = Vec::with_capacity(tooth.len() * self.teeth + 1);
        for i in 0..self.teeth {
            let rotation = i as Real * angular_pitch;
            let (cos, sin) = (rotation.cos(), rotation.sin());
            for &(x, y) in &tooth {
                boundary.push([x * cos - y * sin, x * sin + y * cos]);
            }
        }

        if self.internal {
            boundary.reverse();
        }
        boundary.push(boundary[0]);

        let rim = self.internal.then(|| {
            let radius = self.rim_radius();
            let segments = self.rim_segments();
            let mut rim = Vec::with_capacity(segments + 1);
            for i in 0..segments {
                let theta = TAU * i as Real / segments as Real;
                rim.push([radius * theta.cos(), radius * theta.sin()]);
            }
            rim.push(rim[0]);
            rim
        });

        Ok(GearOutline { boundary, rim })
    }
}

/// A gear's 2D outline, ready for extrusion.
///
/// Both loops are explicitly closed: the first point is repeated as the
/// last. `boundary` is the tooth outline, counterclockwise for external
/// gears and clockwise for internal ones. `rim` is the ring blank's outer
/// circle (counterclockwise) and is present exactly for internal gears.
#[derive(Debug, Clone, PartialEq)]
pub struct GearOutline {
    pub boundary: Vec<[Real; 2]>,
    pub rim: Option<Vec<[Real; 2]>>,
}

impl GearOutline {
    /// Points per tooth in the boundary loop.
    pub const TOOTH_POINTS: usize = 2 * (FLANK_SEGMENTS + 1) + 2;
}
