//! Generation parameters for the galaxy point field.
//!
//! [`GalaxyParams`] is the single source of truth for what the field looks
//! like.  The host owns it as a Bevy resource; mutating it (directly or via
//! the optional egui panel) is what schedules a debounced regeneration in
//! [`crate::regen`].  Every field has a default that keeps generation well
//! defined (`branches >= 1`, `radius > 0`), and [`GalaxyParams::validate`]
//! rejects anything outside the documented ranges before a single point is
//! drawn.

use bevy::ecs::resource::Resource;

/// Maximum allowed point count per generation.
///
/// Capped at 2^24 to bound peak memory usage.  Each point expands to a
/// four-vertex billboard quad, so at 16.7 M points the mesh buffers alone
/// come to ~2.8 GB before the render upload copy exists; one more doubling
/// OOMs 8 GB machines mid-regeneration.
pub const MAX_POINTS: u32 = 1 << 24;

/// Error returned when a [`GalaxyParams`] value is outside its valid range.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A numeric field violated its documented range (or was not finite).
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    /// `count` exceeded [`MAX_POINTS`].
    TooManyPoints { count: u32, max: u32 },
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "parameter `{field}` = {value} is out of range (expected {expected})"),
            ParamError::TooManyPoints { count, max } => {
                write!(f, "point count {count} exceeds MAX_POINTS={max}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Configures the shape, palette, and motion of the generated galaxy.
///
/// Distances are in world units, angles in radians.  `seed` makes generation
/// a pure function of this struct: two equal `GalaxyParams` always produce
/// byte-identical point buffers.
#[derive(Resource, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalaxyParams {
    /// Number of points.  `0` is valid and yields an empty field.
    pub count: u32,
    /// Billboard quad side length at unit view distance.
    pub point_size: f32,
    /// Maximum field extent; every point's base radius is drawn from `[0, radius]`.
    pub radius: f32,
    /// Jitter magnitude scale.  `0` puts every point exactly on its arm curve.
    pub randomness: f32,
    /// Jitter distribution sharpness (`>= 1`).  Higher values concentrate
    /// jitter near zero while keeping rare large excursions.
    pub randomness_power: f32,
    /// Angular twist in radians per unit radius.
    pub spin: f32,
    /// Number of spiral arms (`>= 1`).  Points are assigned to arms by index
    /// residue, so arm populations differ by at most one.
    pub branches: u32,
    /// Colour at radius 0, linear RGB with components in `[0, 1]`.
    pub inside_color: [f32; 3],
    /// Colour at the outer edge, linear RGB with components in `[0, 1]`.
    pub outside_color: [f32; 3],
    /// Yaw applied by the animation driver, radians per second.  Independent
    /// of generation.
    pub rotation_speed: f32,
    /// Scale points down with view distance (perspective-correct sprites).
    /// When `false` they keep a constant on-screen size.
    pub size_attenuation: bool,
    pub seed: u64,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            point_size: 0.01,
            radius: 5.0,
            randomness: 0.2,
            randomness_power: 3.0,
            spin: 1.0,
            branches: 3,
            inside_color: [1.0, 0.376, 0.188],
            outside_color: [0.106, 0.227, 0.518],
            rotation_speed: 0.3,
            size_attenuation: true,
            seed: 42,
        }
    }
}

impl GalaxyParams {
    /// Check every field against its documented range.
    ///
    /// Call before generating; [`crate::field::generate`] does so itself.
    /// A negative `count` is unrepresentable (`u32`), so only the upper
    /// [`MAX_POINTS`] bound is enforced here.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.count > MAX_POINTS {
            return Err(ParamError::TooManyPoints {
                count: self.count,
                max: MAX_POINTS,
            });
        }
        require(
            self.radius.is_finite() && self.radius > 0.0,
            "radius",
            self.radius as f64,
            "> 0",
        )?;
        require(
            self.point_size.is_finite() && self.point_size > 0.0,
            "point_size",
            self.point_size as f64,
            "> 0",
        )?;
        require(
            self.randomness.is_finite() && self.randomness >= 0.0,
            "randomness",
            self.randomness as f64,
            ">= 0",
        )?;
        require(
            self.randomness_power.is_finite() && self.randomness_power >= 1.0,
            "randomness_power",
            self.randomness_power as f64,
            ">= 1",
        )?;
        require(self.branches >= 1, "branches", self.branches as f64, ">= 1")?;
        require(self.spin.is_finite(), "spin", self.spin as f64, "finite")?;
        require(
            self.rotation_speed.is_finite(),
            "rotation_speed",
            self.rotation_speed as f64,
            "finite",
        )?;
        for (field, color) in [
            ("inside_color", self.inside_color),
            ("outside_color", self.outside_color),
        ] {
            for channel in color {
                require(
                    channel.is_finite() && (0.0..=1.0).contains(&channel),
                    field,
                    channel as f64,
                    "each channel in [0, 1]",
                )?;
            }
        }
        Ok(())
    }
}

#[inline]
fn require(
    ok: bool,
    field: &'static str,
    value: f64,
    expected: &'static str,
) -> Result<(), ParamError> {
    if ok {
        Ok(())
    } else {
        Err(ParamError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GalaxyParams::default()
            .validate()
            .expect("default parameters must always generate");
    }

    #[test]
    fn rejects_each_invalid_field() {
        let cases: [(&str, fn(&mut GalaxyParams)); 7] = [
            ("radius", |p| p.radius = 0.0),
            ("radius", |p| p.radius = f32::NAN),
            ("point_size", |p| p.point_size = -0.01),
            ("randomness", |p| p.randomness = -0.1),
            ("randomness_power", |p| p.randomness_power = 0.5),
            ("branches", |p| p.branches = 0),
            ("inside_color", |p| p.inside_color[1] = 1.5),
        ];
        for (field, break_it) in cases {
            let mut params = GalaxyParams::default();
            break_it(&mut params);
            let err = params
                .validate()
                .expect_err("validation must reject the broken field");
            match err {
                ParamError::OutOfRange { field: got, .. } => {
                    assert_eq!(got, field, "wrong field reported: {err}")
                }
                other => panic!("expected OutOfRange for `{field}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn count_is_capped_not_floored() {
        let mut params = GalaxyParams {
            count: 0,
            ..Default::default()
        };
        assert!(params.validate().is_ok(), "count = 0 is a valid empty field");

        params.count = MAX_POINTS + 1;
        assert_eq!(
            params.validate(),
            Err(ParamError::TooManyPoints {
                count: MAX_POINTS + 1,
                max: MAX_POINTS
            })
        );
    }

    /// Saved presets deserialize into valid parameter sets.
    #[test]
    fn preset_json_parses() {
        let preset = r#"{
            "count": 250000,
            "point_size": 0.008,
            "radius": 7.5,
            "randomness": 0.45,
            "randomness_power": 4.0,
            "spin": -1.6,
            "branches": 5,
            "inside_color": [0.95, 0.85, 0.6],
            "outside_color": [0.15, 0.05, 0.35],
            "rotation_speed": 0.12,
            "size_attenuation": true,
            "seed": 9001
        }"#;
        let params: GalaxyParams = serde_json::from_str(preset).expect("preset must parse");
        assert_eq!(params.branches, 5);
        params.validate().expect("preset must be generatable");
    }
}
