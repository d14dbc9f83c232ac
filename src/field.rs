//! Spiral-galaxy point synthesis.
//!
//! The algorithm, per point index `i`:
//!  1. Draw a base radius `r = uniform(0,1) * radius`.
//!  2. Twist by `spin_angle = r * spin` — outer points lag further behind,
//!     which is what curls the straight arms into a spiral.
//!  3. Assign the point to arm `i % branches`; the arm angle is the residue
//!     divided evenly over the full turn.  Index residue (not a random draw)
//!     keeps arm populations within one point of each other.
//!  4. Jitter each axis by `uniform(0,1)^randomness_power * ±randomness * r`.
//!     The power concentrates most offsets near zero while leaving rare large
//!     excursions, and scaling by `r` keeps the core tight.
//!  5. Place the point on the XZ plane at the twisted arm angle, offset by the
//!     jitter; colour is the inside→outside lerp by `r / radius`.
//!
//! Generation is a pure function of [`GalaxyParams`]: the buffer is filled in
//! fixed-size chunks on rayon's pool, and each chunk derives its own
//! [`SmallRng`] from `(params.seed, chunk index)`, so the output never depends
//! on thread count or scheduling.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;

use crate::params::{GalaxyParams, ParamError};

/// Points per RNG chunk.  Fixed so the chunk→seed mapping (and therefore the
/// generated buffer) is independent of how rayon schedules the chunks.
const CHUNK_POINTS: usize = 16 * 1024;

/// Error returned when generation cannot produce a buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The parameter set failed [`GalaxyParams::validate`].
    InvalidParams(ParamError),
    /// Buffer allocation failed for this many points.
    Allocation { points: u32 },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidParams(inner) => write!(f, "invalid parameters: {inner}"),
            GenerateError::Allocation { points } => {
                write!(f, "failed to allocate point buffers for {points} points")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<ParamError> for GenerateError {
    fn from(inner: ParamError) -> Self {
        GenerateError::InvalidParams(inner)
    }
}

/// Positions and colours produced by one generation pass.
///
/// Both sequences have exactly `count` entries; colour components are linear
/// RGB in `[0, 1]`.  The buffer is plain data — turning it into something the
/// renderer can draw is [`crate::points`]'s job.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl PointBuffer {
    /// Number of points in the buffer.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when the buffer holds no points (a valid, empty field).
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate the point field described by `params`.
///
/// Validates first; a rejected parameter set costs nothing.  Allocation goes
/// through `try_reserve_exact`, so an extreme `count` surfaces as
/// [`GenerateError::Allocation`] instead of aborting the process.  Equal
/// `params` (seed included) always produce identical buffers.
pub fn generate(params: &GalaxyParams) -> Result<PointBuffer, GenerateError> {
    params.validate()?;

    let count = params.count as usize;
    let mut positions = alloc_buffer(count, params.count)?;
    let mut colors = alloc_buffer(count, params.count)?;

    positions
        .par_chunks_mut(CHUNK_POINTS)
        .zip(colors.par_chunks_mut(CHUNK_POINTS))
        .enumerate()
        .for_each(|(chunk, (pos, col))| {
            let mut rng = SmallRng::seed_from_u64(chunk_seed(params.seed, chunk as u64));
            let base = chunk * CHUNK_POINTS;
            fill_chunk(params, base, pos, col, &mut rng);
        });

    Ok(PointBuffer { positions, colors })
}

/// Synthesize one chunk of points starting at global index `base`.
///
/// Draw order per point is fixed (radius, then sign/magnitude pairs for x, y,
/// z) — part of the reproducibility contract, do not reorder.
fn fill_chunk<R: Rng>(
    params: &GalaxyParams,
    base: usize,
    positions: &mut [[f32; 3]],
    colors: &mut [[f32; 3]],
    rng: &mut R,
) {
    let branches = params.branches as usize;
    for (offset, (pos, col)) in positions.iter_mut().zip(colors.iter_mut()).enumerate() {
        let index = base + offset;

        let r = rng.random::<f32>() * params.radius;
        let spin_angle = r * params.spin;
        let branch_angle = (index % branches) as f32 / branches as f32 * TAU;

        let jx = jitter(rng, params, r);
        let jy = jitter(rng, params, r);
        let jz = jitter(rng, params, r);

        let angle = branch_angle + spin_angle;
        *pos = [angle.cos() * r + jx, jy, angle.sin() * r + jz];

        // r <= radius by construction, so the fraction never needs clamping.
        let t = r / params.radius;
        *col = [
            lerp(params.inside_color[0], params.outside_color[0], t),
            lerp(params.inside_color[1], params.outside_color[1], t),
            lerp(params.inside_color[2], params.outside_color[2], t),
        ];
    }
}

/// One axis of jitter: a power-law magnitude with a random sign, scaled by the
/// point's base radius.
#[inline]
fn jitter<R: Rng>(rng: &mut R, params: &GalaxyParams, r: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(params.randomness_power);
    let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
    magnitude * sign * params.randomness * r
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn alloc_buffer(count: usize, points: u32) -> Result<Vec<[f32; 3]>, GenerateError> {
    let mut buffer: Vec<[f32; 3]> = Vec::new();
    buffer
        .try_reserve_exact(count)
        .map_err(|_| GenerateError::Allocation { points })?;
    buffer.resize(count, [0.0; 3]);
    Ok(buffer)
}

/// Derive an independent RNG seed for one chunk (splitmix64-style finalizer
/// over the golden-ratio increment).
#[inline]
fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed ^ chunk.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
