use crate::field::NoiseField;
use glam::{Vec2, Vec3};

/// A closed-surface point mesh deformed radially by the noise field.
///
/// The mesh owns two buffers of equal length:
///
/// - `base` — the rest shape, captured once and never mutated.
/// - `live` — recomputed from `base` on every [`BlobMesh::deform`].
///
/// Every live vertex is a positive radial multiple of its base vertex:
/// direction is preserved, only the distance from the origin changes.
/// For moderate amplitudes this keeps the surface a smooth perturbation
/// of the original radius and free of self-intersections.
#[derive(Debug)]
pub struct BlobMesh {
    base: Vec<Vec3>,
    live: Vec<Vec3>,
    rotation: Vec2,
    amplitude: f32,
    frequency: f32,
}

impl BlobMesh {
    /// Creates an empty mesh with no geometry captured yet.
    ///
    /// [`BlobMesh::deform`] is a no-op until [`BlobMesh::capture_base`]
    /// has been given a non-empty vertex set.
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            base: Vec::new(),
            live: Vec::new(),
            rotation: Vec2::ZERO,
            amplitude,
            frequency,
        }
    }

    /// Generates a unit-radius UV-sphere point grid.
    ///
    /// `rings` latitudinal bands (inclusive of both poles) by
    /// `segments` longitudinal steps, so the result holds
    /// `(rings + 1) * segments` vertices, all at distance 1 from the
    /// origin.
    pub fn unit_sphere(rings: usize, segments: usize) -> Vec<Vec3> {
        use std::f32::consts::{PI, TAU};

        let mut verts = Vec::with_capacity((rings + 1) * segments);
        for r in 0..=rings {
            let theta = PI * (r as f32) / (rings as f32);
            let (sin_t, cos_t) = theta.sin_cos();
            for s in 0..segments {
                let phi = TAU * (s as f32) / (segments as f32);
                verts.push(Vec3::new(sin_t * phi.cos(), cos_t, sin_t * phi.sin()));
            }
        }
        verts
    }

    /// Captures the rest shape on first availability.
    ///
    /// Only the first call with a non-empty slice takes effect; later
    /// calls are ignored so the rest shape stays the permanent
    /// reference frame for all deformation.
    pub fn capture_base(&mut self, vertices: &[Vec3]) {
        if !self.base.is_empty() || vertices.is_empty() {
            return;
        }
        self.base = vertices.to_vec();
        self.live = self.base.clone();
    }

    /// Returns `true` once a rest shape has been captured.
    pub fn has_base(&self) -> bool {
        !self.base.is_empty()
    }

    /// Recomputes the live buffer from the rest shape at `time`.
    ///
    /// For each vertex the noise field is sampled at
    /// `(x·freq + time, y·freq + time, z·freq)`, normalized to
    /// `[0, 1]`, and the vertex is scaled by `1 + n·amplitude` along
    /// its own radius. The cosmetic orientation offsets (two slow
    /// sinusoidal oscillations) are refreshed as well.
    ///
    /// No-op if no rest shape has been captured yet.
    pub fn deform(&mut self, noise: &NoiseField, time: f32) {
        if self.base.is_empty() {
            return;
        }

        let f = self.frequency;
        for (b, l) in self.base.iter().zip(self.live.iter_mut()) {
            let n = noise.sample01(b.x * f + time, b.y * f + time, b.z * f);
            *l = *b * (1.0 + n * self.amplitude);
        }

        self.rotation = Vec2::new((time * 0.3).sin() * 0.2, (time * 0.2).sin() * 0.3);
    }

    /// The immutable rest shape (empty until captured).
    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    /// The current deformed vertex buffer (same length as `base`).
    pub fn live(&self) -> &[Vec3] {
        &self.live
    }

    /// Current orientation offsets around the x and y axes, in radians.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}
