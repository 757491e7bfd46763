use glam::Vec3;
use rand::Rng;

/// One particle of the drift field.
///
/// `initial` is fixed at spawn and kept for diagnostics and drift
/// bounds checks; `pos` is the mutable current position the host
/// renders.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub initial: Vec3,
    pub pos: Vec3,
}

/// A fixed-count particle cloud with smooth pseudo-turbulent drift.
///
/// Particles are never destroyed or respawned during a session; the
/// count is fixed at construction. Each tick adds a small trigonometric
/// offset per axis (sine on x/z, cosine on y, so the axes decorrelate)
/// and advances a slow rigid rotation of the whole cloud about the
/// y axis.
///
/// The offset is applied to the *current* position rather than being
/// re-derived from `initial`, so over very long runs the cloud can
/// wander; the per-tick displacement is bounded by `amplitude` per
/// axis.
#[derive(Debug)]
pub struct DriftField {
    pub points: Vec<Particle>,
    amplitude: f32,
    phase_scale: f32,
    rate: f32,
    rotation_y: f32,
}

impl DriftField {
    /// Default per-tick drift offset magnitude.
    pub const DEFAULT_AMPLITUDE: f32 = 0.01;
    /// Default coupling between a particle's coordinate and its phase.
    pub const DEFAULT_PHASE_SCALE: f32 = 0.5;
    /// Default scale applied to the shared clock for this field.
    pub const DEFAULT_RATE: f32 = 0.5;

    /// Spawns `count` particles uniformly in a centered cube of the
    /// given half-extent, using the caller's RNG.
    ///
    /// Passing a seeded RNG makes the spawn layout reproducible.
    pub fn spawn_in_cube(
        count: usize,
        half_extent: f32,
        amplitude: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let points = (0..count)
            .map(|_| {
                let pos = Vec3::new(
                    rng.random_range(-half_extent..=half_extent),
                    rng.random_range(-half_extent..=half_extent),
                    rng.random_range(-half_extent..=half_extent),
                );
                Particle { initial: pos, pos }
            })
            .collect();

        Self {
            points,
            amplitude,
            phase_scale: Self::DEFAULT_PHASE_SCALE,
            rate: Self::DEFAULT_RATE,
            rotation_y: 0.0,
        }
    }

    /// Advances the drift to the given clock value.
    ///
    /// For each particle, with `t = time · rate`:
    ///
    /// ```text
    /// pos.x += sin(t + pos.x · phase_scale) · amplitude
    /// pos.y += cos(t + pos.y · phase_scale) · amplitude
    /// pos.z += sin(t + pos.z · phase_scale) · amplitude
    /// ```
    ///
    /// and the rigid cloud rotation is set to `t · 0.1`.
    pub fn advance(&mut self, time: f32) {
        let t = time * self.rate;
        self.rotation_y = t * 0.1;

        let amp = self.amplitude;
        let phase = self.phase_scale;
        for p in &mut self.points {
            p.pos.x += (t + p.pos.x * phase).sin() * amp;
            p.pos.y += (t + p.pos.y * phase).cos() * amp;
            p.pos.z += (t + p.pos.z * phase).sin() * amp;
        }
    }

    /// Current rigid rotation of the whole cloud about the y axis,
    /// in radians. Applied by the host as a transform on top of the
    /// per-particle positions.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Number of particles; fixed for the lifetime of the field.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` for a zero-particle field.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spawn(count: usize, seed: u64) -> DriftField {
        let mut rng = StdRng::seed_from_u64(seed);
        DriftField::spawn_in_cube(count, 5.0, DriftField::DEFAULT_AMPLITUDE, &mut rng)
    }

    #[test]
    fn spawn_respects_count_and_cube_bounds() {
        let field = spawn(200, 1);
        assert_eq!(field.len(), 200);

        for p in &field.points {
            assert_eq!(p.initial, p.pos);
            for c in p.pos.to_array() {
                assert!((-5.0..=5.0).contains(&c), "spawned outside cube: {c}");
            }
        }
    }

    #[test]
    fn spawn_is_reproducible_for_a_fixed_seed() {
        let a = spawn(50, 42);
        let b = spawn(50, 42);
        for (pa, pb) in a.points.iter().zip(&b.points) {
            assert_eq!(pa.pos, pb.pos);
        }
    }

    #[test]
    fn count_never_changes_while_advancing() {
        let mut field = spawn(100, 3);
        for step in 0..50 {
            field.advance(step as f32 * 0.003);
        }
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn single_tick_displacement_is_bounded_by_amplitude() {
        let mut field = spawn(100, 4);
        let before: Vec<Vec3> = field.points.iter().map(|p| p.pos).collect();

        field.advance(1.7);

        for (p, old) in field.points.iter().zip(&before) {
            let delta = p.pos - *old;
            for c in delta.to_array() {
                assert!(
                    c.abs() <= DriftField::DEFAULT_AMPLITUDE + 1e-6,
                    "per-tick offset too large: {c}"
                );
            }
        }
    }

    #[test]
    fn drift_stays_bounded_over_a_simulation_window() {
        let mut field = spawn(100, 5);
        let ticks = 600;

        for step in 0..ticks {
            field.advance(step as f32 * 0.003);
        }

        // Each tick moves a particle at most `amplitude` per axis, so the
        // total displacement over the window is bounded by ticks · amplitude.
        let bound = ticks as f32 * DriftField::DEFAULT_AMPLITUDE + 1e-4;
        for p in &field.points {
            let offset = p.pos - p.initial;
            for c in offset.to_array() {
                assert!(c.abs() <= bound, "runaway drift: {c} > {bound}");
            }
        }
    }

    #[test]
    fn advance_is_deterministic_for_identical_spawns() {
        let mut a = spawn(50, 6);
        let mut b = spawn(50, 6);

        for step in 0..20 {
            let t = step as f32 * 0.003;
            a.advance(t);
            b.advance(t);
        }

        for (pa, pb) in a.points.iter().zip(&b.points) {
            assert_eq!(pa.pos, pb.pos);
        }
    }

    #[test]
    fn cloud_rotation_follows_the_clock() {
        let mut field = spawn(10, 7);
        field.advance(2.0);
        let expected = 2.0 * DriftField::DEFAULT_RATE * 0.1;
        assert!((field.rotation_y() - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_particle_field_is_harmless() {
        let mut field = spawn(0, 8);
        assert!(field.is_empty());
        field.advance(1.0);
        assert_eq!(field.len(), 0);
    }
}
