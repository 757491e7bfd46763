/// An 8-bit RGBA color with straight (non-premultiplied) alpha.
///
/// Used for the tile raster and the gradient configuration; the core
/// deliberately carries its own color type so the host can map it to
/// whatever its rendering library expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// An opaque color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Componentwise linear interpolation toward `other`.
    ///
    /// `t` is clamped to `[0, 1]`, so the result always lies between
    /// the two endpoints.
    pub fn lerp(self, other: Rgba8, t: f32) -> Rgba8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Rgba8::rgb(10, 20, 30);
        let b = Rgba8::rgb(200, 100, 0);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_averages_channels() {
        let a = Rgba8::rgb(0, 100, 200);
        let b = Rgba8::rgb(100, 200, 0);
        assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(50, 150, 100));
    }

    #[test]
    fn lerp_clamps_t_outside_the_unit_interval() {
        let a = Rgba8::rgb(10, 10, 10);
        let b = Rgba8::rgb(20, 20, 20);

        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
    }
}
