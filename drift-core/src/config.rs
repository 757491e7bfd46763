use crate::types::Rgba8;
use thiserror::Error;

/// Construction-time configuration for a scene.
///
/// All fields have defaults matching the reference visuals. Invalid
/// values fail [`Config::validate`] rather than being clamped, so a
/// misconfiguration surfaces immediately instead of silently changing
/// the animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Noise seed; `None` draws one at construction and keeps it.
    pub seed: Option<u32>,
    /// Radial deformation amplitude of the blob mesh.
    pub amplitude: f32,
    /// Spatial frequency at which the mesh samples the noise field.
    pub frequency: f32,
    /// Number of particles; fixed for the session.
    pub particle_count: usize,
    /// Half-extent of the centered particle spawn cube.
    pub particle_half_extent: f32,
    /// Per-tick particle drift offset magnitude.
    pub drift_amplitude: f32,
    /// Edge length of one noise tile, in pixels.
    pub tile_size: u32,
    /// Raster gradient colors, top then bottom.
    pub colors: [Rgba8; 2],
    /// Clock advance per tick.
    pub speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            amplitude: 0.3,
            frequency: 0.3,
            particle_count: 1000,
            particle_half_extent: 5.0,
            drift_amplitude: 0.01,
            tile_size: 30,
            colors: [Rgba8::rgb(0x0f, 0x17, 0x2a), Rgba8::rgb(0x3b, 0x82, 0xf6)],
            speed: 0.003,
        }
    }
}

/// A configuration rejected at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("tile_size must be at least 1 pixel")]
    ZeroTileSize,
}

impl Config {
    /// Checks every numeric field, returning the first violation.
    ///
    /// ### Errors
    /// - [`ConfigError::NonFinite`] for any NaN or infinite float field.
    /// - [`ConfigError::Negative`] for a negative amplitude.
    /// - [`ConfigError::NonPositive`] for a zero or negative speed or
    ///   spawn half-extent.
    /// - [`ConfigError::ZeroTileSize`] for a zero-pixel tile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("particle_half_extent", self.particle_half_extent),
            ("drift_amplitude", self.drift_amplitude),
            ("speed", self.speed),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        for (name, value) in [
            ("amplitude", self.amplitude),
            ("drift_amplitude", self.drift_amplitude),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        for (name, value) in [
            ("speed", self.speed),
            ("particle_half_extent", self.particle_half_extent),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn nan_speed_is_rejected() {
        let cfg = Config {
            speed: f32::NAN,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonFinite { name: "speed", .. })
        ));
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        let cfg = Config {
            amplitude: -0.1,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative {
                name: "amplitude",
                ..
            })
        ));
    }

    #[test]
    fn zero_speed_is_rejected() {
        let cfg = Config {
            speed: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { name: "speed", .. })
        ));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let cfg = Config {
            tile_size: 0,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn zero_particle_count_is_allowed() {
        let cfg = Config {
            particle_count: 0,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn errors_render_a_readable_message() {
        let err = Config {
            speed: -1.0,
            ..Config::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "speed must be positive, got -1");
    }
}
