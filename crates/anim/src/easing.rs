//! Easing curves and value interpolation modes.
//!
//! Identifiers arrive as opaque strings from configuration; an identifier
//! that fails to resolve falls back to linear, because a wrong curve is
//! preferable to a transition that never runs.

use flexspace_core::Error;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use tracing::warn;

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant-rate progress.
    #[default]
    Linear,
    /// Quadratic acceleration.
    QuadIn,
    /// Quadratic deceleration.
    QuadOut,
    /// Quadratic acceleration then deceleration.
    QuadInOut,
    /// Cubic acceleration.
    CubicIn,
    /// Cubic deceleration.
    CubicOut,
    /// Cubic acceleration then deceleration.
    CubicInOut,
    /// Sinusoidal acceleration.
    SineIn,
    /// Sinusoidal deceleration.
    SineOut,
    /// Sinusoidal acceleration then deceleration.
    SineInOut,
}

impl Easing {
    /// Resolve an identifier string.
    pub fn resolve(identifier: &str) -> Result<Self, Error> {
        match identifier {
            "linear" => Ok(Self::Linear),
            "quad-in" => Ok(Self::QuadIn),
            "quad-out" => Ok(Self::QuadOut),
            "quad-in-out" => Ok(Self::QuadInOut),
            "cubic-in" => Ok(Self::CubicIn),
            "cubic-out" => Ok(Self::CubicOut),
            "cubic-in-out" => Ok(Self::CubicInOut),
            "sine-in" => Ok(Self::SineIn),
            "sine-out" => Ok(Self::SineOut),
            "sine-in-out" => Ok(Self::SineInOut),
            _ => Err(Error::AnimationConfig {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Resolve an identifier, falling back to linear on failure.
    pub fn resolve_or_linear(identifier: &str) -> Self {
        Self::resolve(identifier).unwrap_or_else(|err| {
            warn!(%err, "falling back to linear easing");
            Self::Linear
        })
    }

    /// Apply the curve to progress `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let t = 2.0 * t - 2.0;
                    1.0 - t * t / 2.0
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t = 2.0 * t - 2.0;
                    t * t * t / 2.0 + 1.0
                }
            }
            Self::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::SineInOut => 0.5 * (1.0 - (std::f32::consts::PI * t).cos()),
        }
    }
}

/// How eased progress maps onto attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Straight-line blend between previous and target.
    #[default]
    Linear,
    /// Hold the previous value until convergence, then jump to the target.
    Discrete,
}

impl Interpolation {
    /// Resolve an identifier string.
    pub fn resolve(identifier: &str) -> Result<Self, Error> {
        match identifier {
            "linear" => Ok(Self::Linear),
            "discrete" => Ok(Self::Discrete),
            _ => Err(Error::AnimationConfig {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Resolve an identifier, falling back to linear on failure.
    pub fn resolve_or_linear(identifier: &str) -> Self {
        Self::resolve(identifier).unwrap_or_else(|err| {
            warn!(%err, "falling back to linear interpolation");
            Self::Linear
        })
    }

    /// Blend from `previous` toward `target` at eased progress `k`.
    pub fn blend(self, previous: f32, target: f32, k: f32) -> f32 {
        match self {
            Self::Linear => previous + (target - previous) * k,
            Self::Discrete => {
                if k >= 1.0 {
                    target
                } else {
                    previous
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 10] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
    ];

    #[test]
    fn test_all_curves_hit_endpoints() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-6, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-6, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_resolve_identifiers() {
        assert_eq!(Easing::resolve("quad-in"), Ok(Easing::QuadIn));
        assert!(Easing::resolve("bounce-backflip").is_err());
        assert_eq!(Easing::resolve_or_linear("bounce-backflip"), Easing::Linear);
        assert_eq!(Interpolation::resolve_or_linear("nope"), Interpolation::Linear);
    }

    #[test]
    fn test_discrete_blend_holds_until_convergence() {
        let blend = Interpolation::Discrete;
        assert_eq!(blend.blend(10.0, 20.0, 0.0), 10.0);
        assert_eq!(blend.blend(10.0, 20.0, 0.999), 10.0);
        assert_eq!(blend.blend(10.0, 20.0, 1.0), 20.0);
    }
}
