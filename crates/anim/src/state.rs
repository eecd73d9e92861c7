//! Animation state and its pure advancement step.

use crate::easing::{Easing, Interpolation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed allow-list of animatable attributes.
///
/// Anything outside this list is applied immediately even when a transition
/// is requested for the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimProp {
    /// Resolved width.
    Width,
    /// Resolved height.
    Height,
    /// Offset from the parent's left edge.
    Left,
    /// Offset from the parent's right edge.
    Right,
    /// Offset from the parent's top edge.
    Top,
    /// Offset from the parent's bottom edge.
    Bottom,
    /// Left margin.
    MarginLeft,
    /// Right margin.
    MarginRight,
    /// Top margin.
    MarginTop,
    /// Bottom margin.
    MarginBottom,
    /// Left padding.
    PaddingLeft,
    /// Right padding.
    PaddingRight,
    /// Top padding.
    PaddingTop,
    /// Bottom padding.
    PaddingBottom,
    /// Left border width.
    BorderLeftWidth,
    /// Right border width.
    BorderRightWidth,
    /// Top border width.
    BorderTopWidth,
    /// Bottom border width.
    BorderBottomWidth,
}

/// Attribute values for one end (or one rendered frame) of a transition.
///
/// Ordered map so iteration — and therefore every derived value — is
/// deterministic.
pub type AnimValues = BTreeMap<AnimProp, f32>;

/// Transition configuration.
///
/// Durations are in the same time units the driving clock reports
/// (milliseconds for a wall clock).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Transition length. Default 1000.
    pub duration: f32,
    /// Time to wait before progress starts. Default 0.
    pub delay: f32,
    /// Easing curve. Default linear.
    pub easing: Easing,
    /// Value interpolation mode. Default linear.
    pub interpolation: Interpolation,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: 1000.0,
            delay: 0.0,
            easing: Easing::Linear,
            interpolation: Interpolation::Linear,
        }
    }
}

impl AnimationConfig {
    /// Build a config from opaque identifier strings, falling back to
    /// linear for anything unrecognized.
    pub fn from_identifiers(duration: f32, delay: f32, easing: &str, interpolation: &str) -> Self {
        Self {
            duration,
            delay,
            easing: Easing::resolve_or_linear(easing),
            interpolation: Interpolation::resolve_or_linear(interpolation),
        }
    }
}

/// One in-flight transition for one node.
///
/// `previous` and `target` bracket the transition; `rendered` tracks the
/// last values actually emitted so a retarget mid-flight resumes from what
/// is on screen, never from the original starting point.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    previous: AnimValues,
    target: AnimValues,
    rendered: AnimValues,
    elapsed: f32,
    config: AnimationConfig,
}

impl AnimationState {
    /// Begin a transition from `previous` to `target`.
    pub fn begin(previous: AnimValues, target: AnimValues, config: AnimationConfig) -> Self {
        let rendered = previous.clone();
        Self {
            previous,
            target,
            rendered,
            elapsed: 0.0,
            config,
        }
    }

    /// Replace an unconverged transition with a new one toward `target`.
    ///
    /// Interpolation restarts from the last rendered values, which bounds
    /// any visible discontinuity to the new transition's own magnitude.
    pub fn retarget(self, target: AnimValues, config: AnimationConfig) -> Self {
        Self::begin(self.rendered, target, config)
    }

    /// Advance by `dt` and return the interpolated attribute values.
    ///
    /// Pure: the returned state is the only carried effect. Values for
    /// attributes present in `target` but absent from `previous` are not
    /// interpolated — they jump straight to the target.
    pub fn advance(mut self, dt: f32) -> (Self, AnimValues) {
        self.elapsed += dt.max(0.0);

        let progress = if self.config.duration <= 0.0 {
            1.0
        } else {
            ((self.elapsed - self.config.delay) / self.config.duration).clamp(0.0, 1.0)
        };
        let k = self.config.easing.apply(progress);

        let mut values = AnimValues::new();
        for (&prop, &target) in &self.target {
            let value = match self.previous.get(&prop) {
                Some(&previous) => self.config.interpolation.blend(previous, target, k),
                None => target,
            };
            values.insert(prop, value);
        }

        self.rendered = values.clone();
        (self, values)
    }

    /// True once the transition has reached (or passed) its target.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.config.delay + self.config.duration
    }

    /// The authoritative end values of this transition.
    pub fn target(&self) -> &AnimValues {
        &self.target
    }

    /// The values emitted by the most recent [`advance`](Self::advance).
    pub fn rendered(&self) -> &AnimValues {
        &self.rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(AnimProp, f32)]) -> AnimValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_linear_endpoints() {
        let state = AnimationState::begin(
            values(&[(AnimProp::Width, 10.0), (AnimProp::Height, 100.0)]),
            values(&[(AnimProp::Width, 20.0), (AnimProp::Height, 0.0)]),
            AnimationConfig::default(),
        );

        let (state, at_zero) = state.advance(0.0);
        assert_eq!(at_zero[&AnimProp::Width], 10.0);
        assert_eq!(at_zero[&AnimProp::Height], 100.0);
        assert!(!state.finished());

        let (state, at_end) = state.advance(1000.0);
        assert_eq!(at_end[&AnimProp::Width], 20.0);
        assert_eq!(at_end[&AnimProp::Height], 0.0);
        assert!(state.finished());
    }

    #[test]
    fn test_midpoint_under_linear_easing() {
        let state = AnimationState::begin(
            values(&[(AnimProp::Left, 0.0)]),
            values(&[(AnimProp::Left, 50.0)]),
            AnimationConfig::default(),
        );
        let (_, mid) = state.advance(500.0);
        assert_eq!(mid[&AnimProp::Left], 25.0);
    }

    #[test]
    fn test_delay_holds_previous() {
        let config = AnimationConfig {
            delay: 200.0,
            ..Default::default()
        };
        let state = AnimationState::begin(
            values(&[(AnimProp::Top, 5.0)]),
            values(&[(AnimProp::Top, 15.0)]),
            config,
        );
        let (state, during_delay) = state.advance(150.0);
        assert_eq!(during_delay[&AnimProp::Top], 5.0);
        assert!(!state.finished());

        // 150 + 1050 covers delay + full duration.
        let (state, done) = state.advance(1050.0);
        assert_eq!(done[&AnimProp::Top], 15.0);
        assert!(state.finished());
    }

    #[test]
    fn test_retarget_resumes_from_rendered() {
        let state = AnimationState::begin(
            values(&[(AnimProp::Width, 0.0)]),
            values(&[(AnimProp::Width, 100.0)]),
            AnimationConfig::default(),
        );
        let (state, mid) = state.advance(500.0);
        assert_eq!(mid[&AnimProp::Width], 50.0);

        let state = state.retarget(values(&[(AnimProp::Width, 60.0)]), AnimationConfig::default());
        let (_, start) = state.advance(0.0);
        // No snap back to 0; the new transition starts at the rendered 50.
        assert_eq!(start[&AnimProp::Width], 50.0);
    }

    #[test]
    fn test_attribute_missing_from_previous_jumps() {
        let state = AnimationState::begin(
            AnimValues::new(),
            values(&[(AnimProp::Height, 40.0)]),
            AnimationConfig::default(),
        );
        let (_, out) = state.advance(1.0);
        assert_eq!(out[&AnimProp::Height], 40.0);
    }

    #[test]
    fn test_zero_duration_converges_immediately() {
        let config = AnimationConfig {
            duration: 0.0,
            ..Default::default()
        };
        let state = AnimationState::begin(
            values(&[(AnimProp::Width, 1.0)]),
            values(&[(AnimProp::Width, 2.0)]),
            config,
        );
        let (state, out) = state.advance(0.0);
        assert_eq!(out[&AnimProp::Width], 2.0);
        assert!(state.finished());
    }
}
