use serde::{Deserialize, Serialize};

use crate::{InteractionError, InteractionResult};

/// Below this value, the trigger or grip is considered released
pub const TRIGGER_OFF_VALUE: f32 = 0.1;
/// At or above this value, an analog trigger counts as a click on controllers without a click sensor
pub const TRIGGER_ON_VALUE: f32 = 0.9;
/// Above this value, the grip counts as squeezed
pub const SECONDARY_ON_VALUE: f32 = 0.5;
/// How far away (in metres, before sensor scaling) an entity's position may be from the hand
pub const NEAR_GRAB_RADIUS: f32 = 1.0;
/// How far away (in metres) the hand may be from an entity's bounding box
pub const TEAR_AWAY_DISTANCE: f32 = 0.15;
/// Amplitude of the pulse played when the hand moves onto a new candidate
pub const HAPTIC_PULSE_STRENGTH: f32 = 1.0;
/// Duration of the pulse played when the hand moves onto a new candidate
pub const HAPTIC_PULSE_DURATION_MS: f32 = 13.0;

/// Thresholds injected into the dispatcher and every controller module.
///
/// Input values are normalised to `[0, 1]`. Distances are in world space metres; the near grab
/// radius is additionally multiplied by the avatar's sensor scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Trigger/grip release threshold
    pub trigger_off: f32,
    /// Analog trigger click threshold
    pub trigger_on: f32,
    /// Grip squeeze threshold, also used for the two-handed override
    pub secondary_on: f32,
    /// Maximum hand to entity position distance, in metres
    pub near_grab_radius: f32,
    /// Maximum hand to bounding box distance, in metres
    pub tear_away_distance: f32,
    /// Haptic pulse amplitude
    pub haptic_pulse_strength: f32,
    /// Haptic pulse duration, in milliseconds
    pub haptic_pulse_duration_ms: f32,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            trigger_off: TRIGGER_OFF_VALUE,
            trigger_on: TRIGGER_ON_VALUE,
            secondary_on: SECONDARY_ON_VALUE,
            near_grab_radius: NEAR_GRAB_RADIUS,
            tear_away_distance: TEAR_AWAY_DISTANCE,
            haptic_pulse_strength: HAPTIC_PULSE_STRENGTH,
            haptic_pulse_duration_ms: HAPTIC_PULSE_DURATION_MS,
        }
    }
}

impl GrabConfig {
    /// Parse a configuration from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        let config: GrabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every threshold is in range and that the release threshold sits below the
    /// press thresholds.
    pub fn validate(&self) -> InteractionResult<()> {
        let normalised = [
            ("trigger_off", self.trigger_off),
            ("trigger_on", self.trigger_on),
            ("secondary_on", self.secondary_on),
            ("haptic_pulse_strength", self.haptic_pulse_strength),
        ];
        for (name, value) in normalised {
            if !(0.0..=1.0).contains(&value) {
                return Err(InteractionError::InvalidConfig(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }

        if self.trigger_off >= self.trigger_on || self.trigger_off >= self.secondary_on {
            return Err(InteractionError::InvalidConfig(format!(
                "trigger_off ({}) must be below trigger_on ({}) and secondary_on ({})",
                self.trigger_off, self.trigger_on, self.secondary_on
            )));
        }

        let distances = [
            ("near_grab_radius", self.near_grab_radius),
            ("tear_away_distance", self.tear_away_distance),
            ("haptic_pulse_duration_ms", self.haptic_pulse_duration_ms),
        ];
        for (name, value) in distances {
            if value.is_nan() || value < 0.0 {
                return Err(InteractionError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GrabConfig::from_json(r#"{ "near_grab_radius": 0.5 }"#).unwrap();
        assert_relative_eq!(config.near_grab_radius, 0.5);
        assert_relative_eq!(config.trigger_off, TRIGGER_OFF_VALUE);
        assert_relative_eq!(config.tear_away_distance, TEAR_AWAY_DISTANCE);
    }

    #[test]
    fn test_default_is_valid() {
        GrabConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let result = GrabConfig::from_json(r#"{ "trigger_off": 0.6, "secondary_on": 0.5 }"#);
        assert!(matches!(result, Err(InteractionError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = GrabConfig {
            trigger_on: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GrabConfig {
            tear_away_distance: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_garbage_json() {
        let result = GrabConfig::from_json("not json");
        assert!(matches!(result, Err(InteractionError::Json(_))));
    }
}
