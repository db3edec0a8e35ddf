use thiserror::Error;

use crate::{
    constants::{DEFAULT_MAX_RANGE, DEFAULT_MOVE_SPEED, DEFAULT_WALL_CLEARANCE, OVERLAP_EPSILON},
    layers::LayerMask,
};

/// Rejected grapple tuning values.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SettingsError {
    #[error("max range must be a positive, finite distance (got {0})")]
    InvalidMaxRange(f32),
    #[error("wall clearance must be a non-negative, finite distance (got {0})")]
    InvalidWallClearance(f32),
    #[error("move speed must be a positive, finite speed (got {0})")]
    InvalidMoveSpeed(f32),
}

/// Grapple tuning. Set once at startup; only the max range may change at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrappleSettings {
    /// Furthest a grapple ray may reach (meters).
    pub max_range: f32,
    /// Gap between the player's collision sphere and the anchored wall (meters).
    pub wall_clearance: f32,
    /// Flight speed in meters per second.
    pub move_speed: f32,
    /// Layers the grapple ray and clearance probe can see.
    pub layer_mask: LayerMask,
}

impl Default for GrappleSettings {
    fn default() -> Self {
        Self {
            max_range: DEFAULT_MAX_RANGE,
            wall_clearance: DEFAULT_WALL_CLEARANCE,
            move_speed: DEFAULT_MOVE_SPEED,
            layer_mask: LayerMask::default(),
        }
    }
}

impl GrappleSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_max_range(self.max_range)?;
        if !self.wall_clearance.is_finite() || self.wall_clearance < 0.0 {
            return Err(SettingsError::InvalidWallClearance(self.wall_clearance));
        }
        if !self.move_speed.is_finite() || self.move_speed <= 0.0 {
            return Err(SettingsError::InvalidMoveSpeed(self.move_speed));
        }
        Ok(())
    }

    /// Distance from the surface hit to the candidate anchor.
    #[inline]
    pub fn anchor_offset(&self, player_radius: f32) -> f32 {
        player_radius + self.wall_clearance
    }

    /// Radius of the clearance probe around a candidate anchor.
    ///
    /// Slightly bigger than [`Self::anchor_offset`] so the anchored surface is always touched.
    #[inline]
    pub fn probe_radius(&self, player_radius: f32) -> f32 {
        self.anchor_offset(player_radius) + OVERLAP_EPSILON
    }
}

pub(crate) fn check_max_range(value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidMaxRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GrappleSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.max_range, 500.0);
        assert_eq!(settings.move_speed, 65.0);
    }

    #[test]
    fn validate_rejects_each_bad_field() {
        let bad_range = GrappleSettings {
            max_range: 0.0,
            ..GrappleSettings::default()
        };
        assert_eq!(
            bad_range.validate(),
            Err(SettingsError::InvalidMaxRange(0.0))
        );

        let bad_clearance = GrappleSettings {
            wall_clearance: -0.5,
            ..GrappleSettings::default()
        };
        assert_eq!(
            bad_clearance.validate(),
            Err(SettingsError::InvalidWallClearance(-0.5))
        );

        let bad_speed = GrappleSettings {
            move_speed: f32::INFINITY,
            ..GrappleSettings::default()
        };
        assert_eq!(
            bad_speed.validate(),
            Err(SettingsError::InvalidMoveSpeed(f32::INFINITY))
        );
    }

    #[test]
    fn probe_is_wider_than_the_anchor_offset() {
        let settings = GrappleSettings::default();
        assert!((settings.anchor_offset(1.0) - 1.1).abs() < 1.0e-6);
        assert!((settings.probe_radius(1.0) - 1.11).abs() < 1.0e-6);
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        let msg = SettingsError::InvalidMaxRange(-3.0).to_string();
        assert!(msg.contains("max range"));
        assert!(msg.contains("-3"));
    }
}
