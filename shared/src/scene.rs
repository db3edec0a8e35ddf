/*!
Collaborator interfaces the gameplay core talks to.

The grapple and the level goal never touch an engine directly. They ask a [`SceneQuery`] for
rays and overlaps and read/write the player through [`PlayerBody`]. The Rapier-backed
[`crate::StaticQueryWorld`] and the Bevy client implement these; tests implement them with
scripted stubs.
*/

use nalgebra as na;

use crate::{constants::DEFAULT_PLAYER_RADIUS, layers::LayerMask, rapier::ColliderId};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space point where the ray met the surface.
    pub point: Point3,
    /// Unit surface normal at `point`, facing back toward the ray origin.
    pub normal: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    /// Collider that was hit.
    pub collider: ColliderId,
}

/// Synchronous spatial queries against the collidable world.
pub trait SceneQuery {
    /// Cast a ray from `origin` along the unit `direction`, up to `max_range`.
    ///
    /// Only colliders on layers in `mask` are considered.
    fn raycast(
        &self,
        origin: Point3,
        direction: Vec3,
        max_range: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// All colliders on layers in `mask` intersecting the sphere at `center` with `radius`.
    fn overlap_sphere(&self, center: Point3, radius: f32, mask: LayerMask) -> Vec<ColliderId>;

    /// Display name of a collider, if the scene knows one.
    fn collider_name(&self, _id: ColliderId) -> Option<&str> {
        None
    }
}

/// The player as seen by the gameplay core.
pub trait PlayerBody {
    fn position(&self) -> Point3;

    fn set_position(&mut self, position: Point3);

    /// Radius of the player's collision sphere (meters).
    fn radius(&self) -> f32;

    /// Unit look direction.
    fn forward(&self) -> Vec3;
}

/// Plain-data player, handy for headless simulation and tests.
///
/// Forward is the local `+Z` axis rotated by `rotation`.
#[derive(Clone, Copy, Debug)]
pub struct PlayerState {
    pub position: Point3,
    pub rotation: Quat,
    pub radius: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Quat::identity(),
            radius: DEFAULT_PLAYER_RADIUS,
        }
    }
}

impl PlayerState {
    pub fn new(position: Point3, radius: f32) -> Self {
        Self {
            position,
            radius,
            ..Self::default()
        }
    }

    /// Shortest-arc rotation so that forward points along `direction`.
    ///
    /// Looking straight back along -Z is a half turn about +Y. A zero `direction` leaves the
    /// rotation untouched.
    pub fn looking_along(mut self, direction: Vec3) -> Self {
        let Some(direction) = direction.try_normalize(1.0e-6) else {
            return self;
        };
        self.rotation = Quat::rotation_between(&Vec3::z(), &direction).unwrap_or_else(|| {
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::PI)
        });
        self
    }
}

impl PlayerBody for PlayerState {
    fn position(&self) -> Point3 {
        self.position
    }

    fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_player_looks_down_positive_z() {
        let player = PlayerState::default();
        assert!((player.forward() - Vec3::z()).norm() < 1.0e-6);
    }

    #[test]
    fn looking_along_turns_forward_to_the_requested_direction() {
        let player = PlayerState::default().looking_along(Vec3::x());
        assert!((player.forward() - Vec3::x()).norm() < 1.0e-6);
    }

    #[test]
    fn looking_straight_back_turns_around() {
        let player = PlayerState::default().looking_along(-Vec3::z() * 3.0);
        assert!((player.forward() + Vec3::z()).norm() < 1.0e-5);

        let unchanged = player.looking_along(Vec3::zeros());
        assert_eq!(unchanged.rotation, player.rotation);
    }
}
