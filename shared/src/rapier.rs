use rapier3d::{na::UnitQuaternion, prelude::*};

use crate::layers::CollisionLayer;

/// Identifier of a static world collider, stable across rebuilds of the query world.
pub type ColliderId = u32;

/// Canonical definition of an immutable level collider.
///
/// Level data (hand-authored in the client, or loaded from elsewhere) maps to this type, then
/// [`crate::StaticQueryWorld::build`] turns a list of them into a queryable scene.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier; also decides insertion order.
    pub id: ColliderId,
    /// Human-readable name shown in grapple diagnostics.
    pub name: String,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
    /// Layer used to filter grapple rays and overlap probes.
    pub layer: CollisionLayer,
}

impl WorldStaticDef {
    /// Axis-aligned definition on the `Level` layer.
    pub fn level(
        id: ColliderId,
        name: impl Into<String>,
        translation: Vector<f32>,
        shape: ColliderShapeDef,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            layer: CollisionLayer::Level,
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) whose normal is `rotation * +Y`.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented box with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

/// Pack a collider's id and layer into Rapier's `user_data` slot.
///
/// Layout: bits 0..32 hold the id, bits 32..40 hold the layer's bit index.
pub const fn encode_user_data(id: ColliderId, layer: CollisionLayer) -> u128 {
    (id as u128) | ((layer.bit_index() as u128) << 32)
}

/// Inverse of [`encode_user_data`]. Unknown layer indices decode as `Default`.
pub fn decode_user_data(user_data: u128) -> (ColliderId, CollisionLayer) {
    let id = (user_data & 0xFFFF_FFFF) as ColliderId;
    let layer = CollisionLayer::from_bit_index(((user_data >> 32) & 0xFF) as u8)
        .unwrap_or(CollisionLayer::Default);
    (id, layer)
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The returned collider has an identity local pose and carries the def's id and layer in its
/// user data; callers position it with `def.translation` / `def.rotation`.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // The half-space is expressed in the collider's local frame (normal +Y), so the
            // world pose supplies the rotation and only the offset is applied locally.
            ColliderBuilder::halfspace(Vector::y_axis())
                .translation(Vector::y() * *offset_along_normal)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius),
    };

    builder
        .user_data(encode_user_data(def.id, def.layer))
        .build()
}
