use bevy::prelude::*;
use nalgebra::Vector3;
use shared::{CollisionLayer, ColliderId, ColliderShapeDef, StaticQueryWorld, WorldStaticDef};

use crate::convert::from_rotation;

/// Where the player starts, and returns to on respawn.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.5, 12.0);

/// Falling below this height sends the player back to the spawn.
pub const KILL_PLANE_Y: f32 = -40.0;

pub const GOAL_TRIGGER_ID: ColliderId = 100;
pub const GOAL_POSITION: Vec3 = Vec3::new(0.0, 22.0, -26.0);

/// Scene queries for the current level. Built once from [`level_statics`].
#[derive(Resource)]
pub struct QueryWorld(pub StaticQueryWorld);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(QueryWorld(StaticQueryWorld::build(level_statics())));
    app.add_systems(Startup, setup);
}

/// Static colliders making up the level.
pub fn level_statics() -> Vec<WorldStaticDef> {
    vec![
        WorldStaticDef::level(
            1,
            "Floor",
            Vector3::new(0.0, -0.5, 0.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(30.0, 0.5, 30.0),
            },
        ),
        WorldStaticDef::level(
            2,
            "North Wall",
            Vector3::new(0.0, 12.0, -30.5),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(30.0, 12.0, 0.5),
            },
        ),
        WorldStaticDef::level(
            3,
            "Pillar",
            Vector3::new(-12.0, 6.0, -12.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(2.0, 6.0, 2.0),
            },
        ),
        WorldStaticDef::level(
            4,
            "Ledge",
            Vector3::new(12.0, 10.0, -18.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(4.0, 0.5, 4.0),
            },
        ),
        WorldStaticDef::level(
            5,
            "Boulder",
            Vector3::new(15.0, 2.0, 6.0),
            ColliderShapeDef::Sphere { radius: 3.0 },
        ),
        WorldStaticDef::level(
            6,
            "Column",
            Vector3::new(-20.0, 10.0, 8.0),
            ColliderShapeDef::CylinderY {
                radius: 1.5,
                half_height: 10.0,
            },
        ),
        WorldStaticDef::level(
            7,
            "Totem",
            Vector3::new(6.0, 3.0, -4.0),
            ColliderShapeDef::CapsuleY {
                radius: 1.0,
                half_height: 2.0,
            },
        ),
        WorldStaticDef::level(
            10,
            "Goal Platform",
            Vector3::new(GOAL_POSITION.x, 20.0, GOAL_POSITION.z + 1.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(3.0, 0.5, 3.5),
            },
        ),
        WorldStaticDef::level(
            GOAL_TRIGGER_ID,
            "Goal Trigger",
            Vector3::new(GOAL_POSITION.x, GOAL_POSITION.y, GOAL_POSITION.z),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(1.5, 1.5, 1.5),
            },
        )
        .with_layer(CollisionLayer::Trigger),
    ]
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world: Res<QueryWorld>,
) {
    if world.0.is_empty() {
        warn!("World setup: level has no colliders");
    } else {
        info!("World setup: {} colliders", world.0.len());
    }
    let statics = level_statics();

    let level_material = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let prop_material = materials.add(Color::srgb_u8(124, 144, 255));

    // Triggers are invisible volumes.
    for def in statics.iter().filter(|d| d.layer != CollisionLayer::Trigger) {
        let material = match def.shape {
            ColliderShapeDef::Cuboid { .. } | ColliderShapeDef::Plane { .. } => {
                level_material.clone()
            }
            _ => prop_material.clone(),
        };
        let mut transform =
            Transform::from_xyz(def.translation.x, def.translation.y, def.translation.z)
                .with_rotation(from_rotation(def.rotation));
        if let ColliderShapeDef::Plane {
            offset_along_normal,
        } = def.shape
        {
            transform.translation += transform.rotation * Vec3::Y * offset_along_normal;
        }

        commands.spawn((
            Name::new(def.name.clone()),
            Mesh3d(meshes.add(mesh_for_shape(&def.shape))),
            MeshMaterial3d(material),
            transform,
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
}

fn mesh_for_shape(shape: &ColliderShapeDef) -> Mesh {
    match *shape {
        ColliderShapeDef::Plane { .. } => Plane3d::default().mesh().size(200.0, 200.0).build(),
        ColliderShapeDef::Cuboid { half_extents } => Cuboid::new(
            half_extents.x * 2.0,
            half_extents.y * 2.0,
            half_extents.z * 2.0,
        )
        .into(),
        ColliderShapeDef::Sphere { radius } => Sphere::new(radius).into(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(radius, half_height * 2.0).into(),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => Cylinder::new(radius, half_height * 2.0).into(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use shared::{Grapple, LayerMask, PlayerState, SceneQuery};

    use super::*;
    use crate::convert::to_point;

    #[test]
    fn statics_have_unique_ids() {
        let statics = level_statics();
        let ids: HashSet<_> = statics.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), statics.len());
    }

    #[test]
    fn only_the_goal_trigger_is_a_trigger() {
        let triggers: Vec<_> = level_statics()
            .into_iter()
            .filter(|d| d.layer == CollisionLayer::Trigger)
            .map(|d| d.id)
            .collect();
        assert_eq!(triggers, vec![GOAL_TRIGGER_ID]);
    }

    #[test]
    fn query_world_holds_every_static() {
        let world = StaticQueryWorld::build(level_statics());
        assert!(!world.is_empty());
        assert_eq!(world.len(), level_statics().len());
    }

    #[test]
    fn spawn_is_clear_of_level_geometry() {
        let world = StaticQueryWorld::build(level_statics());
        let hits = world.overlap_sphere(to_point(PLAYER_SPAWN), 0.5, LayerMask::ALL);
        assert!(hits.is_empty(), "spawn overlaps {hits:?}");
    }

    #[test]
    fn north_wall_is_reachable_from_spawn() {
        let world = StaticQueryWorld::build(level_statics());
        let player = PlayerState::new(to_point(PLAYER_SPAWN), 0.5)
            .looking_along(nalgebra::Vector3::new(0.0, 0.0, -1.0));

        let mut grapple = Grapple::default();
        grapple.set_movement_enabled(true);
        grapple.held(&world, &player);

        assert!(grapple.anchor_valid());
        assert!(grapple.released(&player));
        let target = grapple.target_position();
        assert!((target.z - (-30.0 + 0.5)).abs() < 1e-3, "target {target}");
    }
}
