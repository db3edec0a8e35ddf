use std::f32::consts::FRAC_PI_2;

use bevy::{
    camera::Exposure,
    input::mouse::AccumulatedMouseMotion,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};

use crate::player::Player;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, grab_cursor);
    app.add_systems(Update, mouse_look);
}

/// Radians per pixel of mouse motion.
const MOUSE_SENSITIVITY: Vec2 = Vec2::new(0.003, 0.0025);
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// First person view angles. The player's rotation is rebuilt from these every time they change.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Camera spawned as a child of the player, looking along the player's forward.
pub fn first_person_camera() -> impl Bundle {
    (
        Exposure::default(),
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            ..default()
        }),
        Transform::default(),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                600.0, // Fog distance
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    )
}

fn grab_cursor(mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>) {
    cursor.grab_mode = CursorGrabMode::Locked;
    cursor.visible = false;
}

fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    player: Single<(&mut Transform, &mut LookAngles), With<Player>>,
) {
    if motion.delta == Vec2::ZERO {
        return;
    }
    let (mut transform, mut look) = player.into_inner();
    look.yaw -= motion.delta.x * MOUSE_SENSITIVITY.x;
    look.pitch =
        (look.pitch - motion.delta.y * MOUSE_SENSITIVITY.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    transform.rotation = look.rotation();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_angles_look_down_negative_z() {
        let forward = LookAngles::default().rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn positive_pitch_looks_up() {
        let look = LookAngles {
            yaw: 0.0,
            pitch: 0.5,
        };
        assert!((look.rotation() * Vec3::NEG_Z).y > 0.0);
    }
}
