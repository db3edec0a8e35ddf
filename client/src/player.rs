use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::{DEFAULT_PLAYER_RADIUS, Grapple, PlayerBody};

use crate::{
    camera::{LookAngles, first_person_camera},
    convert::{from_point, to_point, to_rotation, to_vector},
    grapple::PlayerGrapple,
    input::InputAction,
    world::{KILL_PLANE_Y, PLAYER_SPAWN},
};

#[derive(Component, Debug)]
pub struct Player {
    /// Radius of the player's collision sphere.
    pub radius: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, (respawn_player, respawn_below_kill_plane));
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player {
            radius: DEFAULT_PLAYER_RADIUS,
        },
        LookAngles::default(),
        Transform::from_translation(PLAYER_SPAWN),
        Visibility::default(),
        children![first_person_camera()],
    ));
}

fn respawn_player(
    actions: Res<ActionState<InputAction>>,
    mut grapple: ResMut<PlayerGrapple>,
    player: Single<(&mut Transform, &mut LookAngles), With<Player>>,
) {
    if !actions.just_pressed(&InputAction::Respawn) {
        return;
    }
    let (mut transform, mut look) = player.into_inner();
    respawn(&mut transform, &mut look, &mut grapple.0);
}

fn respawn_below_kill_plane(
    mut grapple: ResMut<PlayerGrapple>,
    player: Single<(&mut Transform, &mut LookAngles), With<Player>>,
) {
    let (mut transform, mut look) = player.into_inner();
    if transform.translation.y >= KILL_PLANE_Y {
        return;
    }
    debug!("Player fell below {KILL_PLANE_Y}");
    respawn(&mut transform, &mut look, &mut grapple.0);
}

/// Send the player back to the spawn and resynchronise the grapple.
fn respawn(transform: &mut Transform, look: &mut LookAngles, grapple: &mut Grapple) {
    *look = LookAngles::default();
    transform.translation = PLAYER_SPAWN;
    transform.rotation = look.rotation();
    grapple.teleport(to_point(PLAYER_SPAWN), Some(to_rotation(transform.rotation)));
    info!("Player respawned at {PLAYER_SPAWN}");
}

/// Exposes a player's transform to the grapple.
pub struct PlayerRig<'a> {
    transform: &'a mut Transform,
    radius: f32,
}

impl<'a> PlayerRig<'a> {
    pub fn new(transform: &'a mut Transform, player: &Player) -> Self {
        Self {
            transform,
            radius: player.radius,
        }
    }
}

impl PlayerBody for PlayerRig<'_> {
    fn position(&self) -> shared::Point3 {
        to_point(self.transform.translation)
    }

    fn set_position(&mut self, position: shared::Point3) {
        self.transform.translation = from_point(position);
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn forward(&self) -> shared::Vec3 {
        to_vector(self.transform.forward().as_vec3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_reads_and_writes_the_transform() {
        let player = Player { radius: 0.75 };
        let mut transform = Transform::from_xyz(1.0, 2.0, 3.0);
        let mut rig = PlayerRig::new(&mut transform, &player);

        assert_eq!(rig.position(), shared::Point3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.radius(), 0.75);
        assert!((rig.forward() - shared::Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-6);

        rig.set_position(shared::Point3::new(4.0, 5.0, 6.0));
        assert_eq!(transform.translation, Vec3::new(4.0, 5.0, 6.0));
    }

    fn app_with_player(translation: Vec3) -> (App, Entity) {
        let mut grapple = Grapple::default();
        grapple.set_movement_enabled(true);

        let mut app = App::new();
        app.insert_resource(PlayerGrapple(grapple));
        app.add_systems(Update, respawn_below_kill_plane);
        let player = app
            .world_mut()
            .spawn((
                Player { radius: 0.5 },
                LookAngles {
                    yaw: 1.0,
                    pitch: 0.3,
                },
                Transform::from_translation(translation),
            ))
            .id();
        (app, player)
    }

    #[test]
    fn falling_below_the_kill_plane_respawns_and_teleports_the_grapple() {
        let (mut app, player) = app_with_player(Vec3::new(3.0, KILL_PLANE_Y - 1.0, -7.0));
        app.update();

        let transform = app.world().get::<Transform>(player).unwrap();
        assert_eq!(transform.translation, PLAYER_SPAWN);
        assert_eq!(transform.rotation, LookAngles::default().rotation());
        let grapple = app.world().resource::<PlayerGrapple>();
        assert_eq!(grapple.target_position(), to_point(PLAYER_SPAWN));
        assert!(grapple.target_rotation().is_some());
    }

    #[test]
    fn staying_above_the_kill_plane_leaves_the_player_alone() {
        let start = Vec3::new(3.0, KILL_PLANE_Y + 1.0, -7.0);
        let (mut app, player) = app_with_player(start);
        app.update();

        assert_eq!(
            app.world().get::<Transform>(player).unwrap().translation,
            start
        );
        let grapple = app.world().resource::<PlayerGrapple>();
        assert!(grapple.target_rotation().is_none());
    }
}
