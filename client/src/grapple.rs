//! Drives the player's [`Grapple`] from input and mirrors its state into the scene.

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::{AnchorMarker, DEFAULT_PLAYER_RADIUS, Grapple, GrappleEvent, GrappleSettings};

use crate::{
    convert::from_point,
    input::InputAction,
    player::{Player, PlayerRig},
    world::QueryWorld,
};

/// Meters added or removed per range key press.
const RANGE_STEP: f32 = 10.0;

const VALID_COLOR: Color = Color::srgba(0.1, 1.0, 0.3, 0.45);
const INVALID_COLOR: Color = Color::srgba(1.0, 0.15, 0.1, 0.45);
const DESTINATION_COLOR: Color = Color::srgba(0.3, 0.7, 1.0, 0.35);

#[derive(Resource, Deref, DerefMut)]
pub struct PlayerGrapple(pub Grapple);

#[derive(Message, Debug, Clone, Copy)]
pub struct GrappleFired {
    pub start: Vec3,
    pub target: Vec3,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct GrappleFinished {
    pub target: Vec3,
    pub distance_travelled: f32,
}

/// Holographic preview of the player at the anchor.
#[derive(Component)]
struct AnchorPreview;

/// Marks where an active flight will end.
#[derive(Component)]
struct DestinationMarker;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(PlayerGrapple(build_grapple(GrappleSettings::default())));
    app.add_message::<GrappleFired>();
    app.add_message::<GrappleFinished>();

    app.add_systems(Startup, spawn_markers);
    app.add_systems(
        Update,
        (
            handle_grapple_input,
            adjust_range,
            drive_grapple,
            publish_grapple_events,
            sync_markers,
        )
            .chain(),
    );
    app.add_systems(PostUpdate, log_grapple_messages);
}

/// The level lets the player traverse from the start.
fn build_grapple(settings: GrappleSettings) -> Grapple {
    let mut grapple = Grapple::new(settings).unwrap_or_else(|err| {
        warn!("Invalid grapple settings ({err}), falling back to defaults");
        Grapple::default()
    });
    grapple.set_movement_enabled(true);
    grapple
}

fn spawn_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(DEFAULT_PLAYER_RADIUS));

    commands.spawn((
        Name::new("Anchor Preview"),
        AnchorPreview,
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: INVALID_COLOR,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
    ));

    commands.spawn((
        Name::new("Destination Marker"),
        DestinationMarker,
        Mesh3d(mesh),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: DESTINATION_COLOR,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
    ));
}

fn handle_grapple_input(
    actions: Res<ActionState<InputAction>>,
    world: Res<QueryWorld>,
    mut grapple: ResMut<PlayerGrapple>,
    player: Single<(&mut Transform, &Player)>,
) {
    let (mut transform, player) = player.into_inner();
    let rig = PlayerRig::new(&mut transform, player);

    // Cancel only applies mid-gesture.
    if actions.pressed(&InputAction::Grapple)
        && actions.just_pressed(&InputAction::CancelGrapple)
        && grapple.cancel()
    {
        debug!("Grapple cancelled");
    }

    if actions.pressed(&InputAction::Grapple) {
        grapple.held(&world.0, &rig);
    } else if actions.just_released(&InputAction::Grapple) && !grapple.released(&rig) {
        debug!("Grapple released without a usable anchor");
    }
}

fn adjust_range(actions: Res<ActionState<InputAction>>, mut grapple: ResMut<PlayerGrapple>) {
    let delta = if actions.just_pressed(&InputAction::IncreaseRange) {
        RANGE_STEP
    } else if actions.just_pressed(&InputAction::DecreaseRange) {
        -RANGE_STEP
    } else {
        return;
    };
    // Rejected values are logged by the grapple.
    if let Ok(range) = grapple.adjust_max_range(delta) {
        info!("Grapple range set to {range}m");
    }
}

fn drive_grapple(
    time: Res<Time>,
    mut grapple: ResMut<PlayerGrapple>,
    player: Single<(&mut Transform, &Player)>,
) {
    if !grapple.is_moving() {
        return;
    }
    let (mut transform, player) = player.into_inner();
    let mut rig = PlayerRig::new(&mut transform, player);
    grapple.tick(&mut rig, time.delta_secs());
}

fn publish_grapple_events(
    mut grapple: ResMut<PlayerGrapple>,
    mut fired: MessageWriter<GrappleFired>,
    mut finished: MessageWriter<GrappleFinished>,
) {
    for event in grapple.drain_events() {
        match event {
            GrappleEvent::Fired { start, target } => {
                fired.write(GrappleFired {
                    start: from_point(start),
                    target: from_point(target),
                });
            }
            GrappleEvent::Finished {
                target,
                distance_travelled,
                ..
            } => {
                finished.write(GrappleFinished {
                    target: from_point(target),
                    distance_travelled,
                });
            }
        }
    }
}

fn sync_markers(
    grapple: Res<PlayerGrapple>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    preview: Single<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        (With<AnchorPreview>, Without<DestinationMarker>),
    >,
    destination: Single<
        (&mut Transform, &mut Visibility),
        (With<DestinationMarker>, Without<AnchorPreview>),
    >,
) {
    let (mut transform, mut visibility, material) = preview.into_inner();
    let AnchorMarker {
        visible,
        position,
        valid,
    } = grapple.marker();
    if visible {
        transform.translation = from_point(position);
        let color = if valid { VALID_COLOR } else { INVALID_COLOR };
        if materials
            .get(&material.0)
            .is_some_and(|current| current.base_color != color)
            && let Some(material) = materials.get_mut(&material.0)
        {
            material.base_color = color;
        }
    }
    visibility.set_if_neq(if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    });

    let (mut transform, mut visibility) = destination.into_inner();
    match grapple.destination_marker() {
        Some(target) => {
            transform.translation = from_point(target);
            visibility.set_if_neq(Visibility::Visible);
        }
        None => {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

fn log_grapple_messages(
    mut fired: MessageReader<GrappleFired>,
    mut finished: MessageReader<GrappleFinished>,
) {
    for msg in fired.read() {
        info!("Grapple fired: {} -> {}", msg.start, msg.target);
    }
    for msg in finished.read() {
        info!(
            "Grapple arrived at {} after {:.2}m",
            msg.target, msg.distance_travelled
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_grapple_can_move_immediately() {
        let grapple = build_grapple(GrappleSettings::default());
        assert!(grapple.movement_enabled());
        assert_eq!(grapple.settings(), &GrappleSettings::default());
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults() {
        let grapple = build_grapple(GrappleSettings {
            max_range: -1.0,
            ..default()
        });
        assert_eq!(grapple.settings().max_range, shared::DEFAULT_MAX_RANGE);
        assert!(grapple.movement_enabled());
    }
}
