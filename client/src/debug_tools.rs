//! Grapple debug overlay, toggled with F3.
//!
//! Native dev builds (`dev_native`) also get the performance UI.

#[cfg(feature = "dev_native")]
use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
#[cfg(feature = "dev_native")]
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
#[cfg(feature = "dev_native")]
use iyes_perf_ui::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::GrapplePhase;

use crate::{
    convert::{from_point, from_vector},
    grapple::PlayerGrapple,
    input::InputAction,
    player::Player,
    world::QueryWorld,
};

const RAY_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
const INVALID_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);
const NORMAL_COLOR: Color = Color::srgb(1.0, 1.0, 0.2);
const FLIGHT_COLOR: Color = Color::srgb(0.3, 0.7, 1.0);
const NORMAL_LENGTH: f32 = 1.5;

#[derive(Resource, Default, Debug)]
pub struct DebugMode(pub bool);

#[derive(Component)]
struct GrappleStatsText;

pub(super) fn plugin(app: &mut App) {
    #[cfg(feature = "dev_native")]
    {
        app.add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
            SystemInformationDiagnosticsPlugin::default(),
            RenderDiagnosticsPlugin,
            PerfUiPlugin,
        ));
        app.add_systems(Startup, spawn_perf_ui);
    }

    app.init_resource::<DebugMode>();
    app.add_systems(Startup, spawn_stats_text);
    app.add_systems(Update, toggle_debug);
    app.add_systems(
        PostUpdate,
        (update_stats_text, draw_grapple_gizmos).run_if(|mode: Res<DebugMode>| mode.0),
    );
}

#[cfg(feature = "dev_native")]
fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn spawn_stats_text(mut commands: Commands) {
    commands.spawn((
        GrappleStatsText,
        Text::default(),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn toggle_debug(
    actions: Res<ActionState<InputAction>>,
    mut mode: ResMut<DebugMode>,
    mut text: Single<&mut Visibility, With<GrappleStatsText>>,
) {
    if !actions.just_pressed(&InputAction::ToggleDebug) {
        return;
    }
    mode.0 = !mode.0;
    **text = if mode.0 {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    debug!("Debug overlay {}", if mode.0 { "on" } else { "off" });
}

fn update_stats_text(
    grapple: Res<PlayerGrapple>,
    world: Res<QueryWorld>,
    mut text: Single<&mut Text, With<GrappleStatsText>>,
) {
    text.0 = grapple.stats(&world.0).to_string();
}

fn draw_grapple_gizmos(
    mut gizmos: Gizmos,
    grapple: Res<PlayerGrapple>,
    player: Single<(&Transform, &Player)>,
) {
    let (transform, player) = player.into_inner();
    if let GrapplePhase::Moving(flight) = grapple.phase() {
        gizmos.line(
            from_point(flight.start),
            from_point(flight.target),
            FLIGHT_COLOR,
        );
    }
    let Some(anchor) = grapple.anchor() else {
        return;
    };
    let Some(surface) = anchor.surface else {
        gizmos.line(transform.translation, from_point(anchor.point), RAY_COLOR);
        return;
    };
    let point = from_point(surface.point);
    gizmos.line(transform.translation, point, RAY_COLOR);
    gizmos.ray(point, from_vector(surface.normal) * NORMAL_LENGTH, NORMAL_COLOR);

    let radius = grapple.settings().probe_radius(player.radius);
    let color = if anchor.valid {
        RAY_COLOR
    } else {
        INVALID_COLOR
    };
    gizmos.sphere(
        Isometry3d::from_translation(from_point(anchor.point)),
        radius,
        color,
    );
}
