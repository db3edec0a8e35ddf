use bevy::prelude::*;
use shared::{GOAL_REACHED_MESSAGE, IndicatorColor, LevelGoal};

use crate::{
    convert::{from_point, to_point},
    player::{Player, PlayerRig},
    world::{GOAL_POSITION, GOAL_TRIGGER_ID, QueryWorld},
};

/// Gate offsets relative to the goal, closed and raised.
const GATE_LOCKED: Vec3 = Vec3::new(0.0, 0.0, 1.6);
const GATE_UNLOCKED: Vec3 = Vec3::new(0.0, 4.0, 1.6);

#[derive(Resource, Deref, DerefMut)]
pub struct CurrentGoal(pub LevelGoal);

/// Level progression for the current session.
#[derive(Resource, Default, Debug)]
pub struct LevelProgress {
    pub goals_reached: u32,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct GoalReachedMessage;

#[derive(Component)]
struct GoalGate;

#[derive(Component)]
struct GoalIndicator;

#[derive(Component)]
struct GoalBanner;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(CurrentGoal(LevelGoal::new(
        GOAL_TRIGGER_ID,
        to_point(GATE_LOCKED),
        to_point(GATE_UNLOCKED),
    )));
    app.init_resource::<LevelProgress>();
    app.add_message::<GoalReachedMessage>();

    app.add_systems(Startup, spawn_goal);
    app.add_systems(Update, (detect_goal, on_goal_reached).chain());
    app.add_systems(
        PostUpdate,
        sync_goal_presentation.run_if(resource_changed::<CurrentGoal>),
    );
}

fn spawn_goal(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Goal"),
        Transform::from_translation(GOAL_POSITION),
        Visibility::default(),
        children![
            (
                Name::new("Goal Gate"),
                GoalGate,
                Mesh3d(meshes.add(Cuboid::new(3.0, 3.0, 0.2))),
                MeshMaterial3d(materials.add(Color::srgb(0.55, 0.5, 0.45))),
                Transform::from_translation(GATE_LOCKED),
            ),
            (
                Name::new("Goal Indicator"),
                GoalIndicator,
                PointLight {
                    color: indicator_color(IndicatorColor::Red),
                    intensity: 200_000.0,
                    ..default()
                },
                Transform::from_xyz(0.0, 2.5, 0.0),
            ),
        ],
    ));

    commands.spawn((
        GoalBanner,
        Text::new(GOAL_REACHED_MESSAGE),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            left: Val::Percent(38.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn detect_goal(
    world: Res<QueryWorld>,
    mut goal: ResMut<CurrentGoal>,
    mut reached: MessageWriter<GoalReachedMessage>,
    player: Single<(&mut Transform, &Player)>,
) {
    let (mut transform, player) = player.into_inner();
    let rig = PlayerRig::new(&mut transform, player);
    // Avoid flagging the goal as changed every frame.
    if goal.bypass_change_detection().update(&world.0, &rig).is_some() {
        goal.set_changed();
        reached.write(GoalReachedMessage);
    }
}

fn on_goal_reached(
    mut msgs: MessageReader<GoalReachedMessage>,
    mut progress: ResMut<LevelProgress>,
    mut banner: Single<&mut Visibility, With<GoalBanner>>,
) {
    for _ in msgs.read() {
        progress.goals_reached += 1;
        **banner = Visibility::Visible;
        info!("Level complete ({} goals reached)", progress.goals_reached);
    }
}

fn sync_goal_presentation(
    goal: Res<CurrentGoal>,
    mut gate: Single<&mut Transform, With<GoalGate>>,
    mut indicator: Single<&mut PointLight, With<GoalIndicator>>,
) {
    let presentation = goal.presentation();
    gate.translation = from_point(presentation.gate_position);
    indicator.color = indicator_color(presentation.indicator);
}

fn indicator_color(indicator: IndicatorColor) -> Color {
    match indicator {
        IndicatorColor::Red => Color::srgb(1.0, 0.1, 0.1),
        IndicatorColor::Green => Color::srgb(0.1, 1.0, 0.2),
    }
}

#[cfg(test)]
mod tests {
    use shared::{GoalReached, PlayerState, StaticQueryWorld};

    use super::*;
    use crate::world::{PLAYER_SPAWN, level_statics};

    #[test]
    fn standing_in_the_goal_completes_it_once() {
        let world = StaticQueryWorld::build(level_statics());
        let mut goal = LevelGoal::new(
            GOAL_TRIGGER_ID,
            to_point(GATE_LOCKED),
            to_point(GATE_UNLOCKED),
        );
        let mut player = PlayerState::new(to_point(PLAYER_SPAWN), 0.5);

        assert_eq!(goal.update(&world, &player), None);
        assert_eq!(goal.presentation().indicator, IndicatorColor::Red);

        player.position = to_point(GOAL_POSITION);
        assert_eq!(
            goal.update(&world, &player),
            Some(GoalReached {
                trigger: GOAL_TRIGGER_ID
            })
        );
        assert_eq!(goal.presentation().indicator, IndicatorColor::Green);
        assert_eq!(
            from_point(goal.presentation().gate_position),
            GATE_UNLOCKED
        );
    }
}
