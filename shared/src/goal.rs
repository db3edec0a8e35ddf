//! Level goal: a gate that opens when the player walks into its trigger volume.

use crate::{
    layers::{CollisionLayer, LayerMask},
    rapier::ColliderId,
    scene::{PlayerBody, Point3, SceneQuery},
};

/// Text shown to the player when the goal is reached.
pub const GOAL_REACHED_MESSAGE: &str = "Goal Reached!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorColor {
    Red,
    Green,
}

/// How the goal should currently look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalPresentation {
    /// Local position of the moving gate object.
    pub gate_position: Point3,
    pub indicator: IndicatorColor,
}

/// Sent to level progression the first time the player reaches the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalReached {
    pub trigger: ColliderId,
}

#[derive(Clone, Debug)]
pub struct LevelGoal {
    trigger: ColliderId,
    locked_position: Point3,
    unlocked_position: Point3,
    unlocked: bool,
    player_inside: bool,
    reached: bool,
}

impl LevelGoal {
    /// `trigger` must name a collider on the `Trigger` layer.
    pub fn new(trigger: ColliderId, locked_position: Point3, unlocked_position: Point3) -> Self {
        Self {
            trigger,
            locked_position,
            unlocked_position,
            unlocked: false,
            player_inside: false,
            reached: false,
        }
    }

    pub fn trigger(&self) -> ColliderId {
        self.trigger
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn has_been_reached(&self) -> bool {
        self.reached
    }

    pub fn set_unlocked(&mut self, unlocked: bool) {
        self.unlocked = unlocked;
    }

    pub fn presentation(&self) -> GoalPresentation {
        if self.unlocked {
            GoalPresentation {
                gate_position: self.unlocked_position,
                indicator: IndicatorColor::Green,
            }
        } else {
            GoalPresentation {
                gate_position: self.locked_position,
                indicator: IndicatorColor::Red,
            }
        }
    }

    /// Something entered the trigger volume. Only the player counts, and only once.
    pub fn on_trigger_enter(&mut self, is_player: bool) -> Option<GoalReached> {
        if !is_player {
            return None;
        }
        self.unlocked = true;
        if self.reached {
            return None;
        }
        self.reached = true;
        log::info!("{GOAL_REACHED_MESSAGE} (trigger #{})", self.trigger);
        Some(GoalReached {
            trigger: self.trigger,
        })
    }

    /// Test the player's collision sphere against the trigger and fire on the entering edge.
    pub fn update<S, P>(&mut self, scene: &S, player: &P) -> Option<GoalReached>
    where
        S: SceneQuery + ?Sized,
        P: PlayerBody + ?Sized,
    {
        let inside = scene
            .overlap_sphere(
                player.position(),
                player.radius(),
                LayerMask::only(CollisionLayer::Trigger),
            )
            .contains(&self.trigger);
        let entered = inside && !self.player_inside;
        self.player_inside = inside;

        if entered {
            self.on_trigger_enter(true)
        } else {
            None
        }
    }

    /// Relock for a fresh attempt at the level.
    pub fn reset(&mut self) {
        self.unlocked = false;
        self.player_inside = false;
        self.reached = false;
    }
}

#[cfg(test)]
mod tests {
    use rapier3d::prelude::Vector;

    use super::*;
    use crate::{
        StaticQueryWorld,
        rapier::{ColliderShapeDef, WorldStaticDef},
        scene::PlayerState,
    };

    const TRIGGER: ColliderId = 40;

    fn goal() -> LevelGoal {
        LevelGoal::new(
            TRIGGER,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        )
    }

    fn goal_world() -> StaticQueryWorld {
        StaticQueryWorld::build([
            WorldStaticDef::level(
                TRIGGER,
                "goal trigger",
                Vector::new(20.0, 1.0, 0.0),
                ColliderShapeDef::Cuboid {
                    half_extents: Vector::new(1.0, 1.0, 1.0),
                },
            )
            .with_layer(CollisionLayer::Trigger),
            WorldStaticDef::level(
                41,
                "pedestal",
                Vector::new(0.0, 0.0, 0.0),
                ColliderShapeDef::Sphere { radius: 2.0 },
            ),
        ])
    }

    #[test]
    fn presentation_follows_the_latch() {
        let mut goal = goal();
        assert_eq!(
            goal.presentation(),
            GoalPresentation {
                gate_position: Point3::new(0.0, 0.0, 0.0),
                indicator: IndicatorColor::Red,
            }
        );

        goal.set_unlocked(true);
        assert_eq!(goal.presentation().indicator, IndicatorColor::Green);
        assert_eq!(goal.presentation().gate_position, Point3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn only_the_player_unlocks_and_only_once() {
        let mut goal = goal();
        assert_eq!(goal.on_trigger_enter(false), None);
        assert!(!goal.is_unlocked());

        assert_eq!(
            goal.on_trigger_enter(true),
            Some(GoalReached { trigger: TRIGGER })
        );
        assert!(goal.is_unlocked());
        assert!(goal.has_been_reached());
        assert_eq!(goal.on_trigger_enter(true), None);
    }

    #[test]
    fn update_fires_when_the_player_walks_into_the_trigger() {
        let world = goal_world();
        let mut goal = goal();
        let mut player = PlayerState::new(Point3::new(0.0, 1.0, 0.0), 0.5);

        // Touching ordinary level geometry does not count.
        assert_eq!(goal.update(&world, &player), None);

        player.position = Point3::new(18.8, 1.0, 0.0);
        assert_eq!(
            goal.update(&world, &player),
            Some(GoalReached { trigger: TRIGGER })
        );
        assert!(goal.is_unlocked());

        // Staying inside, leaving and coming back never re-notifies.
        assert_eq!(goal.update(&world, &player), None);
        player.position = Point3::new(10.0, 1.0, 0.0);
        assert_eq!(goal.update(&world, &player), None);
        player.position = Point3::new(20.0, 1.0, 0.0);
        assert_eq!(goal.update(&world, &player), None);
    }

    #[test]
    fn reset_allows_a_new_notification() {
        let mut goal = goal();
        goal.on_trigger_enter(true);
        goal.reset();
        assert!(!goal.is_unlocked());
        assert_eq!(
            goal.on_trigger_enter(true),
            Some(GoalReached { trigger: TRIGGER })
        );
    }
}
