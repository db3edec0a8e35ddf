pub mod constants;
pub mod goal;
pub mod grapple;
pub mod layers;
pub mod query_world;
pub mod rapier;
pub mod scene;

// Re-export Rapier so the client can build definitions without depending on `rapier3d` directly.
pub use rapier3d;

pub use constants::{
    ARRIVAL_EPSILON, DEFAULT_MAX_RANGE, DEFAULT_MOVE_SPEED, DEFAULT_PLAYER_RADIUS,
    DEFAULT_WALL_CLEARANCE, OVERLAP_EPSILON,
};
pub use goal::{GOAL_REACHED_MESSAGE, GoalPresentation, GoalReached, IndicatorColor, LevelGoal};
pub use grapple::{
    Anchor, AnchorMarker, Flight, Grapple, GrappleEvent, GrapplePhase, GrappleSettings,
    GrappleStats, SettingsError,
};
pub use layers::{CollisionLayer, LayerMask};
pub use query_world::StaticQueryWorld;
pub use rapier::{ColliderId, ColliderShapeDef, WorldStaticDef, collider_from_def};
pub use scene::{PlayerBody, PlayerState, Point3, Quat, RayHit, SceneQuery, Vec3};
