/// Default maximum grapple reach (meters).
///
/// Rays that find nothing within this distance park the preview marker at the reach limit.
pub const DEFAULT_MAX_RANGE: f32 = 500.0;

/// Default gap kept between the player's collision sphere and the anchored wall (meters).
pub const DEFAULT_WALL_CLEARANCE: f32 = 0.1;

/// Default grapple flight speed in meters per second.
pub const DEFAULT_MOVE_SPEED: f32 = 65.0;

/// Extra radius added to the clearance probe so the anchored surface itself is always touched.
pub const OVERLAP_EPSILON: f32 = 0.01;

/// Remaining distance (meters) at which a grapple flight snaps onto its target and finishes.
///
/// Flights compare against this instead of exact equality so a step that lands a hair short
/// of the target can never leave the driver moving forever.
pub const ARRIVAL_EPSILON: f32 = 1.0e-4;

/// Player collision radius used when the caller does not provide one (meters).
pub const DEFAULT_PLAYER_RADIUS: f32 = 0.5;
