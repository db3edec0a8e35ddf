use crate::{constants::ARRIVAL_EPSILON, scene::Point3};

/// Input for one constant-speed step toward a target.
#[derive(Clone, Copy, Debug)]
pub struct MoveTowardParams {
    /// Current world position of the mover (meters).
    pub current: Point3,
    /// Target world position (meters).
    pub target: Point3,
    /// Linear speed in meters per second.
    pub speed_mps: f32,
    /// Delta time in seconds.
    pub dt_seconds: f32,
}

/// Result of [`move_toward`].
#[derive(Clone, Copy, Debug)]
pub struct MoveTowardResult {
    /// Position after this step. Exactly `target` once arrived.
    pub position: Point3,
    /// Whether the mover reached the target this step.
    pub arrived: bool,
    /// Distance left to the target after the step (meters).
    pub remaining: f32,
}

/// Advance `current` toward `target` by at most `speed_mps * dt_seconds`, never overshooting.
///
/// Arrival snaps onto the target as soon as the leftover distance drops within
/// [`ARRIVAL_EPSILON`], so repeated steps always terminate.
#[inline]
pub fn move_toward(params: MoveTowardParams) -> MoveTowardResult {
    let MoveTowardParams {
        current,
        target,
        speed_mps,
        dt_seconds,
    } = params;

    let delta = target - current;
    let dist = delta.norm();

    let arrived = MoveTowardResult {
        position: target,
        arrived: true,
        remaining: 0.0,
    };

    if dist <= ARRIVAL_EPSILON {
        return arrived;
    }

    let max_step = speed_mps.max(0.0) * dt_seconds.max(0.0);
    if max_step >= dist - ARRIVAL_EPSILON {
        return arrived;
    }

    MoveTowardResult {
        position: current + delta * (max_step / dist),
        arrived: false,
        remaining: dist - max_step,
    }
}
