use crate::{
    grapple::settings::GrappleSettings,
    rapier::ColliderId,
    scene::{Point3, SceneQuery, Vec3},
};

/// Surface the grapple ray landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: Point3,
    pub normal: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    pub collider: ColliderId,
}

/// Outcome of one anchor evaluation.
///
/// - Miss: `point` is the reach limit along the look direction, `surface` is `None`,
///   `valid` is false.
/// - Hit: `point` is the candidate, pushed off the surface by player radius plus clearance,
///   and `valid` holds iff the clearance probe touched exactly one collider.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub point: Point3,
    pub valid: bool,
    pub surface: Option<SurfaceHit>,
    /// Colliders found by the clearance probe (empty on a miss).
    pub overlaps: Vec<ColliderId>,
}

impl Anchor {
    fn reach_limit(point: Point3) -> Self {
        Self {
            point,
            valid: false,
            surface: None,
            overlaps: Vec::new(),
        }
    }

    pub fn normal(&self) -> Option<Vec3> {
        self.surface.map(|s| s.normal)
    }

    /// Where the player comes to rest: on the surface, pushed out by its radius only.
    pub fn resting_point(&self, player_radius: f32) -> Option<Point3> {
        self.surface.map(|s| s.point + s.normal * player_radius)
    }
}

/// Cast the grapple ray and decide whether the hit makes a safe anchor.
///
/// The clearance probe is a sphere slightly larger than the player centered on the candidate.
/// Touching only the anchored wall means the player fits; touching anything else is treated as
/// clipping. That heuristic rejects some legitimate spots where level colliders overlap, which
/// is accepted in exchange for never tunnelling into geometry.
pub fn evaluate_candidate<S: SceneQuery + ?Sized>(
    scene: &S,
    origin: Point3,
    direction: Vec3,
    player_radius: f32,
    settings: &GrappleSettings,
) -> Anchor {
    let Some(direction) = direction.try_normalize(1.0e-6) else {
        return Anchor::reach_limit(origin);
    };
    let max_range = settings.max_range;

    let Some(hit) = scene.raycast(origin, direction, max_range, settings.layer_mask) else {
        return Anchor::reach_limit(origin + direction * max_range);
    };

    let candidate = hit.point + hit.normal * settings.anchor_offset(player_radius);
    let overlaps = scene.overlap_sphere(
        candidate,
        settings.probe_radius(player_radius),
        settings.layer_mask,
    );

    Anchor {
        point: candidate,
        valid: overlaps.len() == 1,
        surface: Some(SurfaceHit {
            point: hit.point,
            normal: hit.normal,
            distance: hit.distance,
            collider: hit.collider,
        }),
        overlaps,
    }
}
