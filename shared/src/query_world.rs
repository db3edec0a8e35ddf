//! Rapier-backed scene queries over immutable level geometry.
//!
//! The client builds one [`StaticQueryWorld`] from the level's [`WorldStaticDef`]s at startup
//! and hands it to the grapple and the level goal as their [`SceneQuery`].
//!
//! Design goals
//! - Deterministic: definitions are inserted sorted by `id`, overlap results come back sorted.
//! - Query-focused: only the collider set and broad-phase BVH are maintained, no dynamics.
//! - Immutable world: statics do not move after construction.

use std::collections::HashMap;

use rapier3d::{na::Translation3, parry::shape::Ball, prelude::*};

use crate::{
    layers::LayerMask,
    rapier::{ColliderId, WorldStaticDef, collider_from_def, decode_user_data},
    scene::{Point3, RayHit, SceneQuery, Vec3},
};

pub struct StaticQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    names: HashMap<ColliderId, String>,
}

impl StaticQueryWorld {
    /// Build a query world from a list of static collider definitions.
    pub fn build(world_statics: impl IntoIterator<Item = WorldStaticDef>) -> Self {
        let mut defs: Vec<WorldStaticDef> = world_statics.into_iter().collect();
        defs.sort_by_key(|d| d.id);

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut modified_colliders = Vec::with_capacity(defs.len());
        let mut names = HashMap::with_capacity(defs.len());

        for def in defs {
            let mut collider = collider_from_def(&def);
            // Compose the def's world pose with the collider's local offset (planes use one).
            let pose = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            collider.set_position(pose * *collider.position());
            modified_colliders.push(colliders.insert(collider));

            if names.insert(def.id, def.name).is_some() {
                log::warn!("Duplicate world static id {}, name lookup keeps the last", def.id);
            }
        }

        let mut broad_phase = BroadPhaseBvh::new();
        let mut events = Vec::new();
        broad_phase.update(
            &IntegrationParameters::default(),
            &colliders,
            &bodies,
            &modified_colliders,
            &[],
            &mut events,
        );

        log::debug!("Built static query world with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase: NarrowPhase::default(),
            names,
        }
    }

    /// Number of colliders in the world.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Borrowed `QueryPipeline` view for scene queries.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

/// Whether `collider` sits on a layer included in `mask`.
fn on_visible_layer(collider: &Collider, mask: LayerMask) -> bool {
    let (_, layer) = decode_user_data(collider.user_data);
    mask.contains(layer)
}

impl SceneQuery for StaticQueryWorld {
    fn raycast(
        &self,
        origin: Point3,
        direction: Vec3,
        max_range: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let visible = |_: ColliderHandle, collider: &Collider| on_visible_layer(collider, mask);
        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&visible));

        let ray = Ray::new(origin, direction);
        let (handle, hit) = pipeline.cast_ray_and_get_normal(&ray, max_range.max(0.0), true)?;
        let (collider, _) = decode_user_data(self.colliders.get(handle)?.user_data);

        Some(RayHit {
            point: ray.point_at(hit.time_of_impact),
            normal: hit.normal,
            distance: hit.time_of_impact,
            collider,
        })
    }

    fn overlap_sphere(&self, center: Point3, radius: f32, mask: LayerMask) -> Vec<ColliderId> {
        let ball = Ball::new(radius.max(0.0));
        let visible = |_: ColliderHandle, collider: &Collider| on_visible_layer(collider, mask);
        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&visible));

        let pose = Isometry::translation(center.x, center.y, center.z);
        let mut hits: Vec<ColliderId> = pipeline
            .intersect_shape(pose, &ball)
            .map(|(_, collider)| decode_user_data(collider.user_data).0)
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    fn collider_name(&self, id: ColliderId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}
