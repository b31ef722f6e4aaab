use super::math::Vec3;
use super::world::{EntityId, KitchenWorld};

const SWEEP_EPSILON: f32 = 1e-6;

/// Capsule dimensions for a swept movement probe. The sweep itself runs on
/// the ground plane, so only the radius participates in the test; the height
/// is part of the collaborator contract and kept for callers that need it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleProbe {
    pub radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    pub distance: f32,
}

/// Black-box collision predicate: would sweeping a capsule from `origin`
/// along `sweep` intersect solid geometry?
pub trait CollisionQuery {
    fn capsule_would_collide(&self, origin: Vec3, sweep: Vec3, probe: CapsuleProbe) -> bool;
}

/// Black-box ray query used by station selection. Returns the nearest hit
/// within `max_distance`, if any.
pub trait RaycastQuery {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl CollisionQuery for KitchenWorld {
    fn capsule_would_collide(&self, origin: Vec3, sweep: Vec3, probe: CapsuleProbe) -> bool {
        self.entities().iter().any(|entity| {
            let Some(collider) = entity.collider else {
                return false;
            };
            segment_hit_fraction(
                origin,
                sweep,
                entity.transform.position,
                collider.half_extent_x + probe.radius,
                collider.half_extent_z + probe.radius,
            )
            .is_some()
        })
    }
}

impl RaycastQuery for KitchenWorld {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalized_or_zero();
        if direction.is_zero() || max_distance <= 0.0 {
            return None;
        }
        let sweep = direction.scaled(max_distance);

        let mut nearest: Option<RayHit> = None;
        for entity in self.entities() {
            let Some(collider) = entity.collider else {
                continue;
            };
            let Some(fraction) = segment_hit_fraction(
                origin,
                sweep,
                entity.transform.position,
                collider.half_extent_x,
                collider.half_extent_z,
            ) else {
                continue;
            };
            let distance = fraction * max_distance;
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    entity: entity.id,
                    distance,
                });
            }
        }
        nearest
    }
}

/// Slab test of the segment `origin..origin+sweep` against an axis-aligned
/// box on the XZ plane. Returns the entry fraction in [0, 1]; a segment
/// starting inside the box reports fraction 0. A segment that touches the
/// box at only a single instant (separating from a contact boundary, or
/// stopping exactly at one) is not a hit, so a probe resting against a face
/// can always sweep away from it.
fn segment_hit_fraction(
    origin: Vec3,
    sweep: Vec3,
    box_center: Vec3,
    half_extent_x: f32,
    half_extent_z: f32,
) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for (start, delta, center, half_extent) in [
        (origin.x, sweep.x, box_center.x, half_extent_x),
        (origin.z, sweep.z, box_center.z, half_extent_z),
    ] {
        let slab_min = center - half_extent;
        let slab_max = center + half_extent;
        if delta.abs() < SWEEP_EPSILON {
            if start < slab_min || start > slab_max {
                return None;
            }
            continue;
        }
        let inv_delta = delta.recip();
        let mut t_enter = (slab_min - start) * inv_delta;
        let mut t_exit = (slab_max - start) * inv_delta;
        if t_enter > t_exit {
            std::mem::swap(&mut t_enter, &mut t_exit);
        }
        t_min = t_min.max(t_enter);
        t_max = t_max.min(t_exit);
        if t_min > t_max {
            return None;
        }
    }

    if t_min >= t_max {
        return None;
    }
    Some(t_min.max(0.0))
}
