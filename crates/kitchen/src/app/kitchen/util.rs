/// Resolves a movement attempt against the world colliders with the
/// axis-fallback order: full direction first, then X only, then Z only.
/// Fallback axes with no component of the input are skipped rather than
/// probed as zero-length sweeps. Returns the delta to apply, or `None`
/// when every candidate direction is blocked.
pub(crate) fn resolve_move(
    world: &KitchenWorld,
    origin: Vec3,
    direction: Vec3,
    distance: f32,
    probe: CapsuleProbe,
) -> Option<Vec3> {
    if direction.is_zero() || distance <= 0.0 {
        return None;
    }

    let candidates = [
        direction,
        Vec3 {
            x: direction.x,
            y: 0.0,
            z: 0.0,
        },
        Vec3 {
            x: 0.0,
            y: 0.0,
            z: direction.z,
        },
    ];
    for candidate in candidates {
        let candidate = candidate.normalized_or_zero();
        if candidate.is_zero() {
            continue;
        }
        let sweep = candidate.scaled(distance);
        if !world.capsule_would_collide(origin, sweep, probe) {
            return Some(sweep);
        }
    }
    None
}
