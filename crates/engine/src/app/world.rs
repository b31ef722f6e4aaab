use super::input::InputSnapshot;
use super::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3 {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
        }
    }
}

/// Axis-aligned box on the ground plane, centered on the entity position.
/// Height is irrelevant to the ground-plane probes and is not stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub half_extent_x: f32,
    pub half_extent_z: f32,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub transform: Transform,
    pub collider: Option<BoxCollider>,
    /// Exposes the station capability to raycast selection.
    pub station: bool,
    pub actor: bool,
    pub debug_name: &'static str,
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Entity storage for one kitchen floor. Spawns and despawns are deferred
/// until `apply_pending` so a system iterating entities never observes a
/// mid-tick mutation of the list.
#[derive(Debug, Default)]
pub struct KitchenWorld {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl KitchenWorld {
    pub fn spawn(&mut self, transform: Transform, debug_name: &'static str) -> EntityId {
        self.spawn_internal(transform, debug_name, false, false)
    }

    pub fn spawn_station(&mut self, transform: Transform, debug_name: &'static str) -> EntityId {
        self.spawn_internal(transform, debug_name, true, false)
    }

    pub fn spawn_actor(&mut self, transform: Transform, debug_name: &'static str) -> EntityId {
        self.spawn_internal(transform, debug_name, false, true)
    }

    fn spawn_internal(
        &mut self,
        transform: Transform,
        debug_name: &'static str,
        station: bool,
        actor: bool,
    ) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            transform,
            collider: None,
            station,
            actor,
            debug_name,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_spawns.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }

        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

/// One simulated scene. The headless runner drives exactly one of these.
pub trait Scene {
    fn load(&mut self, world: &mut KitchenWorld);

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut KitchenWorld,
    ) -> SceneCommand;

    fn unload(&mut self, world: &mut KitchenWorld);

    fn debug_title(&self, _world: &KitchenWorld) -> Option<String> {
        None
    }
}
