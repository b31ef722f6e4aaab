mod input;
mod loop_runner;
mod math;
mod metrics;
mod physics;
mod world;

pub use input::{InputAction, InputSnapshot, InputSource};
pub use loop_runner::{run_headless, AppError, LoopConfig};
pub use math::{rotate_toward, Vec2, Vec3};
pub use metrics::{MetricsHandle, TickMetricsSnapshot};
pub use physics::{CapsuleProbe, CollisionQuery, RayHit, RaycastQuery};
pub use world::{BoxCollider, Entity, EntityId, KitchenWorld, Scene, SceneCommand, Transform};
