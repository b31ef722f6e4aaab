use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use engine::{
    rotate_toward, BoxCollider, CapsuleProbe, CollisionQuery, DefDatabase, EntityId, InputSnapshot,
    ItemDefId, KitchenWorld, RaycastQuery, RecipePair, Scene, SceneCommand, StationSpecKind,
    Transform, Vec3,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const PLAYER_MOVE_SPEED_UNITS_PER_SECOND: f32 = 5.0;
const PLAYER_CAPSULE_RADIUS: f32 = 0.7;
const PLAYER_CAPSULE_HEIGHT: f32 = 2.0;
const PLAYER_ROTATE_SPEED_RADIANS_PER_SECOND: f32 = 10.0;
const INTERACT_DISTANCE: f32 = 2.0;
const STATION_HALF_EXTENT: f32 = 0.5;
const STATION_ROW_Z: f32 = 2.0;
const STATION_ROW_START_X: f32 = -2.0;
const STATION_ROW_SPACING_X: f32 = 2.0;
const WALL_DISTANCE_X: f32 = 8.0;
const WALL_DISTANCE_Z: f32 = 6.0;
const WALL_HALF_THICKNESS: f32 = 0.5;
const SAVE_VERSION: u32 = 1;
pub(crate) const KITCHEN_SAVE_FILE: &str = "kitchen.save.json";
const KITCHEN_SYSTEM_ORDER_TEXT: &str = "Movement>Selection>Interaction";

const PLAYER_PROBE: CapsuleProbe = CapsuleProbe {
    radius: PLAYER_CAPSULE_RADIUS,
    height: PLAYER_CAPSULE_HEIGHT,
};

include!("types.rs");
include!("systems.rs");
include!("scene_state.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene(def_database: DefDatabase, save_path: Option<PathBuf>) -> KitchenScene {
    KitchenScene::new("kitchen", Vec3::ZERO, def_database, save_path)
}
