use super::*;

use engine::InputAction;

const DT: f32 = 1.0 / 60.0;

fn test_database() -> DefDatabase {
    DefDatabase::from_defs(engine::builtin_def_set()).expect("builtin defs must resolve")
}

fn item_id(name: &str) -> ItemDefId {
    test_database()
        .item_def_id_by_name(name)
        .expect("builtin item")
}

fn press_interact() -> InputSnapshot {
    InputSnapshot::empty().with_interact_pressed(true)
}

fn press_alternate() -> InputSnapshot {
    InputSnapshot::empty().with_interact_alternate_pressed(true)
}

fn hold(action: InputAction) -> InputSnapshot {
    InputSnapshot::empty().with_action_down(action, true)
}

struct Harness {
    scene: KitchenScene,
    world: KitchenWorld,
}

impl Harness {
    fn new() -> Self {
        Self::with_save_path(None)
    }

    fn with_save_path(save_path: Option<PathBuf>) -> Self {
        let mut scene = build_scene(test_database(), save_path);
        let mut world = KitchenWorld::default();
        scene.load(&mut world);
        world.apply_pending();
        Self { scene, world }
    }

    fn tick(&mut self, input: &InputSnapshot) {
        self.scene.update(DT, input, &mut self.world);
        self.world.apply_pending();
    }

    fn tick_n(&mut self, input: &InputSnapshot, ticks: u32) {
        for _ in 0..ticks {
            self.tick(input);
        }
    }

    fn player_id(&self) -> EntityId {
        self.scene.player().expect("scene spawned a player")
    }

    fn player_position(&self) -> Vec3 {
        self.world
            .find_entity(self.player_id())
            .expect("player entity")
            .transform
            .position
    }

    fn player_forward(&self) -> Vec3 {
        self.world
            .find_entity(self.player_id())
            .expect("player entity")
            .transform
            .forward
    }

    fn place_player(&mut self, x: f32, z: f32) {
        let id = self.player_id();
        let player = self.world.find_entity_mut(id).expect("player entity");
        player.transform.position = Vec3 { x, y: 0.0, z };
    }

    fn station(&self, index: usize) -> EntityId {
        self.scene.station_at(index).expect("station spawned")
    }

    fn held_def(&self, holder: EntityId) -> Option<ItemDefId> {
        let registry = self.scene.registry();
        registry
            .held_item(holder)
            .and_then(|item| registry.item(item))
            .map(ItemInstance::def)
    }
}

// Builtin station row order: counter, plate_container, cabbage_crate,
// cutting_board at x = -2, 0, 2, 4, all at z = 2.
const COUNTER: usize = 0;
const PLATE_CONTAINER: usize = 1;
const CABBAGE_CRATE: usize = 2;
const CUTTING_BOARD: usize = 3;

fn station_x(index: usize) -> f32 {
    STATION_ROW_START_X + STATION_ROW_SPACING_X * index as f32
}

/// Walks the harness player in front of a station and settles the
/// selection with one idle tick. The player spawns facing the station row.
fn stand_before(harness: &mut Harness, index: usize) {
    harness.place_player(station_x(index), 0.8);
    harness.tick(&InputSnapshot::empty());
}

#[test]
fn scene_load_spawns_player_stations_and_walls() {
    let harness = Harness::new();
    assert_eq!(harness.world.entity_count(), 9);
    for index in 0..4 {
        let station = harness.station(index);
        let entity = harness.world.find_entity(station).expect("station entity");
        assert!(entity.station);
        assert!(entity.collider.is_some());
    }
}

#[test]
fn selection_picks_the_station_in_front() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    assert_eq!(
        harness.scene.selected_station(),
        Some(harness.station(PLATE_CONTAINER))
    );
}

#[test]
fn selection_clears_when_out_of_range() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.place_player(station_x(PLATE_CONTAINER), -3.0);
    harness.tick(&InputSnapshot::empty());
    assert_eq!(harness.scene.selected_station(), None);
}

#[test]
fn selection_follows_the_interact_direction() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    assert!(harness.scene.selected_station().is_some());
    // Turning away re-aims the probe even though the player barely moves.
    harness.tick(&hold(InputAction::MoveLeft));
    assert_eq!(harness.scene.selected_station(), None);
}

#[test]
fn spawner_hands_an_item_to_an_empty_handed_player() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    assert_eq!(
        harness.held_def(harness.player_id()),
        Some(item_id("kitchen.plate"))
    );
}

#[test]
fn spawner_refuses_a_player_with_full_hands() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    harness.tick(&press_interact());
    assert_eq!(harness.scene.registry().item_count(), 1);
}

#[test]
fn spawner_creates_a_distinct_item_each_time_hands_are_emptied() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    let first = harness
        .scene
        .registry()
        .held_item(harness.player_id())
        .expect("first plate");

    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());

    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    let second = harness
        .scene
        .registry()
        .held_item(harness.player_id())
        .expect("second plate");

    assert_ne!(first, second);
    assert_eq!(harness.scene.registry().item_count(), 2);
}

#[test]
fn spawner_station_slot_is_never_used() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    assert!(!harness
        .scene
        .registry()
        .has_item(harness.station(PLATE_CONTAINER)));
}

#[test]
fn counter_accepts_and_returns_an_item() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());

    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());
    assert_eq!(harness.held_def(harness.player_id()), None);
    assert_eq!(
        harness.held_def(harness.station(COUNTER)),
        Some(item_id("kitchen.plate"))
    );

    harness.tick(&press_interact());
    assert_eq!(
        harness.held_def(harness.player_id()),
        Some(item_id("kitchen.plate"))
    );
    assert_eq!(harness.held_def(harness.station(COUNTER)), None);
}

#[test]
fn transfer_is_refused_when_both_sides_hold_an_item() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());
    stand_before(&mut harness, CABBAGE_CRATE);
    harness.tick(&press_interact());

    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());
    assert_eq!(
        harness.held_def(harness.player_id()),
        Some(item_id("kitchen.cabbage"))
    );
    assert_eq!(
        harness.held_def(harness.station(COUNTER)),
        Some(item_id("kitchen.plate"))
    );
}

#[test]
fn transfer_is_a_no_op_when_both_sides_are_empty() {
    let mut harness = Harness::new();
    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());
    assert_eq!(harness.scene.registry().item_count(), 0);
}

#[test]
fn transformer_accepts_any_item_for_storage() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    stand_before(&mut harness, CUTTING_BOARD);
    harness.tick(&press_interact());
    assert_eq!(
        harness.held_def(harness.station(CUTTING_BOARD)),
        Some(item_id("kitchen.plate"))
    );
}

#[test]
fn cutting_board_chops_cabbage() {
    let mut harness = Harness::new();
    stand_before(&mut harness, CABBAGE_CRATE);
    harness.tick(&press_interact());
    stand_before(&mut harness, CUTTING_BOARD);
    harness.tick(&press_interact());
    harness.tick(&press_alternate());
    assert_eq!(
        harness.held_def(harness.station(CUTTING_BOARD)),
        Some(item_id("kitchen.cabbage_chopped"))
    );
    assert_eq!(harness.scene.registry().item_count(), 1);
}

#[test]
fn transform_is_refused_without_a_matching_recipe() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    stand_before(&mut harness, CUTTING_BOARD);
    harness.tick(&press_interact());
    harness.tick(&press_alternate());
    assert_eq!(
        harness.held_def(harness.station(CUTTING_BOARD)),
        Some(item_id("kitchen.plate"))
    );
}

#[test]
fn chopped_output_has_no_further_recipe() {
    let mut harness = Harness::new();
    stand_before(&mut harness, CABBAGE_CRATE);
    harness.tick(&press_interact());
    stand_before(&mut harness, CUTTING_BOARD);
    harness.tick(&press_interact());
    harness.tick(&press_alternate());
    harness.tick(&press_alternate());
    assert_eq!(
        harness.held_def(harness.station(CUTTING_BOARD)),
        Some(item_id("kitchen.cabbage_chopped"))
    );
}

#[test]
fn transform_on_an_empty_station_does_nothing() {
    let mut harness = Harness::new();
    stand_before(&mut harness, CUTTING_BOARD);
    harness.tick(&press_alternate());
    assert_eq!(harness.scene.registry().item_count(), 0);
}

#[test]
fn player_moves_at_fixed_speed_in_open_space() {
    let mut harness = Harness::new();
    harness.tick_n(&hold(InputAction::MoveDown), 10);
    let position = harness.player_position();
    let expected = -10.0 * PLAYER_MOVE_SPEED_UNITS_PER_SECOND * DT;
    assert!((position.z - expected).abs() < 1e-3);
    assert!(position.x.abs() < 1e-6);
}

#[test]
fn player_stops_short_of_the_station_row() {
    let mut harness = Harness::new();
    harness.tick_n(&hold(InputAction::MoveUp), 60);
    let position = harness.player_position();
    assert!(position.z > 0.7);
    assert!(position.z < 0.8);
}

#[test]
fn blocked_diagonal_slides_along_the_open_axis() {
    let mut harness = Harness::new();
    harness.place_player(station_x(PLATE_CONTAINER), 0.75);
    let input = InputSnapshot::empty()
        .with_action_down(InputAction::MoveUp, true)
        .with_action_down(InputAction::MoveRight, true);
    harness.tick(&input);
    let position = harness.player_position();
    assert!(position.x > 0.0);
    assert!((position.z - 0.75).abs() < 1e-6);
}

#[test]
fn fallback_prefers_the_x_axis_when_both_axes_are_clear() {
    // A small block on the diagonal leaves both single-axis moves open; the
    // committed move must be the X-only one, not the Z-only one.
    let mut world = KitchenWorld::default();
    let block = world.spawn(
        Transform {
            position: Vec3 {
                x: 3.0,
                y: 0.0,
                z: 3.0,
            },
            ..Transform::default()
        },
        "block",
    );
    world.apply_pending();
    world.find_entity_mut(block).expect("block").collider = Some(BoxCollider {
        half_extent_x: 0.05,
        half_extent_z: 0.05,
    });

    let direction = Vec3 {
        x: 1.0,
        y: 0.0,
        z: 1.0,
    };
    let committed = resolve_move(&world, Vec3::ZERO, direction, 5.0, PLAYER_PROBE)
        .expect("x axis is open");
    assert!(committed.x > 4.9);
    assert_eq!(committed.z, 0.0);
}

#[test]
fn fully_blocked_movement_leaves_the_player_in_place() {
    let mut harness = Harness::new();
    harness.place_player(station_x(PLATE_CONTAINER), 0.8);
    harness.tick(&hold(InputAction::MoveUp));
    let position = harness.player_position();
    assert!((position.z - 0.8).abs() < 1e-6);
    assert!(harness.scene.is_walking());
}

#[test]
fn is_walking_tracks_intent_not_displacement() {
    let mut harness = Harness::new();
    harness.tick(&hold(InputAction::MoveUp));
    assert!(harness.scene.is_walking());
    harness.tick(&InputSnapshot::empty());
    assert!(!harness.scene.is_walking());
}

#[test]
fn facing_turns_toward_the_intended_direction() {
    let mut harness = Harness::new();
    harness.tick(&hold(InputAction::MoveRight));
    let forward = harness.player_forward();
    assert!(forward.x > 0.0);
    assert!(forward.z > 0.0);

    harness.tick_n(&hold(InputAction::MoveRight), 30);
    let forward = harness.player_forward();
    assert!(forward.x > 0.99);
}

#[test]
fn facing_keeps_turning_while_blocked() {
    // Pressed into the station row, a diagonal intent moves nothing but the
    // facing still swings toward it.
    let mut harness = Harness::new();
    harness.place_player(station_x(PLATE_CONTAINER), 0.8);
    let input = InputSnapshot::empty()
        .with_action_down(InputAction::MoveUp, true)
        .with_action_down(InputAction::MoveRight, true);
    harness.tick_n(&input, 30);
    let position = harness.player_position();
    assert!((position.x - station_x(PLATE_CONTAINER)).abs() < 1e-6);
    assert!((position.z - 0.8).abs() < 1e-6);
    let forward = harness.player_forward();
    assert!(forward.x > 0.69);
    assert!(forward.z > 0.69);
}

#[test]
fn event_counts_roll_over_each_tick() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    let counts = harness.scene.last_event_counts();
    assert_eq!(counts.item_spawned, 1);
    assert_eq!(counts.held_item_changed, 1);
    assert_eq!(counts.total, 2);

    harness.tick(&InputSnapshot::empty());
    assert_eq!(harness.scene.last_event_counts().total, 0);
}

#[test]
fn selection_change_emits_a_single_event() {
    let mut harness = Harness::new();
    harness.place_player(station_x(COUNTER), 0.8);
    harness.tick(&InputSnapshot::empty());
    assert_eq!(harness.scene.last_event_counts().selection_changed, 1);
    harness.tick(&InputSnapshot::empty());
    assert_eq!(harness.scene.last_event_counts().selection_changed, 0);
}

#[test]
fn debug_title_reports_the_kitchen_census() {
    let mut harness = Harness::new();
    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    let title = harness.scene.debug_title(&harness.world).expect("title");
    assert_eq!(title, "kitchen | actors 1 | stations 4 | items 1 | idle");
}

#[test]
fn save_and_load_restore_the_kitchen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let save_path = dir.path().join(KITCHEN_SAVE_FILE);
    let mut harness = Harness::with_save_path(Some(save_path));

    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    stand_before(&mut harness, COUNTER);
    harness.tick(&press_interact());
    let saved_position = harness.player_position();
    harness.tick(&InputSnapshot::empty().with_save_pressed(true));

    // Mutate after saving: take the plate back and walk away.
    harness.tick(&press_interact());
    harness.tick_n(&hold(InputAction::MoveDown), 20);
    assert!(harness.held_def(harness.player_id()).is_some());

    harness.tick(&InputSnapshot::empty().with_load_pressed(true));
    assert_eq!(harness.held_def(harness.player_id()), None);
    assert_eq!(
        harness.held_def(harness.station(COUNTER)),
        Some(item_id("kitchen.plate"))
    );
    let position = harness.player_position();
    assert!((position.x - saved_position.x).abs() < 1e-6);
    assert!((position.z - saved_position.z).abs() < 1e-6);
}

#[test]
fn load_failure_leaves_the_kitchen_untouched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let save_path = dir.path().join(KITCHEN_SAVE_FILE);
    let mut harness = Harness::with_save_path(Some(save_path));

    stand_before(&mut harness, PLATE_CONTAINER);
    harness.tick(&press_interact());
    harness.tick(&InputSnapshot::empty().with_load_pressed(true));
    assert_eq!(
        harness.held_def(harness.player_id()),
        Some(item_id("kitchen.plate"))
    );
}

#[test]
fn registry_spawn_is_refused_for_an_occupied_holder() {
    let mut registry = ItemRegistry::default();
    let holder = EntityId(7);
    assert!(registry.spawn_item(ItemDefId(0), holder).is_some());
    assert!(registry.spawn_item(ItemDefId(1), holder).is_none());
    assert_eq!(registry.item_count(), 1);
}

#[test]
fn registry_transfer_moves_ownership_both_ways() {
    let mut registry = ItemRegistry::default();
    let a = EntityId(1);
    let b = EntityId(2);
    let item = registry.spawn_item(ItemDefId(0), a).expect("spawn");
    assert!(registry.transfer(item, b));
    assert!(!registry.has_item(a));
    assert_eq!(registry.held_item(b), Some(item));
    assert!(registry.transfer(item, a));
    assert_eq!(registry.held_item(a), Some(item));
}

#[test]
fn registry_transfer_is_refused_into_an_occupied_slot() {
    let mut registry = ItemRegistry::default();
    let a = EntityId(1);
    let b = EntityId(2);
    let item = registry.spawn_item(ItemDefId(0), a).expect("spawn");
    registry.spawn_item(ItemDefId(1), b).expect("spawn");
    assert!(!registry.transfer(item, b));
    assert_eq!(registry.held_item(a), Some(item));
}

#[test]
fn registry_transform_swaps_the_item_in_place() {
    let mut registry = ItemRegistry::default();
    let holder = EntityId(1);
    let item = registry.spawn_item(ItemDefId(0), holder).expect("spawn");
    let produced = registry.transform_item(item, ItemDefId(2)).expect("swap");
    assert_ne!(item, produced);
    assert_eq!(registry.held_item(holder), Some(produced));
    assert_eq!(
        registry.item(produced).map(ItemInstance::def),
        Some(ItemDefId(2))
    );
    assert!(registry.item(item).is_none());
    assert_eq!(registry.item_count(), 1);
}

#[test]
fn registry_destroy_frees_the_holder_slot() {
    let mut registry = ItemRegistry::default();
    let holder = EntityId(1);
    let item = registry.spawn_item(ItemDefId(0), holder).expect("spawn");
    assert!(registry.destroy_item(item));
    assert!(!registry.has_item(holder));
    assert!(!registry.destroy_item(item));
}

#[test]
fn recipe_table_returns_the_first_matching_entry() {
    let table = RecipeTable::from_pairs(&[
        RecipePair {
            input: ItemDefId(0),
            output: ItemDefId(1),
        },
        RecipePair {
            input: ItemDefId(0),
            output: ItemDefId(2),
        },
    ]);
    assert_eq!(table.output_for_input(ItemDefId(0)), Some(ItemDefId(1)));
    assert_eq!(table.output_for_input(ItemDefId(9)), None);
}

#[test]
fn resolve_move_returns_none_for_zero_direction() {
    let world = KitchenWorld::default();
    assert!(resolve_move(&world, Vec3::ZERO, Vec3::ZERO, 1.0, PLAYER_PROBE).is_none());
}
