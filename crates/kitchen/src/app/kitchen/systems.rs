/// Everything a system may touch during one tick. Systems own no state of
/// their own; the scene passes its state in here and the host runs the
/// systems over it in a fixed order.
pub(crate) struct KitchenSystemContext<'a> {
    world: &'a mut KitchenWorld,
    input: &'a InputSnapshot,
    fixed_dt_seconds: f32,
    def_database: &'a DefDatabase,
    registry: &'a mut ItemRegistry,
    events: &'a mut KitchenEventBus,
    player: EntityId,
    station_kinds: &'a HashMap<EntityId, StationKind>,
    selected_station: &'a mut Option<EntityId>,
    last_interact_direction: &'a mut Vec3,
    is_walking: &'a mut bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KitchenSystem {
    Movement,
    Selection,
    Interaction,
}

/// Tick order. Movement runs first so selection sees this tick's position,
/// and interaction runs last so it acts on this tick's selection.
pub(crate) const KITCHEN_SYSTEM_ORDER: [KitchenSystem; 3] = [
    KitchenSystem::Movement,
    KitchenSystem::Selection,
    KitchenSystem::Interaction,
];

impl KitchenSystem {
    pub(crate) fn run(self, ctx: &mut KitchenSystemContext<'_>) {
        match self {
            Self::Movement => run_movement(ctx),
            Self::Selection => run_selection(ctx),
            Self::Interaction => run_interaction(ctx),
        }
    }
}

fn run_movement(ctx: &mut KitchenSystemContext<'_>) {
    let intended = Vec3::from_input_plane(ctx.input.movement_vector());
    *ctx.is_walking = !intended.is_zero();
    if intended.is_zero() {
        return;
    }
    *ctx.last_interact_direction = intended;

    let Some(origin) = ctx
        .world
        .find_entity(ctx.player)
        .map(|player| player.transform.position)
    else {
        return;
    };

    let distance = PLAYER_MOVE_SPEED_UNITS_PER_SECOND * ctx.fixed_dt_seconds;
    let delta = resolve_move(ctx.world, origin, intended, distance, PLAYER_PROBE);

    let Some(player) = ctx.world.find_entity_mut(ctx.player) else {
        return;
    };
    if let Some(delta) = delta {
        player.transform.position = player.transform.position.plus(delta);
    }
    // Facing always turns toward the direction the agent tried to move,
    // even when the move itself was blocked.
    let max_turn = PLAYER_ROTATE_SPEED_RADIANS_PER_SECOND * ctx.fixed_dt_seconds;
    player.transform.forward = rotate_toward(player.transform.forward, intended, max_turn);
}

fn run_selection(ctx: &mut KitchenSystemContext<'_>) {
    let current = selection_candidate(ctx);
    if current == *ctx.selected_station {
        return;
    }
    let previous = *ctx.selected_station;
    *ctx.selected_station = current;
    ctx.events.emit(KitchenEvent::SelectionChanged { previous, current });
}

fn selection_candidate(ctx: &KitchenSystemContext<'_>) -> Option<EntityId> {
    let origin = ctx
        .world
        .find_entity(ctx.player)
        .map(|player| player.transform.position)?;
    let direction = ctx.last_interact_direction.normalized_or_zero();
    if direction.is_zero() {
        return None;
    }
    let hit = ctx.world.cast_ray(origin, direction, INTERACT_DISTANCE)?;
    if ctx.station_kinds.contains_key(&hit.entity) {
        Some(hit.entity)
    } else {
        None
    }
}

fn run_interaction(ctx: &mut KitchenSystemContext<'_>) {
    if !ctx.input.interact_pressed() && !ctx.input.interact_alternate_pressed() {
        return;
    }
    let Some(station) = *ctx.selected_station else {
        debug!("interact_without_selection");
        return;
    };
    let Some(kind) = ctx.station_kinds.get(&station) else {
        return;
    };

    if ctx.input.interact_pressed() {
        match kind {
            StationKind::Spawner { spawns } => run_spawner_interact(ctx, station, *spawns),
            StationKind::PassThrough | StationKind::Transformer { .. } => {
                run_transfer_interact(ctx, station)
            }
        }
    }
    if ctx.input.interact_alternate_pressed() {
        if let StationKind::Transformer { recipes } = kind {
            run_transform_interact(ctx, station, recipes);
        }
    }
}

fn run_spawner_interact(ctx: &mut KitchenSystemContext<'_>, station: EntityId, spawns: ItemDefId) {
    // Spawners are pure factories: the item appears directly in the agent's
    // hands, never in a station slot, and only when the hands are empty.
    if ctx.registry.has_item(ctx.player) {
        debug!(?station, "spawner_refused_hands_full");
        return;
    }
    let Some(item) = ctx.registry.spawn_item(spawns, ctx.player) else {
        return;
    };
    ctx.events.emit(KitchenEvent::ItemSpawned {
        item,
        owner: ctx.player,
    });
    ctx.events.emit(KitchenEvent::HeldItemChanged {
        holder: ctx.player,
        item: Some(item),
    });
    let item_name = item_display_name(ctx.def_database, ctx.registry, item);
    info!(?station, item = item_name, "item_spawned");
}

fn run_transfer_interact(ctx: &mut KitchenSystemContext<'_>, station: EntityId) {
    let station_held = ctx.registry.held_item(station);
    let player_held = ctx.registry.held_item(ctx.player);
    let (item, from, to) = match (station_held, player_held) {
        (None, Some(item)) => (item, ctx.player, station),
        (Some(item), None) => (item, station, ctx.player),
        (Some(_), Some(_)) => {
            debug!(?station, "transfer_refused_both_occupied");
            return;
        }
        (None, None) => {
            debug!(?station, "transfer_refused_both_empty");
            return;
        }
    };
    if !ctx.registry.transfer(item, to) {
        return;
    }
    ctx.events.emit(KitchenEvent::HeldItemChanged {
        holder: from,
        item: None,
    });
    ctx.events.emit(KitchenEvent::HeldItemChanged {
        holder: to,
        item: Some(item),
    });
    let item_name = item_display_name(ctx.def_database, ctx.registry, item);
    info!(?from, ?to, item = item_name, "item_transferred");
}

fn run_transform_interact(
    ctx: &mut KitchenSystemContext<'_>,
    station: EntityId,
    recipes: &RecipeTable,
) {
    let Some(item) = ctx.registry.held_item(station) else {
        debug!(?station, "transform_refused_empty_station");
        return;
    };
    let Some(input_def) = ctx.registry.item(item).map(ItemInstance::def) else {
        return;
    };
    let Some(output_def) = recipes.output_for_input(input_def) else {
        debug!(?station, "transform_refused_no_recipe");
        return;
    };
    let Some(produced) = ctx.registry.transform_item(item, output_def) else {
        return;
    };
    ctx.events.emit(KitchenEvent::ItemTransformed {
        station,
        consumed: item,
        produced,
    });
    ctx.events.emit(KitchenEvent::HeldItemChanged {
        holder: station,
        item: Some(produced),
    });
    let item_name = item_display_name(ctx.def_database, ctx.registry, produced);
    info!(?station, item = item_name, "item_transformed");
}

fn item_display_name<'a>(
    def_database: &'a DefDatabase,
    registry: &ItemRegistry,
    item: ItemId,
) -> &'a str {
    registry
        .item(item)
        .and_then(|instance| def_database.item_def(instance.def()))
        .map(|def| def.display_name.as_str())
        .unwrap_or("unknown")
}
