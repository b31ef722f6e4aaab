impl Scene for KitchenScene {
    fn load(&mut self, world: &mut KitchenWorld) {
        let player = world.spawn_actor(
            Transform {
                position: self.spawn_position,
                ..Transform::default()
            },
            "player",
        );
        self.player = Some(player);

        let specs = self.def_database.stations().to_vec();
        for (index, spec) in specs.iter().enumerate() {
            let kind = StationKind::from_spec(&spec.kind);
            let position = Vec3 {
                x: STATION_ROW_START_X + STATION_ROW_SPACING_X * index as f32,
                y: 0.0,
                z: STATION_ROW_Z,
            };
            let id = world.spawn_station(
                Transform {
                    position,
                    ..Transform::default()
                },
                kind.debug_name(),
            );
            self.stations.push(id);
            self.station_kinds.insert(id, kind);
        }

        let side_wall = BoxCollider {
            half_extent_x: WALL_HALF_THICKNESS,
            half_extent_z: WALL_DISTANCE_Z,
        };
        let end_wall = BoxCollider {
            half_extent_x: WALL_DISTANCE_X,
            half_extent_z: WALL_HALF_THICKNESS,
        };
        let walls = [
            (wall_position(WALL_DISTANCE_X, 0.0), side_wall),
            (wall_position(-WALL_DISTANCE_X, 0.0), side_wall),
            (wall_position(0.0, WALL_DISTANCE_Z), end_wall),
            (wall_position(0.0, -WALL_DISTANCE_Z), end_wall),
        ];
        let mut wall_ids = Vec::with_capacity(walls.len());
        for (position, collider) in walls {
            let id = world.spawn(
                Transform {
                    position,
                    ..Transform::default()
                },
                "wall",
            );
            wall_ids.push((id, collider));
        }

        // Colliders are assigned after the deferred spawns land.
        world.apply_pending();
        let wall_colliders: HashMap<EntityId, BoxCollider> = wall_ids.into_iter().collect();
        for entity in world.entities_mut() {
            if self.station_kinds.contains_key(&entity.id) {
                entity.collider = Some(BoxCollider {
                    half_extent_x: STATION_HALF_EXTENT,
                    half_extent_z: STATION_HALF_EXTENT,
                });
            } else if let Some(collider) = wall_colliders.get(&entity.id) {
                entity.collider = Some(*collider);
            }
        }

        info!(
            scene = self.name,
            stations = self.stations.len(),
            order = KITCHEN_SYSTEM_ORDER_TEXT,
            "scene_loaded"
        );
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut KitchenWorld,
    ) -> SceneCommand {
        if input.load_pressed() {
            match self.load_from_disk(world) {
                Ok(()) => info!(scene = self.name, "kitchen_restored"),
                Err(reason) => warn!(scene = self.name, reason, "load_failed"),
            }
        }

        if let Some(player) = self.player {
            let mut ctx = KitchenSystemContext {
                world: &mut *world,
                input,
                fixed_dt_seconds,
                def_database: &self.def_database,
                registry: &mut self.registry,
                events: &mut self.events,
                player,
                station_kinds: &self.station_kinds,
                selected_station: &mut self.selected_station,
                last_interact_direction: &mut self.last_interact_direction,
                is_walking: &mut self.is_walking,
            };
            for system in KITCHEN_SYSTEM_ORDER {
                system.run(&mut ctx);
            }
        }

        if input.save_pressed() {
            match self.save_to_disk(world) {
                Ok(()) => info!(scene = self.name, "kitchen_saved"),
                Err(reason) => warn!(scene = self.name, reason, "save_failed"),
            }
        }

        self.events.finish_tick_rollover();
        let counts = self.events.last_tick_counts();
        if counts.total > 0 {
            debug!(
                selection_changed = counts.selection_changed,
                held_item_changed = counts.held_item_changed,
                item_spawned = counts.item_spawned,
                item_transformed = counts.item_transformed,
                "tick_events"
            );
        }
        SceneCommand::None
    }

    fn unload(&mut self, world: &mut KitchenWorld) {
        world.clear();
        self.player = None;
        self.stations.clear();
        self.station_kinds.clear();
        self.registry.clear();
        self.selected_station = None;
        self.is_walking = false;
        info!(scene = self.name, "scene_unloaded");
    }

    fn debug_title(&self, world: &KitchenWorld) -> Option<String> {
        let actors = world
            .entities()
            .iter()
            .filter(|entity| entity.actor)
            .count();
        let motion = if self.is_walking() { "walking" } else { "idle" };
        Some(format!(
            "{} | actors {} | stations {} | items {} | {}",
            self.name,
            actors,
            self.stations.len(),
            self.registry.item_count(),
            motion
        ))
    }
}

fn wall_position(x: f32, z: f32) -> Vec3 {
    Vec3 { x, y: 0.0, z }
}
