pub(crate) type SaveLoadResult<T> = Result<T, String>;

#[derive(Debug, Serialize, Deserialize)]
struct SavedStation {
    station_def: String,
    position: Vec3,
    held_item: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedKitchen {
    save_version: u32,
    player_position: Vec3,
    player_forward: Vec3,
    last_interact_direction: Vec3,
    player_item: Option<String>,
    stations: Vec<SavedStation>,
}

pub(crate) struct KitchenScene {
    name: &'static str,
    spawn_position: Vec3,
    def_database: DefDatabase,
    save_path: Option<PathBuf>,
    player: Option<EntityId>,
    stations: Vec<EntityId>,
    station_kinds: HashMap<EntityId, StationKind>,
    registry: ItemRegistry,
    events: KitchenEventBus,
    selected_station: Option<EntityId>,
    last_interact_direction: Vec3,
    is_walking: bool,
}

impl KitchenScene {
    pub(crate) fn new(
        name: &'static str,
        spawn_position: Vec3,
        def_database: DefDatabase,
        save_path: Option<PathBuf>,
    ) -> Self {
        Self {
            name,
            spawn_position,
            def_database,
            save_path,
            player: None,
            stations: Vec::new(),
            station_kinds: HashMap::new(),
            registry: ItemRegistry::default(),
            events: KitchenEventBus::default(),
            selected_station: None,
            last_interact_direction: Vec3 {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
            is_walking: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn selected_station(&self) -> Option<EntityId> {
        self.selected_station
    }

    /// Whether the player intended to move last tick, whether or not the
    /// move was committed. Outward animation hooks key off this.
    pub(crate) fn is_walking(&self) -> bool {
        self.is_walking
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> Option<EntityId> {
        self.player
    }

    #[cfg(test)]
    pub(crate) fn station_at(&self, index: usize) -> Option<EntityId> {
        self.stations.get(index).copied()
    }

    #[cfg(test)]
    pub(crate) fn last_event_counts(&self) -> KitchenEventCounts {
        self.events.last_tick_counts()
    }

    fn held_item_name(&self, holder: EntityId) -> Option<String> {
        let item = self.registry.held_item(holder)?;
        let def = self.registry.item(item).map(ItemInstance::def)?;
        self.def_database
            .item_def(def)
            .map(|item_def| item_def.name.clone())
    }

    fn snapshot(&self, world: &KitchenWorld) -> SaveLoadResult<SavedKitchen> {
        let player_id = self.player.ok_or("no player to save")?;
        let player = world
            .find_entity(player_id)
            .ok_or("player entity missing from world")?;

        let mut stations = Vec::with_capacity(self.stations.len());
        for (index, station_id) in self.stations.iter().enumerate() {
            let entity = world
                .find_entity(*station_id)
                .ok_or_else(|| format!("station {index} missing from world"))?;
            let spec = self
                .def_database
                .stations()
                .get(index)
                .ok_or_else(|| format!("station {index} missing from defs"))?;
            stations.push(SavedStation {
                station_def: spec.name.clone(),
                position: entity.transform.position,
                held_item: self.held_item_name(*station_id),
            });
        }

        Ok(SavedKitchen {
            save_version: SAVE_VERSION,
            player_position: player.transform.position,
            player_forward: player.transform.forward,
            last_interact_direction: self.last_interact_direction,
            player_item: self.held_item_name(player_id),
            stations,
        })
    }

    fn save_to_disk(&self, world: &KitchenWorld) -> SaveLoadResult<()> {
        let Some(path) = self.save_path.as_ref() else {
            return Err("no save path configured".to_string());
        };
        let saved = self.snapshot(world)?;
        let json = serde_json::to_string_pretty(&saved)
            .map_err(|err| format!("failed to serialize save: {err}"))?;

        // Write to a sibling temp file first so a crash mid-write never
        // leaves a truncated save behind.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|err| format!("failed to write {}: {err}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .map_err(|err| format!("failed to move save into place: {err}"))?;
        Ok(())
    }

    fn load_from_disk(&mut self, world: &mut KitchenWorld) -> SaveLoadResult<()> {
        let Some(path) = self.save_path.as_ref() else {
            return Err("no save path configured".to_string());
        };
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        let saved: SavedKitchen = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| format!("failed to parse save: {err}"))?;
        self.apply_saved(saved, world)
    }

    fn apply_saved(&mut self, saved: SavedKitchen, world: &mut KitchenWorld) -> SaveLoadResult<()> {
        if saved.save_version != SAVE_VERSION {
            return Err(format!(
                "unsupported save version {} (expected {SAVE_VERSION})",
                saved.save_version
            ));
        }
        if saved.stations.len() != self.stations.len() {
            return Err(format!(
                "save has {} stations, scene has {}",
                saved.stations.len(),
                self.stations.len()
            ));
        }
        let player_id = self.player.ok_or("no player to restore")?;

        // Resolve every item name before touching live state so a bad save
        // cannot leave the kitchen half restored.
        let player_item_def = saved
            .player_item
            .as_deref()
            .map(|name| self.resolve_item_name(name))
            .transpose()?;
        let mut station_restores = Vec::with_capacity(saved.stations.len());
        for (index, saved_station) in saved.stations.iter().enumerate() {
            let spec = self
                .def_database
                .stations()
                .get(index)
                .ok_or_else(|| format!("station {index} missing from defs"))?;
            if saved_station.station_def != spec.name {
                return Err(format!(
                    "station {index} is '{}' in the save but '{}' in the scene",
                    saved_station.station_def, spec.name
                ));
            }
            let held = saved_station
                .held_item
                .as_deref()
                .map(|name| self.resolve_item_name(name))
                .transpose()?;
            station_restores.push(held);
        }

        let player = world
            .find_entity_mut(player_id)
            .ok_or("player entity missing from world")?;
        player.transform.position = saved.player_position;
        player.transform.forward = saved.player_forward;
        self.last_interact_direction = saved.last_interact_direction;
        self.selected_station = None;

        let live_items: Vec<ItemId> = self.registry.items().map(|(id, _)| id).collect();
        for item in live_items {
            self.registry.destroy_item(item);
        }
        if let Some(def) = player_item_def {
            self.registry.spawn_item(def, player_id);
        }
        for (station_id, held) in self.stations.iter().zip(station_restores) {
            if let Some(def) = held {
                self.registry.spawn_item(def, *station_id);
            }
        }
        Ok(())
    }

    fn resolve_item_name(&self, name: &str) -> SaveLoadResult<ItemDefId> {
        self.def_database
            .item_def_id_by_name(name)
            .ok_or_else(|| format!("save references unknown item '{name}'"))
    }
}
