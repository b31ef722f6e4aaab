#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ItemId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemInstance {
    def: ItemDefId,
    owner: EntityId,
}

impl ItemInstance {
    pub(crate) fn def(&self) -> ItemDefId {
        self.def
    }
}

/// The ownership graph. Every live item has exactly one owning holder and
/// every holder holds at most one item; `spawn_item`, `transfer`,
/// `transform_item` and `destroy_item` are the only mutation points, so the
/// forward map (`held_by_holder`) and the back-references (`ItemInstance::owner`)
/// can only ever change together.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ItemRegistry {
    next_item_id: u64,
    items: BTreeMap<ItemId, ItemInstance>,
    held_by_holder: HashMap<EntityId, ItemId>,
}

impl ItemRegistry {
    pub(crate) fn has_item(&self, holder: EntityId) -> bool {
        self.held_by_holder.contains_key(&holder)
    }

    pub(crate) fn held_item(&self, holder: EntityId) -> Option<ItemId> {
        self.held_by_holder.get(&holder).copied()
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&ItemInstance> {
        self.items.get(&id)
    }

    pub(crate) fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Creates a new item owned by `owner`. Refused when the owner's slot is
    /// already occupied.
    pub(crate) fn spawn_item(&mut self, def: ItemDefId, owner: EntityId) -> Option<ItemId> {
        if self.has_item(owner) {
            return None;
        }
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        self.items.insert(id, ItemInstance { def, owner });
        self.held_by_holder.insert(owner, id);
        self.debug_assert_consistent();
        Some(id)
    }

    /// Moves `item` from its current owner to `to`. Refused (no state
    /// change) when the item is unknown or the destination already holds an
    /// item; callers check `has_item` on the destination first.
    pub(crate) fn transfer(&mut self, item: ItemId, to: EntityId) -> bool {
        let Some(instance) = self.items.get(&item) else {
            return false;
        };
        let from = instance.owner;
        if from == to {
            return false;
        }
        if self.has_item(to) {
            return false;
        }

        self.held_by_holder.remove(&from);
        self.held_by_holder.insert(to, item);
        if let Some(instance) = self.items.get_mut(&item) {
            instance.owner = to;
        }
        self.debug_assert_consistent();
        true
    }

    /// Destroys `item` and creates a replacement of `new_def` in the same
    /// owner slot, as one step: no observer between calls can see the holder
    /// empty or the old item ownerless.
    pub(crate) fn transform_item(&mut self, item: ItemId, new_def: ItemDefId) -> Option<ItemId> {
        let instance = self.items.remove(&item)?;
        let replacement = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        self.items.insert(
            replacement,
            ItemInstance {
                def: new_def,
                owner: instance.owner,
            },
        );
        self.held_by_holder.insert(instance.owner, replacement);
        self.debug_assert_consistent();
        Some(replacement)
    }

    pub(crate) fn destroy_item(&mut self, item: ItemId) -> bool {
        let Some(instance) = self.items.remove(&item) else {
            return false;
        };
        self.held_by_holder.remove(&instance.owner);
        self.debug_assert_consistent();
        true
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.held_by_holder.clear();
        self.next_item_id = 0;
    }

    pub(crate) fn items(&self) -> impl Iterator<Item = (ItemId, &ItemInstance)> {
        self.items.iter().map(|(id, instance)| (*id, instance))
    }

    /// Bidirectional consistency: a disagreement here is a registry bug, not
    /// a runtime condition, so it only trips in debug builds.
    fn debug_assert_consistent(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for (id, instance) in &self.items {
            debug_assert_eq!(
                self.held_by_holder.get(&instance.owner),
                Some(id),
                "item {id:?} owner slot disagrees"
            );
        }
        for (holder, id) in &self.held_by_holder {
            let owner = self.items.get(id).map(|instance| instance.owner);
            debug_assert_eq!(owner, Some(*holder), "holder {holder:?} slot disagrees");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecipeEntry {
    input: ItemDefId,
    output: ItemDefId,
}

/// Input-to-output mapping for one transformer station. Lookup is first
/// match in entry order; the def database refuses duplicate inputs at load
/// time, so tables built from content never rely on that ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecipeTable {
    entries: Vec<RecipeEntry>,
}

impl RecipeTable {
    pub(crate) fn from_pairs(pairs: &[RecipePair]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|pair| RecipeEntry {
                    input: pair.input,
                    output: pair.output,
                })
                .collect(),
        }
    }

    pub(crate) fn output_for_input(&self, input: ItemDefId) -> Option<ItemDefId> {
        self.entries
            .iter()
            .find(|entry| entry.input == input)
            .map(|entry| entry.output)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StationKind {
    PassThrough,
    Spawner { spawns: ItemDefId },
    Transformer { recipes: RecipeTable },
}

impl StationKind {
    fn from_spec(kind: &StationSpecKind) -> Self {
        match kind {
            StationSpecKind::PassThrough => Self::PassThrough,
            StationSpecKind::Spawner { spawns } => Self::Spawner { spawns: *spawns },
            StationSpecKind::Transformer { recipes } => Self::Transformer {
                recipes: RecipeTable::from_pairs(recipes),
            },
        }
    }

    fn debug_name(&self) -> &'static str {
        match self {
            Self::PassThrough => "pass_through_station",
            Self::Spawner { .. } => "spawner_station",
            Self::Transformer { .. } => "transformer_station",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KitchenEvent {
    SelectionChanged {
        previous: Option<EntityId>,
        current: Option<EntityId>,
    },
    HeldItemChanged {
        holder: EntityId,
        item: Option<ItemId>,
    },
    ItemSpawned {
        item: ItemId,
        owner: EntityId,
    },
    ItemTransformed {
        station: EntityId,
        consumed: ItemId,
        produced: ItemId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KitchenEventKind {
    SelectionChanged,
    HeldItemChanged,
    ItemSpawned,
    ItemTransformed,
}

impl KitchenEvent {
    fn kind(self) -> KitchenEventKind {
        match self {
            Self::SelectionChanged { .. } => KitchenEventKind::SelectionChanged,
            Self::HeldItemChanged { .. } => KitchenEventKind::HeldItemChanged,
            Self::ItemSpawned { .. } => KitchenEventKind::ItemSpawned,
            Self::ItemTransformed { .. } => KitchenEventKind::ItemTransformed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct KitchenEventCounts {
    total: u32,
    selection_changed: u32,
    held_item_changed: u32,
    item_spawned: u32,
    item_transformed: u32,
}

impl KitchenEventCounts {
    fn record(&mut self, kind: KitchenEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            KitchenEventKind::SelectionChanged => {
                self.selection_changed = self.selection_changed.saturating_add(1)
            }
            KitchenEventKind::HeldItemChanged => {
                self.held_item_changed = self.held_item_changed.saturating_add(1)
            }
            KitchenEventKind::ItemSpawned => {
                self.item_spawned = self.item_spawned.saturating_add(1)
            }
            KitchenEventKind::ItemTransformed => {
                self.item_transformed = self.item_transformed.saturating_add(1)
            }
        }
    }
}

/// Per-tick notification channel for outward observers (UI highlighting,
/// held-item animation). Events accumulate during the tick and roll into
/// counts at the end.
#[derive(Debug, Default)]
pub(crate) struct KitchenEventBus {
    current_tick_events: Vec<KitchenEvent>,
    last_tick_counts: KitchenEventCounts,
}

impl KitchenEventBus {
    fn emit(&mut self, event: KitchenEvent) {
        self.current_tick_events.push(event);
    }

    fn finish_tick_rollover(&mut self) {
        let mut counts = KitchenEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(event.kind());
            match event {
                KitchenEvent::SelectionChanged { previous, current } => {
                    debug!(?previous, ?current, "selection_changed")
                }
                KitchenEvent::HeldItemChanged { holder, item } => {
                    debug!(?holder, ?item, "held_item_changed")
                }
                KitchenEvent::ItemSpawned { item, owner } => {
                    debug!(?item, ?owner, "item_spawned_event")
                }
                KitchenEvent::ItemTransformed {
                    station,
                    consumed,
                    produced,
                } => debug!(?station, ?consumed, ?produced, "item_transformed_event"),
            }
        }
        self.last_tick_counts = counts;
        self.current_tick_events.clear();
    }

    fn last_tick_counts(&self) -> KitchenEventCounts {
        self.last_tick_counts
    }
}
