use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::types::{
    ContentError, DefFile, ItemDef, ItemDefId, RecipeDef, StationDef, StationDefKind,
};

const DEF_FILE_NAME: &str = "defs.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipePair {
    pub input: ItemDefId,
    pub output: ItemDefId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSpecKind {
    PassThrough,
    Spawner { spawns: ItemDefId },
    Transformer { recipes: Vec<RecipePair> },
}

/// A station definition with every item name resolved to an interned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSpec {
    pub name: String,
    pub kind: StationSpecKind,
}

/// Validated, name-interned view of a `DefFile`. Construction is the single
/// place content invariants are enforced; everything downstream works with
/// ids that are known to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct DefDatabase {
    items: Vec<ItemDef>,
    item_ids_by_name: HashMap<String, ItemDefId>,
    stations: Vec<StationSpec>,
}

impl DefDatabase {
    pub fn from_defs(defs: DefFile) -> Result<Self, ContentError> {
        let mut items = Vec::with_capacity(defs.items.len());
        let mut item_ids_by_name = HashMap::new();
        for item in defs.items {
            if item.name.is_empty() {
                return Err(ContentError::EmptyItemName);
            }
            if item_ids_by_name.contains_key(&item.name) {
                return Err(ContentError::DuplicateItemDef { name: item.name });
            }
            let id = ItemDefId(items.len() as u32);
            item_ids_by_name.insert(item.name.clone(), id);
            items.push(item);
        }

        let mut stations = Vec::with_capacity(defs.stations.len());
        let mut seen_station_names: HashSet<&str> = HashSet::new();
        for station in &defs.stations {
            if !seen_station_names.insert(&station.name) {
                return Err(ContentError::DuplicateStationDef {
                    name: station.name.clone(),
                });
            }
            stations.push(resolve_station(station, &item_ids_by_name)?);
        }

        Ok(Self {
            items,
            item_ids_by_name,
            stations,
        })
    }

    pub fn item_def_id_by_name(&self, name: &str) -> Option<ItemDefId> {
        self.item_ids_by_name.get(name).copied()
    }

    pub fn item_def(&self, id: ItemDefId) -> Option<&ItemDef> {
        self.items.get(id.0 as usize)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn stations(&self) -> &[StationSpec] {
        &self.stations
    }

    pub fn station_by_name(&self, name: &str) -> Option<&StationSpec> {
        self.stations.iter().find(|station| station.name == name)
    }
}

fn resolve_station(
    station: &StationDef,
    item_ids_by_name: &HashMap<String, ItemDefId>,
) -> Result<StationSpec, ContentError> {
    let resolve_item = |item: &str| {
        item_ids_by_name
            .get(item)
            .copied()
            .ok_or_else(|| ContentError::UnknownItem {
                station: station.name.clone(),
                item: item.to_string(),
            })
    };

    let kind = match &station.kind {
        StationDefKind::PassThrough => StationSpecKind::PassThrough,
        StationDefKind::Spawner { spawns } => StationSpecKind::Spawner {
            spawns: resolve_item(spawns)?,
        },
        StationDefKind::Transformer { recipes } => {
            let mut resolved = Vec::with_capacity(recipes.len());
            for RecipeDef { input, output } in recipes {
                let input_id = resolve_item(input)?;
                let output_id = resolve_item(output)?;
                if resolved
                    .iter()
                    .any(|pair: &RecipePair| pair.input == input_id)
                {
                    return Err(ContentError::DuplicateRecipeInput {
                        station: station.name.clone(),
                        input: input.clone(),
                    });
                }
                resolved.push(RecipePair {
                    input: input_id,
                    output: output_id,
                });
            }
            StationSpecKind::Transformer { recipes: resolved }
        }
    };

    Ok(StationSpec {
        name: station.name.clone(),
        kind,
    })
}

/// Definitions compiled into the binary so the sim runs without assets on
/// disk. A `defs.json` under the assets dir overrides this set entirely.
pub fn builtin_def_set() -> DefFile {
    let item = |name: &str, display_name: &str| ItemDef {
        name: name.to_string(),
        display_name: display_name.to_string(),
    };
    DefFile {
        items: vec![
            item("kitchen.plate", "Plate"),
            item("kitchen.cabbage", "Cabbage"),
            item("kitchen.cabbage_chopped", "Chopped Cabbage"),
            item("kitchen.tomato", "Tomato"),
            item("kitchen.tomato_chopped", "Chopped Tomato"),
        ],
        stations: vec![
            StationDef {
                name: "kitchen.counter".to_string(),
                kind: StationDefKind::PassThrough,
            },
            StationDef {
                name: "kitchen.plate_container".to_string(),
                kind: StationDefKind::Spawner {
                    spawns: "kitchen.plate".to_string(),
                },
            },
            StationDef {
                name: "kitchen.cabbage_crate".to_string(),
                kind: StationDefKind::Spawner {
                    spawns: "kitchen.cabbage".to_string(),
                },
            },
            StationDef {
                name: "kitchen.cutting_board".to_string(),
                kind: StationDefKind::Transformer {
                    recipes: vec![
                        RecipeDef {
                            input: "kitchen.cabbage".to_string(),
                            output: "kitchen.cabbage_chopped".to_string(),
                        },
                        RecipeDef {
                            input: "kitchen.tomato".to_string(),
                            output: "kitchen.tomato_chopped".to_string(),
                        },
                    ],
                },
            },
        ],
    }
}

/// Loads `defs.json` from the assets dir, falling back to the builtin set
/// when the file does not exist.
pub fn load_def_database(assets_dir: &Path) -> Result<DefDatabase, ContentError> {
    let path = assets_dir.join(DEF_FILE_NAME);
    if !path.is_file() {
        debug!(path = %path.display(), "def_file_missing_using_builtin");
        return DefDatabase::from_defs(builtin_def_set());
    }

    let raw = fs::read_to_string(&path).map_err(|source| ContentError::ReadFile {
        path: path.clone(),
        source,
    })?;
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let defs: DefFile = serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
        ContentError::Parse {
            path: path.clone(),
            source,
        }
    })?;
    let database = DefDatabase::from_defs(defs)?;
    info!(
        path = %path.display(),
        items = database.item_count(),
        stations = database.stations().len(),
        "defs_loaded"
    );
    Ok(database)
}
