use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable handle for an item definition, valid for the lifetime of the
/// `DefDatabase` that interned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemDefId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDef {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StationDefKind {
    PassThrough,
    Spawner { spawns: String },
    Transformer { recipes: Vec<RecipeDef> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: StationDefKind,
}

/// On-disk shape of `assets/kitchen/defs.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefFile {
    pub items: Vec<ItemDef>,
    pub stations: Vec<StationDef>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read def file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse def file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
    #[error("item def name cannot be empty")]
    EmptyItemName,
    #[error("duplicate item def name: {name}")]
    DuplicateItemDef { name: String },
    #[error("duplicate station def name: {name}")]
    DuplicateStationDef { name: String },
    #[error("station def '{station}' references unknown item '{item}'")]
    UnknownItem { station: String, item: String },
    #[error("station def '{station}' repeats recipe input '{input}'")]
    DuplicateRecipeInput { station: String, input: String },
}
