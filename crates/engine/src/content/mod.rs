mod database;
mod types;

pub use database::{
    builtin_def_set, load_def_database, DefDatabase, RecipePair, StationSpec, StationSpecKind,
};
pub use types::{ContentError, DefFile, ItemDef, ItemDefId, RecipeDef, StationDef, StationDefKind};
