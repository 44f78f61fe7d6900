//! rpg-domain: variantes de efecto (`GameData`) del dominio de juego y un
//! store de referencia en memoria. El motor (rpg-core) está cerrado sobre la
//! interfaz y abierto sobre estas variantes.

pub mod condition;
pub mod hit_points;
pub mod log;
pub mod resource;
pub mod store;

pub use condition::{ConditionData, KIND_CONDITION};
pub use hit_points::{HitPointsData, KIND_HIT_POINTS};
pub use log::{KIND_LOG, LogData};
pub use resource::{KIND_RESOURCE, ResourceData};
pub use store::{EntityRecord, MemoryDataStore};
