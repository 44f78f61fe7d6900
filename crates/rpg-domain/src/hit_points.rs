//! Delta de puntos de golpe sobre una entidad.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rpg_core::{DataOp, DataStore, EngineError, GameData};

pub const KIND_HIT_POINTS: &str = "hit_points";

/// Cambio de HP: cantidad con signo, con flag para HP temporales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPointsData {
    pub entity_id: String,
    pub amount: i32,
    pub temporary: bool,
}

impl HitPointsData {
    pub fn new(entity_id: impl Into<String>, amount: i32, temporary: bool) -> Self {
        Self { entity_id: entity_id.into(),
               amount,
               temporary }
    }

    /// Daño: delta negativo sobre HP reales.
    pub fn damage(entity_id: impl Into<String>, amount: i32) -> Self {
        Self::new(entity_id, -amount.abs(), false)
    }

    /// Curación: delta positivo sobre HP reales.
    pub fn healing(entity_id: impl Into<String>, amount: i32) -> Self {
        Self::new(entity_id, amount.abs(), false)
    }

    /// Concesión de HP temporales.
    pub fn temporary(entity_id: impl Into<String>, amount: i32) -> Self {
        Self::new(entity_id, amount.abs(), true)
    }
}

impl GameData for HitPointsData {
    fn kind(&self) -> &str {
        KIND_HIT_POINTS
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn op(&self) -> DataOp {
        DataOp::Update
    }

    fn payload(&self) -> Value {
        serde_json::to_value(self).expect("serialize hit points data")
    }

    fn apply(&self, store: &mut dyn DataStore) -> Result<(), EngineError> {
        store.apply(self)
    }
}
