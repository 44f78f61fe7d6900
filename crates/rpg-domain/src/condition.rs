//! Alta/baja de condiciones sobre una entidad.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rpg_core::{DataOp, DataStore, EngineError, GameData};

pub const KIND_CONDITION: &str = "condition";

/// Toggle de condición: activar añade la condición (con duración opcional en
/// rounds), desactivar la elimina.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionData {
    pub entity_id: String,
    pub condition: String,
    pub active: bool,
    pub duration_rounds: Option<u32>,
}

impl ConditionData {
    /// La entidad gana la condición.
    pub fn gain(entity_id: impl Into<String>,
                condition: impl Into<String>,
                duration_rounds: Option<u32>)
                -> Self {
        Self { entity_id: entity_id.into(),
               condition: condition.into(),
               active: true,
               duration_rounds }
    }

    /// La entidad pierde la condición.
    pub fn clear(entity_id: impl Into<String>, condition: impl Into<String>) -> Self {
        Self { entity_id: entity_id.into(),
               condition: condition.into(),
               active: false,
               duration_rounds: None }
    }
}

impl GameData for ConditionData {
    fn kind(&self) -> &str {
        KIND_CONDITION
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn op(&self) -> DataOp {
        if self.active {
            DataOp::Append
        } else {
            DataOp::Remove
        }
    }

    fn payload(&self) -> Value {
        serde_json::to_value(self).expect("serialize condition data")
    }

    fn apply(&self, store: &mut dyn DataStore) -> Result<(), EngineError> {
        store.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_maps_to_append_and_clear_to_remove() {
        let gained = ConditionData::gain("fighter", "raging", Some(10));
        assert_eq!(gained.op(), DataOp::Append);
        assert_eq!(gained.duration_rounds, Some(10));

        let cleared = ConditionData::clear("fighter", "raging");
        assert_eq!(cleared.op(), DataOp::Remove);
        assert_eq!(cleared.duration_rounds, None);
    }
}
