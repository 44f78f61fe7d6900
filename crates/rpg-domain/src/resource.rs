//! Delta de recursos consumibles (hit dice, rage charges, spell slots).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rpg_core::{DataOp, DataStore, EngineError, GameData};

pub const KIND_RESOURCE: &str = "resource";

/// Cambio en un recurso nombrado de una entidad. `tier` opcionalmente
/// distingue nivel (p.ej. slots de conjuro de nivel 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    pub entity_id: String,
    pub resource: String,
    pub amount: i64,
    pub tier: Option<u8>,
}

impl ResourceData {
    pub fn new(entity_id: impl Into<String>,
               resource: impl Into<String>,
               amount: i64,
               tier: Option<u8>)
               -> Self {
        Self { entity_id: entity_id.into(),
               resource: resource.into(),
               amount,
               tier }
    }

    /// Gasto: delta negativo.
    pub fn spend(entity_id: impl Into<String>, resource: impl Into<String>, amount: i64) -> Self {
        Self::new(entity_id, resource, -amount.abs(), None)
    }

    /// Recuperación: delta positivo.
    pub fn restore(entity_id: impl Into<String>, resource: impl Into<String>, amount: i64) -> Self {
        Self::new(entity_id, resource, amount.abs(), None)
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = Some(tier);
        self
    }
}

impl GameData for ResourceData {
    fn kind(&self) -> &str {
        KIND_RESOURCE
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn op(&self) -> DataOp {
        DataOp::Update
    }

    fn payload(&self) -> Value {
        serde_json::to_value(self).expect("serialize resource data")
    }

    fn apply(&self, store: &mut dyn DataStore) -> Result<(), EngineError> {
        store.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_and_restore_sign_conventions() {
        let spent = ResourceData::spend("wizard", "spell_slots", 1).with_tier(3);
        assert_eq!(spent.amount, -1);
        assert_eq!(spent.tier, Some(3));

        let restored = ResourceData::restore("barbarian", "rage_charges", 2);
        assert_eq!(restored.amount, 2);
        assert_eq!(restored.tier, None);
    }
}
