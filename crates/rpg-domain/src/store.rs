//! Store de referencia en memoria.
//!
//! Implementación mínima del contrato `DataStore` para tests y demos: un
//! registro por entidad (HP, HP temporales, condiciones, recursos) más un
//! log global. Los consumidores reales (bots, persistencia) implementan el
//! mismo contrato con su propia representación.

use std::collections::HashMap;

use rpg_core::{DataOp, DataStore, EngineError, GameData};

use crate::condition::ConditionData;
use crate::hit_points::HitPointsData;
use crate::log::LogData;
use crate::resource::ResourceData;
use crate::{KIND_CONDITION, KIND_HIT_POINTS, KIND_LOG, KIND_RESOURCE};

/// Estado mutable de una entidad dentro del store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    pub hit_points: i32,
    pub temporary_hit_points: i32,
    /// condición -> duración restante en rounds (None = indefinida)
    pub conditions: HashMap<String, Option<u32>>,
    pub resources: HashMap<String, i64>,
}

#[derive(Debug, Default)]
pub struct MemoryDataStore {
    entities: HashMap<String, EntityRecord>,
    log: Vec<String>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Siembra una entidad con HP iniciales.
    pub fn seed_entity(&mut self, entity_id: impl Into<String>, hit_points: i32) {
        self.entities
            .entry(entity_id.into())
            .or_default()
            .hit_points = hit_points;
    }

    pub fn entity(&self, entity_id: &str) -> Option<&EntityRecord> {
        self.entities.get(entity_id)
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn decode<T: serde::de::DeserializeOwned>(data: &dyn GameData) -> Result<T, EngineError> {
        serde_json::from_value(data.payload()).map_err(|e| {
            EngineError::Internal(format!("malformed '{}' payload: {e}", data.kind()))
        })
    }
}

impl DataStore for MemoryDataStore {
    fn apply(&mut self, data: &dyn GameData) -> Result<(), EngineError> {
        match data.kind() {
            KIND_HIT_POINTS => {
                let hp: HitPointsData = Self::decode(data)?;
                let record = self.entities.entry(hp.entity_id.clone()).or_default();
                if hp.temporary {
                    record.temporary_hit_points += hp.amount;
                } else {
                    record.hit_points += hp.amount;
                }
                Ok(())
            }
            KIND_LOG => {
                let line: LogData = Self::decode(data)?;
                self.log.push(line.message);
                Ok(())
            }
            KIND_CONDITION => {
                let condition: ConditionData = Self::decode(data)?;
                let record = self.entities.entry(condition.entity_id.clone()).or_default();
                match data.op() {
                    DataOp::Remove => {
                        record.conditions.remove(&condition.condition);
                    }
                    _ => {
                        record.conditions
                              .insert(condition.condition, condition.duration_rounds);
                    }
                }
                Ok(())
            }
            KIND_RESOURCE => {
                let resource: ResourceData = Self::decode(data)?;
                let record = self.entities.entry(resource.entity_id.clone()).or_default();
                *record.resources.entry(resource.resource).or_insert(0) += resource.amount;
                Ok(())
            }
            other => Err(EngineError::Internal(format!("unknown data kind '{other}'"))),
        }
    }
}
