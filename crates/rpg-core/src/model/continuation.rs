//! Snapshot serializable de un pipeline en vuelo.
//!
//! Una `ContinuationData` captura lo mínimo para reanudar más tarde: qué
//! pipeline, en qué índice de stage quedó pausado (el siguiente sin
//! ejecutar), el input original, el valor intermedio y un bolso de contexto.
//! Debe sobrevivir una frontera de persistencia (JSON puro), porque entre la
//! suspensión y la reanudación suele mediar una decisión humana y
//! potencialmente un reinicio de proceso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::context::ExecutionContext;
use crate::model::Reference;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuationData {
    /// Identidad propia de la suspensión (útil como clave de persistencia).
    pub id: Uuid,
    /// Forma canónica de la referencia del pipeline a reanudar.
    pub pipeline_ref: String,
    /// Índice del siguiente stage sin ejecutar.
    pub stage_index: usize,
    /// Input original con el que se invocó el pipeline.
    pub original_input: Value,
    /// Valor intermedio en el momento de la pausa.
    pub current_value: Value,
    /// Snapshot del contexto ambiente (round, turno, call stack).
    pub context: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl ContinuationData {
    /// Captura el estado en vuelo de un pipeline que acaba de suspenderse.
    pub fn capture(reference: &Reference,
                   stage_index: usize,
                   original_input: Value,
                   current_value: Value,
                   ctx: &ExecutionContext)
                   -> Self {
        Self { id: Uuid::new_v4(),
               pipeline_ref: reference.to_string(),
               stage_index,
               original_input,
               current_value,
               context: ctx.snapshot(),
               created_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    use crate::registry::Registry;

    #[test]
    fn round_trips_through_json() {
        let registry = Arc::new(Registry::new());
        let ctx = ExecutionContext::new(registry).with_turn(3, "goblin");
        let reference = Reference::new("test", "pipeline", "attack");

        let continuation = ContinuationData::capture(&reference,
                                                     2,
                                                     json!({"attacker": "fighter"}),
                                                     json!({"damage": 12}),
                                                     &ctx);

        let encoded = serde_json::to_string(&continuation).expect("encode continuation");
        let decoded: ContinuationData = serde_json::from_str(&encoded).expect("decode continuation");
        assert_eq!(decoded, continuation);
        assert_eq!(decoded.pipeline_ref, "test:pipeline:attack");
        assert_eq!(decoded.stage_index, 2);
        assert_eq!(decoded.context["round"], json!(3));
    }
}
