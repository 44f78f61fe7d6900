//! Entrada de log de partida (efecto global).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rpg_core::{DataOp, DataStore, EngineError, GameData};

pub const KIND_LOG: &str = "log";

/// Línea de texto libre para el registro de la partida. Global: no apunta a
/// ninguna entidad (`entity_id` vacío).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogData {
    pub message: String,
}

impl LogData {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl GameData for LogData {
    fn kind(&self) -> &str {
        KIND_LOG
    }

    fn entity_id(&self) -> &str {
        ""
    }

    fn op(&self) -> DataOp {
        DataOp::Append
    }

    fn payload(&self) -> Value {
        serde_json::to_value(self).expect("serialize log data")
    }

    fn apply(&self, store: &mut dyn DataStore) -> Result<(), EngineError> {
        store.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_global_append() {
        let l = LogData::new("Goblin takes damage");
        assert_eq!(l.entity_id(), "");
        assert_eq!(l.op(), DataOp::Append);
        assert_eq!(l.payload()["message"], "Goblin takes damage");
    }
}
