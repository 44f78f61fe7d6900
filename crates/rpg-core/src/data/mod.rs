//! Modelo de efectos ("Data"): descriptores tipados de cambios de estado.
//!
//! El motor nunca escribe en un store. Cada stage puede reportar una lista de
//! efectos y el pipeline los acumula en orden de emisión; aplicarlos es
//! responsabilidad del llamador a través de su propio `DataStore`. El motor
//! está cerrado sobre la *interfaz* (`GameData`) y abierto sobre las
//! variantes: el dominio añade nuevas implementando el mismo contrato.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EngineError;

/// Operación sobre el store (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOp {
    Update,
    Append,
    Remove,
    Replace,
}

/// Descriptor polimórfico de un cambio de estado.
///
/// `entity_id` vacío significa efecto global (p.ej. una línea de log).
/// `payload` es la representación JSON completa del efecto; el store la
/// interpreta según `kind`.
pub trait GameData: fmt::Debug + Send + Sync {
    /// Discriminante estable de la variante ("hit_points", "log", ...).
    fn kind(&self) -> &str;

    fn entity_id(&self) -> &str;

    fn op(&self) -> DataOp;

    fn payload(&self) -> Value;

    /// Ejecuta el efecto contra un store del llamador. El motor no lo invoca.
    fn apply(&self, store: &mut dyn DataStore) -> Result<(), EngineError>;
}

/// Contrato del consumidor: un método que recibe un efecto y realiza la
/// operación correspondiente. El motor no impone nada sobre la
/// representación interna del store.
pub trait DataStore {
    fn apply(&mut self, data: &dyn GameData) -> Result<(), EngineError>;
}
