//! Petición de decisión al usuario final.
//!
//! Cuando un pipeline se suspende, el resultado `Suspended` incluye una
//! `DecisionRequest` que describe qué elección se necesita. El motor no
//! renderiza nada; la capa de presentación consume el JSON
//! `{type, entity_id, options: [{id, label, available}], context: {...}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tipos de decisión soportados (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Reacción (p.ej. usar Shield ante un ataque).
    Reaction,
    /// Elección genérica entre opciones.
    Choice,
}

/// Opción etiquetada presentable al usuario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub label: String,
    pub available: bool,
}

impl DecisionOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, available: bool) -> Self {
        Self { id: id.into(),
               label: label.into(),
               available }
    }
}

/// Descripción de la decisión pendiente de un pipeline suspendido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub entity_id: String,
    pub options: Vec<DecisionOption>,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl DecisionRequest {
    pub fn new(decision_type: DecisionType, entity_id: impl Into<String>) -> Self {
        Self { decision_type,
               entity_id: entity_id.into(),
               options: Vec::new(),
               context: Map::new() }
    }

    /// Petición de reacción para una entidad.
    pub fn reaction(entity_id: impl Into<String>) -> Self {
        Self::new(DecisionType::Reaction, entity_id)
    }

    /// Elección genérica para una entidad.
    pub fn choice(entity_id: impl Into<String>) -> Self {
        Self::new(DecisionType::Choice, entity_id)
    }

    pub fn with_option(mut self, option: DecisionOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }
}
