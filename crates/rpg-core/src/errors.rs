//! Errores específicos del motor.
//!
//! `EngineError` es serializable porque algunos errores pueden viajar junto a
//! una `ContinuationData` persistida (misma frontera que en la suspensión).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    /// No existe una factory registrada bajo esa referencia.
    #[error("pipeline not found: {reference}")]
    NotFound { reference: String },

    /// La factory registrada declara otros tipos de entrada/salida.
    #[error("type mismatch for {reference}: registered {registered}, requested {requested}")]
    TypeMismatch {
        reference: String,
        registered: String,
        requested: String,
    },

    /// Un stage devolvió error durante `process`.
    #[error("stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },

    /// La cadena no cumple el formato `module:type:id`.
    #[error("invalid reference '{input}': {reason}")]
    InvalidReference { input: String, reason: String },

    /// La continuation no corresponde a este pipeline o está corrupta.
    #[error("invalid continuation: {0}")]
    InvalidContinuation(String),

    #[error("internal: {0}")]
    Internal(String),
}
