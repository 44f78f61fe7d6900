use crate::data::GameData;
use crate::model::{ContinuationData, DecisionRequest};

/// Resultado de una invocación de pipeline. Exactamente dos formas:
///
/// - `Completed`: salida tipada final más todos los efectos acumulados en
///   orden de emisión. Terminal, sin continuación posible.
/// - `Suspended`: continuación serializable, la decisión que se necesita del
///   usuario y los efectos parciales emitidos antes de la pausa (el llamador
///   debe aplicarlos igualmente; no hay rollback).
#[derive(Debug)]
pub enum PipelineResult<O> {
    Completed {
        output: O,
        data: Vec<Box<dyn GameData>>,
    },
    Suspended {
        continuation: ContinuationData,
        request: DecisionRequest,
        data: Vec<Box<dyn GameData>>,
    },
}

impl<O> PipelineResult<O> {
    pub fn is_completed(&self) -> bool {
        matches!(self, PipelineResult::Completed { .. })
    }

    /// Efectos acumulados, completos o parciales según la forma.
    pub fn data(&self) -> &[Box<dyn GameData>] {
        match self {
            PipelineResult::Completed { data, .. } => data,
            PipelineResult::Suspended { data, .. } => data,
        }
    }

    pub fn output(&self) -> Option<&O> {
        match self {
            PipelineResult::Completed { output, .. } => Some(output),
            PipelineResult::Suspended { .. } => None,
        }
    }

    pub fn into_output(self) -> Option<O> {
        match self {
            PipelineResult::Completed { output, .. } => Some(output),
            PipelineResult::Suspended { .. } => None,
        }
    }

    /// Continuación pendiente, si el pipeline quedó suspendido.
    pub fn continuation(&self) -> Option<&ContinuationData> {
        match self {
            PipelineResult::Completed { .. } => None,
            PipelineResult::Suspended { continuation, .. } => Some(continuation),
        }
    }
}
