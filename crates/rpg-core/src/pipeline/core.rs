//! Ejecución secuencial de stages con acumulación de efectos.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::builder::PipelineBuilder;
use super::result::PipelineResult;
use crate::context::ExecutionContext;
use crate::data::GameData;
use crate::errors::EngineError;
use crate::model::{ContinuationData, Reference};
use crate::stage::{Stage, StageOutput};

/// Composición ordenada de stages con entrada `I` y salida `O`.
///
/// Un `Pipeline` es stateless entre invocaciones: se construye una vez
/// (típicamente desde una factory del `Registry`), se invoca muchas veces y
/// nunca se muta después de construido. Dos invocaciones concurrentes del
/// mismo valor no interfieren; cada una lleva su propio acumulador.
pub struct Pipeline<I, O> {
    reference: Reference,
    stages: Vec<Box<dyn Stage>>,
    _io: PhantomData<fn(I) -> O>,
}

impl<I, O> std::fmt::Debug for Pipeline<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
         .field("reference", &self.reference)
         .field("stage_count", &self.stages.len())
         .finish()
    }
}

impl<I, O> Pipeline<I, O> {
    pub fn new(reference: Reference, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { reference,
               stages,
               _io: PhantomData }
    }

    pub fn builder(reference: Reference) -> PipelineBuilder<I, O> {
        PipelineBuilder::new(reference)
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl<I, O> Pipeline<I, O>
    where I: Serialize,
          O: DeserializeOwned + Default
{
    /// Ejecuta el pipeline completo con un input tipado.
    ///
    /// `process` nunca devuelve error: si un stage falla, o si el valor
    /// final no decodifica como `O`, se devuelve `Completed` con el valor
    /// cero de `O` y los efectos acumulados hasta ese punto. El error no se
    /// propaga al llamador; sí se registra con `tracing::warn!`.
    pub fn process(&self, ctx: &Arc<ExecutionContext>, input: I) -> PipelineResult<O> {
        let original = match serde_json::to_value(&input) {
            Ok(v) => v,
            Err(error) => {
                warn!(pipeline = %self.reference, %error, "input did not serialize; degraded completion");
                return PipelineResult::Completed { output: O::default(),
                                                   data: Vec::new() };
            }
        };

        self.run_from(ctx, original.clone(), original, 0, Vec::new())
    }

    /// Reanuda un pipeline suspendido con la decisión del usuario.
    ///
    /// Valida que la continuation pertenezca a este pipeline y que el índice
    /// grabado esté en rango; una continuation ajena o corrupta es un error
    /// del llamador, no un resultado de stage. La decisión se inyecta en el
    /// valor intermedio (clave `"decision"`) y la ejecución continúa en el
    /// índice grabado con el mismo algoritmo de acumulación.
    pub fn resume(&self,
                  ctx: &Arc<ExecutionContext>,
                  continuation: ContinuationData,
                  decision: Value)
                  -> Result<PipelineResult<O>, EngineError> {
        let expected = self.reference.to_string();
        if continuation.pipeline_ref != expected {
            return Err(EngineError::InvalidContinuation(format!(
                "continuation belongs to '{}', this pipeline is '{expected}'",
                continuation.pipeline_ref
            )));
        }
        if continuation.stage_index > self.stages.len() {
            return Err(EngineError::InvalidContinuation(format!(
                "stage index {} out of range ({} stages)",
                continuation.stage_index,
                self.stages.len()
            )));
        }

        let value = inject_decision(continuation.current_value, decision);
        Ok(self.run_from(ctx,
                         continuation.original_input,
                         value,
                         continuation.stage_index,
                         Vec::new()))
    }

    fn run_from(&self,
                ctx: &Arc<ExecutionContext>,
                original_input: Value,
                mut value: Value,
                start: usize,
                mut data: Vec<Box<dyn GameData>>)
                -> PipelineResult<O> {
        for (index, stage) in self.stages.iter().enumerate().skip(start) {
            debug!(pipeline = %self.reference, stage = stage.name(), index, "running stage");

            match stage.process(ctx, value) {
                Ok(StageOutput::Continue(next)) => value = next,
                Ok(StageOutput::ContinueWith { value: next, data: emitted }) => {
                    value = next;
                    data.extend(emitted);
                }
                Ok(StageOutput::Suspend { value: paused, request }) => {
                    debug!(pipeline = %self.reference, stage = stage.name(), "pipeline suspended");
                    let continuation = ContinuationData::capture(&self.reference,
                                                                 index + 1,
                                                                 original_input,
                                                                 paused,
                                                                 ctx);
                    return PipelineResult::Suspended { continuation,
                                                       request,
                                                       data };
                }
                Err(error) => {
                    // Contrato de `process`: el error no se propaga, se
                    // degrada a Completed con valor cero.
                    warn!(pipeline = %self.reference, stage = stage.name(), %error,
                          "stage failed; degraded completion with zero output");
                    return PipelineResult::Completed { output: O::default(),
                                                       data };
                }
            }
        }

        match serde_json::from_value::<O>(value) {
            Ok(output) => PipelineResult::Completed { output, data },
            Err(error) => {
                warn!(pipeline = %self.reference, %error,
                      "final value did not match declared output type; degraded completion");
                PipelineResult::Completed { output: O::default(),
                                            data }
            }
        }
    }
}

/// Inyección de la decisión en el valor intermedio: objetos JSON reciben la
/// clave `"decision"` (pisando cualquier resto anterior); cualquier otro
/// valor se envuelve como `{"value", "decision"}`.
fn inject_decision(value: Value, decision: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            map.insert("decision".to_string(), decision);
            Value::Object(map)
        }
        other => serde_json::json!({ "value": other, "decision": decision }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inject_into_object_sets_decision_key() {
        let out = inject_decision(json!({"damage": 12}), json!({"use_reaction": true}));
        assert_eq!(out, json!({"damage": 12, "decision": {"use_reaction": true}}));
    }

    #[test]
    fn inject_into_scalar_wraps_it() {
        let out = inject_decision(json!(7), json!("shield"));
        assert_eq!(out, json!({"value": 7, "decision": "shield"}));
    }

    #[test]
    fn stale_decision_is_overwritten() {
        let out = inject_decision(json!({"decision": "old"}), json!("new"));
        assert_eq!(out, json!({"decision": "new"}));
    }
}
