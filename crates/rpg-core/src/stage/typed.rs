use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Stage, StageOutput};
use crate::context::ExecutionContext;
use crate::data::GameData;
use crate::errors::EngineError;
use crate::model::DecisionRequest;

/// Resultado tipado de ejecutar un `TypedStage`.
///
/// Permite implementar stages con tipos concretos y convertirlos a la
/// representación neutra (`serde_json::Value`) que el pipeline encadena.
#[derive(Debug)]
pub enum TypedOutput<O> {
    Continue(O),
    ContinueWith {
        value: O,
        data: Vec<Box<dyn GameData>>,
    },
    Suspend {
        value: O,
        request: DecisionRequest,
    },
}

/// Interfaz de alto nivel para definir stages con tipos fuertes.
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador de
/// abajo convierte esa ejecución a la interfaz neutra `Stage`. Un fallo de
/// decodificación del input es un fallo del stage, nunca un panic.
pub trait TypedStage {
    type Input: DeserializeOwned;
    type Output: Serialize;

    fn name(&self) -> &str;

    fn run_typed(&self,
                 ctx: &Arc<ExecutionContext>,
                 input: Self::Input)
                 -> Result<TypedOutput<Self::Output>, EngineError>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStage` implementa el `Stage` neutro.
// -------------------------------------------------------------
impl<T> Stage for T where T: TypedStage + Send + Sync
{
    fn name(&self) -> &str {
        <Self as TypedStage>::name(self)
    }

    fn process(&self, ctx: &Arc<ExecutionContext>, input: Value) -> Result<StageOutput, EngineError> {
        let stage = <Self as TypedStage>::name(self).to_string();

        let typed_in: <Self as TypedStage>::Input =
            serde_json::from_value(input).map_err(|e| EngineError::StageFailed {
                                             stage: stage.clone(),
                                             message: format!("input decode: {e}"),
                                         })?;

        let encode = |value: <Self as TypedStage>::Output| {
            serde_json::to_value(&value).map_err(|e| EngineError::StageFailed {
                                            stage: stage.clone(),
                                            message: format!("output encode: {e}"),
                                        })
        };

        Ok(match self.run_typed(ctx, typed_in)? {
            TypedOutput::Continue(value) => StageOutput::Continue(encode(value)?),
            TypedOutput::ContinueWith { value, data } => StageOutput::ContinueWith { value: encode(value)?,
                                                                                    data },
            TypedOutput::Suspend { value, request } => StageOutput::Suspend { value: encode(value)?,
                                                                              request },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    use crate::registry::Registry;

    #[derive(Debug, Serialize, Deserialize)]
    struct Roll {
        total: i32,
    }

    struct AddModifier {
        bonus: i32,
    }

    impl TypedStage for AddModifier {
        type Input = Roll;
        type Output = Roll;

        fn name(&self) -> &str {
            "add-modifier"
        }

        fn run_typed(&self, _ctx: &Arc<ExecutionContext>, input: Roll) -> Result<TypedOutput<Roll>, EngineError> {
            Ok(TypedOutput::Continue(Roll { total: input.total + self.bonus }))
        }
    }

    #[test]
    fn adapter_decodes_and_encodes_via_serde() {
        let stage = AddModifier { bonus: 3 };
        let ctx = Arc::new(ExecutionContext::new(Arc::new(Registry::new())));

        let out = stage.process(&ctx, json!({"total": 10})).expect("stage runs");
        match out {
            StageOutput::Continue(v) => assert_eq!(v, json!({"total": 13})),
            other => panic!("expected Continue, got {other:?}"),
        }
    }

    #[test]
    fn bad_input_is_a_stage_failure_not_a_panic() {
        let stage = AddModifier { bonus: 3 };
        let ctx = Arc::new(ExecutionContext::new(Arc::new(Registry::new())));

        let err = stage.process(&ctx, json!("not a roll")).unwrap_err();
        assert!(matches!(err, EngineError::StageFailed { stage, .. } if stage == "add-modifier"));
    }
}
