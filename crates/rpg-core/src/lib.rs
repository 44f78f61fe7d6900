//! rpg-core: motor de transformación/ejecución de mecánicas de juego.
//!
//! Una mecánica discreta (un ataque, aplicar daño, un descanso) se expresa
//! como un pipeline nombrado y componible: consume input tipado, produce
//! output tipado y reporta por separado los cambios de estado (`GameData`)
//! que el llamador debe persistir. Los pipelines pueden suspenderse a la
//! espera de una decisión externa y reanudarse desde estado serializado.

pub mod context;
pub mod data;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod stage;

pub use context::ExecutionContext;
pub use data::{DataOp, DataStore, GameData};
pub use errors::EngineError;
pub use model::{ContinuationData, DecisionOption, DecisionRequest, DecisionType, Reference};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineResult};
pub use registry::Registry;
pub use stage::{FnStage, Stage, StageOutput, TypedOutput, TypedStage};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    // Humo: addFive -> double sobre enteros, sin efectos.
    #[test]
    fn two_stage_arithmetic_pipeline_completes() {
        let pipeline: Pipeline<i64, i64> =
            Pipeline::builder(Reference::new("test", "pipeline", "math"))
                .stage_fn("addFive", |_ctx, v| {
                    Ok(StageOutput::Continue(json!(v.as_i64().unwrap_or(0) + 5)))
                })
                .stage_fn("double", |_ctx, v| {
                    Ok(StageOutput::Continue(json!(v.as_i64().unwrap_or(0) * 2)))
                })
                .build();

        let ctx = Arc::new(ExecutionContext::new(Arc::new(Registry::new())));
        let result = pipeline.process(&ctx, 10);

        match result {
            PipelineResult::Completed { output, data } => {
                assert_eq!(output, 30);
                assert!(data.is_empty());
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }
}
