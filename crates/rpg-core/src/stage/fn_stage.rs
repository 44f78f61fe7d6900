use std::sync::Arc;

use serde_json::Value;

use super::{Stage, StageOutput};
use crate::context::ExecutionContext;
use crate::errors::EngineError;

type StageFn = dyn Fn(&Arc<ExecutionContext>, Value) -> Result<StageOutput, EngineError> + Send + Sync;

/// Stage respaldado por un closure. Útil en tests y pipelines pequeños donde
/// declarar un struct por transformación no aporta nada.
pub struct FnStage {
    name: String,
    run: Box<StageFn>,
}

impl FnStage {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
        where F: Fn(&Arc<ExecutionContext>, Value) -> Result<StageOutput, EngineError> + Send + Sync + 'static
    {
        Self { name: name.into(),
               run: Box::new(run) }
    }
}

impl Stage for FnStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, ctx: &Arc<ExecutionContext>, input: Value) -> Result<StageOutput, EngineError> {
        (self.run)(ctx, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::registry::Registry;

    #[test]
    fn closure_receives_value_and_context() {
        let stage = FnStage::new("double", |_ctx, input| {
            let n = input.as_i64().unwrap_or(0);
            Ok(StageOutput::Continue(json!(n * 2)))
        });

        let ctx = Arc::new(ExecutionContext::new(Arc::new(Registry::new())));
        let out = stage.process(&ctx, json!(21)).expect("stage runs");
        match out {
            StageOutput::Continue(v) => assert_eq!(v, json!(42)),
            other => panic!("expected Continue, got {other:?}"),
        }
    }
}
