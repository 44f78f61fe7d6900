//! Builder para `Pipeline`.

use std::marker::PhantomData;

use std::sync::Arc;

use serde_json::Value;

use super::core::Pipeline;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::model::Reference;
use crate::stage::{FnStage, Stage, StageOutput};

/// Acumula stages en orden y produce un `Pipeline<I, O>` inmutable.
pub struct PipelineBuilder<I, O> {
    reference: Reference,
    stages: Vec<Box<dyn Stage>>,
    _io: PhantomData<fn(I) -> O>,
}

impl<I, O> PipelineBuilder<I, O> {
    pub fn new(reference: Reference) -> Self {
        Self { reference,
               stages: Vec::new(),
               _io: PhantomData }
    }

    /// Añade un stage al final de la secuencia.
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Atajo para añadir un stage respaldado por closure.
    pub fn stage_fn<F>(self, name: impl Into<String>, run: F) -> Self
        where F: Fn(&Arc<ExecutionContext>, Value) -> Result<StageOutput, EngineError> + Send + Sync + 'static
    {
        self.stage(FnStage::new(name, run))
    }

    pub fn build(self) -> Pipeline<I, O> {
        Pipeline::new(self.reference, self.stages)
    }
}
