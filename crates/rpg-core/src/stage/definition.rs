use std::sync::Arc;

use serde_json::Value;

use super::StageOutput;
use crate::context::ExecutionContext;
use crate::errors::EngineError;

/// Trait que define un Stage: una transformación nombrada valor → valor.
///
/// Los stages deben ser libres de efectos sobre cualquier store compartido;
/// todo cambio observable fluye por la lista de efectos del `StageOutput`.
/// Un stage no conoce su posición en el pipeline ni a sus vecinos.
///
/// El contexto llega como `Arc` para que un stage pueda derivar un hijo con
/// `ctx.nest(...)` y lanzar una invocación anidada vía `ctx.registry`.
pub trait Stage: Send + Sync {
    /// Nombre estable del stage (aparece en call stacks y trazas).
    fn name(&self) -> &str;

    /// Transformación pura respecto a estado compartido.
    fn process(&self, ctx: &Arc<ExecutionContext>, input: Value) -> Result<StageOutput, EngineError>;
}
