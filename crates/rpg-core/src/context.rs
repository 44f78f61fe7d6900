//! Contexto de ejecución ambiente entregado a cada invocación.
//!
//! Estado read-mostly que atraviesa invocaciones anidadas de pipelines:
//! round actual, entidad con el turno, un handle al `Registry` para resolver
//! pipelines anidados y metadatos de anidamiento (enlace al padre, depth,
//! call stack) usados para trazabilidad.
//!
//! `nest` deriva un hijo sin mutar jamás al padre: el call stack se copia y
//! se extiende (copy-on-append), el resto de campos ambiente se hereda.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Round actual del encuentro (0 si no aplica).
    pub round: u32,
    /// Entidad cuyo turno está en curso (vacío si no aplica).
    pub active_entity: String,
    /// Registry para resolver pipelines anidados.
    pub registry: Arc<Registry>,
    /// Contexto padre, si esta invocación fue anidada.
    pub parent: Option<Arc<ExecutionContext>>,
    /// Profundidad de anidamiento (0 en la raíz).
    pub depth: u32,
    /// Nombres de stages/pipelines atravesados hasta aquí.
    pub call_stack: Vec<String>,
}

impl ExecutionContext {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { round: 0,
               active_entity: String::new(),
               registry,
               parent: None,
               depth: 0,
               call_stack: Vec::new() }
    }

    /// Fija round y entidad activa (estilo builder).
    pub fn with_turn(mut self, round: u32, active_entity: impl Into<String>) -> Self {
        self.round = round;
        self.active_entity = active_entity.into();
        self
    }

    pub fn with_call_stack(mut self, call_stack: Vec<String>) -> Self {
        self.call_stack = call_stack;
        self
    }

    /// Deriva un contexto hijo para una invocación anidada.
    ///
    /// No hay detección de ciclos: quien dependa de `depth` para cortar
    /// recursión desbocada debe imponer su propio máximo.
    pub fn nest(self: &Arc<Self>, name: impl Into<String>) -> Arc<ExecutionContext> {
        let mut call_stack = self.call_stack.clone();
        call_stack.push(name.into());

        Arc::new(ExecutionContext { round: self.round,
                                    active_entity: self.active_entity.clone(),
                                    registry: Arc::clone(&self.registry),
                                    parent: Some(Arc::clone(self)),
                                    depth: self.depth + 1,
                                    call_stack })
    }

    /// Snapshot JSON del estado ambiente, apto para una `ContinuationData`.
    pub fn snapshot(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("round".to_string(), json!(self.round));
        map.insert("active_entity".to_string(), json!(self.active_entity));
        map.insert("depth".to_string(), json!(self.depth));
        map.insert("call_stack".to_string(), json!(self.call_stack));
        map
    }
}
