//! Directorio concurrente de factories de pipelines.
//!
//! Las factories de pipelines distintos tienen tipos de entrada/salida
//! distintos, así que el registry las guarda borradas (`Box<dyn Any>`) junto
//! a una etiqueta de tipo. `get` compara la etiqueta antes del downcast y
//! produce un error estructurado de type-mismatch en vez de depender de una
//! aserción de tipos en runtime. La clave del mapa es la forma canónica
//! `module:type:id` de la referencia.
//!
//! Registro y lookup son seguros bajo uso concurrente arbitrario: un único
//! `RwLock` protege el mapa (lecturas concurrentes, escrituras exclusivas).

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::errors::EngineError;
use crate::model::Reference;
use crate::pipeline::Pipeline;

type SharedFactory<I, O> = Arc<dyn Fn() -> Pipeline<I, O> + Send + Sync>;

struct RegistryEntry {
    input_type: TypeId,
    output_type: TypeId,
    input_name: &'static str,
    output_name: &'static str,
    factory: Box<dyn Any + Send + Sync>,
}

impl RegistryEntry {
    fn signature(&self) -> String {
        format!("{} -> {}", self.input_name, self.output_name)
    }
}

/// Mapa process-wide de referencia → factory de pipeline.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una factory bajo la referencia. Last write wins: una entrada
    /// previa con la misma referencia se sobreescribe sin error.
    ///
    /// La factory debe ser barata y libre de efectos más allá de construir
    /// el pipeline: el registry la invoca una vez por `get`, fuera del lock,
    /// así que puede volver a entrar al registry si lo necesita.
    pub fn register<I, O, F>(&self, reference: &Reference, factory: F)
        where I: 'static,
              O: 'static,
              F: Fn() -> Pipeline<I, O> + Send + Sync + 'static
    {
        let shared: SharedFactory<I, O> = Arc::new(factory);
        let entry = RegistryEntry { input_type: TypeId::of::<I>(),
                                    output_type: TypeId::of::<O>(),
                                    input_name: type_name::<I>(),
                                    output_name: type_name::<O>(),
                                    factory: Box::new(shared) };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(reference.to_string(), entry);
    }

    /// Resuelve la referencia y construye un pipeline nuevo.
    ///
    /// Falla con `NotFound` si no hay entrada, y con `TypeMismatch` (distinto
    /// y nombrado) si la factory registrada declara otros tipos que los que
    /// pide el llamador. Nunca entra en pánico ni sustituye tipos en
    /// silencio.
    pub fn get<I, O>(&self, reference: &Reference) -> Result<Pipeline<I, O>, EngineError>
        where I: 'static,
              O: 'static
    {
        let key = reference.to_string();
        let factory = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

            let entry = entries.get(&key)
                               .ok_or_else(|| EngineError::NotFound { reference: key.clone() })?;

            if entry.input_type != TypeId::of::<I>() || entry.output_type != TypeId::of::<O>() {
                return Err(EngineError::TypeMismatch {
                    reference: key,
                    registered: entry.signature(),
                    requested: format!("{} -> {}", type_name::<I>(), type_name::<O>()),
                });
            }

            entry.factory
                 .downcast_ref::<SharedFactory<I, O>>()
                 .map(Arc::clone)
                 .ok_or_else(|| EngineError::Internal(format!("factory downcast failed for {key}")))?
        };

        // El lock se suelta antes de invocar la factory: una factory puede
        // registrar o resolver sub-pipelines en este mismo registry.
        Ok(factory())
    }

    /// ¿Hay una entrada bajo esta referencia? (sin chequeo de tipos)
    pub fn contains(&self, reference: &Reference) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&reference.to_string())
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();
        f.debug_struct("Registry").field("entries", &keys).finish()
    }
}

static GLOBAL: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

/// Registry por defecto del proceso. Útil cuando no se quiere inyectar uno
/// propio; los tests suelen crear instancias aisladas con `Registry::new`.
pub fn global() -> Arc<Registry> {
    Arc::clone(&GLOBAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    fn attack_ref() -> Reference {
        Reference::new("test", "pipeline", "attack")
    }

    fn empty_pipeline() -> Pipeline<i64, i64> {
        Pipeline::builder(attack_ref()).build()
    }

    #[test]
    fn register_then_get_with_matching_types() {
        let registry = Registry::new();
        registry.register(&attack_ref(), empty_pipeline);

        let pipeline = registry.get::<i64, i64>(&attack_ref()).expect("registered lookup");
        assert_eq!(pipeline.reference(), &attack_ref());
    }

    #[test]
    fn missing_reference_is_not_found() {
        let registry = Registry::new();
        let err = registry.get::<i64, i64>(&attack_ref()).unwrap_err();
        assert_eq!(err,
                   EngineError::NotFound { reference: "test:pipeline:attack".to_string() });
    }

    #[test]
    fn mismatched_types_are_a_distinct_error() {
        let registry = Registry::new();
        registry.register(&attack_ref(), empty_pipeline);

        let err = registry.get::<String, i64>(&attack_ref()).unwrap_err();
        match err {
            EngineError::TypeMismatch { reference, .. } => {
                assert_eq!(reference, "test:pipeline:attack");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn global_registry_is_shared() {
        let a = global();
        let b = global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
