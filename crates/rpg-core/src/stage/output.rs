use serde_json::Value;

use crate::data::GameData;
use crate::model::DecisionRequest;

/// Resultado abstracto de ejecutar un stage.
///
/// `Suspend` es la convención elegida para que un stage señale "necesito
/// pausar aquí": devuelve el valor intermedio y la decisión requerida, y el
/// pipeline captura una `ContinuationData` apuntando al siguiente stage.
#[derive(Debug)]
pub enum StageOutput {
    /// Continuar con el nuevo valor, sin efectos que reportar.
    Continue(Value),
    /// Continuar con el nuevo valor y efectos emitidos por este stage.
    ContinueWith {
        value: Value,
        data: Vec<Box<dyn GameData>>,
    },
    /// Pausar el pipeline a la espera de una decisión externa.
    Suspend {
        value: Value,
        request: DecisionRequest,
    },
}
