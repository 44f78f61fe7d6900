//! Definiciones relacionadas a Stages.
//!
//! Un Stage es la unidad atómica de transformación dentro de un pipeline:
//! recibe el valor en curso y devuelve el siguiente valor, opcionalmente con
//! efectos (`GameData`) o una señal de suspensión. Este módulo define:
//! - `Stage`: interfaz neutra usada por el pipeline.
//! - `StageOutput`: resultado de una ejecución (incluye el marcador Suspend).
//! - `FnStage`: stage respaldado por closure.
//! - `TypedStage`: interfaz de alto nivel con tipos fuertes y su adaptador.

pub mod definition;
pub mod fn_stage;
pub mod output;
pub mod typed;

pub use definition::Stage;
pub use fn_stage::FnStage;
pub use output::StageOutput;
pub use typed::{TypedOutput, TypedStage};
