//! Tipos de datos del motor: identidad, suspensión y decisiones.

pub mod continuation;
pub mod decision;
pub mod reference;

pub use continuation::ContinuationData;
pub use decision::{DecisionOption, DecisionRequest, DecisionType};
pub use reference::Reference;
