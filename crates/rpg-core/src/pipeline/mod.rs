//! Pipeline secuencial: composición ordenada de stages, acumulación de
//! efectos en orden de llamada y contrato de suspensión/reanudación.

pub mod builder;
pub mod core;
pub mod result;

pub use builder::PipelineBuilder;
pub use core::Pipeline;
pub use result::PipelineResult;
