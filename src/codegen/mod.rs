//! Swift binding generation.
//!
//! Generation runs in two phases: [`SymbolTable::resolve`] names every entity,
//! then the [`Emitter`] renders each entity through the [`template`] engine and
//! [`materialize`] writes the results.

pub mod emit;
pub mod fs_utils;
pub mod materialize;
pub mod storage;
pub mod strategy;
pub mod symbols;
pub mod template;
pub mod templates;
pub mod utils;

// Re-export key types
pub use emit::{Advisory, EmitOptions, EmittedEntity, Emitter};
pub use materialize::{generate, GenerationReport, OutputMode};
pub use strategy::{assignment_strategy, AssignmentStrategy, ValueRead};
pub use symbols::SymbolTable;
pub use template::{Bindings, Template};
