//! Schema model and loading.
//!
//! The model is read-only once loaded; generation never mutates it.

pub mod attr_type;
pub mod loader;
pub mod model;

pub use attr_type::{AttributeType, TypePolicy};
pub use loader::{
    load_entities, load_entity, load_schema, parse_schema, validate_entity, validate_schema,
};
pub use model::{
    Attribute, Entity, Relationship, Schema, Substruct, DEFAULT_KEY, OPT_IN_STRUCT_KEY,
};
