//! # Slategen: Swift bindings for Core Data schemas
//!
//! Slategen reads an entity schema and generates immutable Swift binding types
//! over the Core Data managed objects that store them, together with
//! relationship accessors, equality operators and, optionally, the managed
//! object property declarations themselves.
//!
//! ## Example schema
//!
//! ```yaml
//! entities:
//!   - name: User
//!     class: UserMO
//!     attributes:
//!       - { name: age, type: integer64, scalar: true }
//!       - { name: nickname, type: string, optional: true }
//!     relationships:
//!       - { name: posts, destination: Post, to_many: true, ordered: true }
//!   - name: Post
//!     attributes:
//!       - { name: title, type: string }
//!     relationships:
//!       - { name: author, destination: User }
//! ```
//!
//! ## Example run
//!
//! ```rust,no_run
//! use slategen::{generate, load_schema, GeneratorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entities = load_schema("schema/blog.yaml")?;
//!     let config = GeneratorConfig {
//!         class_pattern: "Slate{}".to_string(),
//!         ..Default::default()
//!     };
//!     let report = generate(&entities, &config)?;
//!     println!("wrote {} files", report.files.len());
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use codegen::{generate, Advisory, GenerationReport, SymbolTable};
pub use config::GeneratorConfig;
pub use error::{GenerateError, Result};
pub use schema::{load_schema, Attribute, AttributeType, Entity, Relationship, Substruct};
