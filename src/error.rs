//! Error type for generation runs.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Any condition that aborts a generation run
#[derive(Debug)]
pub enum GenerateError {
    /// Schema could not be loaded or failed validation
    Schema(String),
    /// Configuration file could not be loaded or is inconsistent
    Config(String),
    /// Two entities share a name
    DuplicateEntity(String),
    /// A relationship points at an entity that is not part of the run
    UnresolvedRelationship {
        entity: String,
        relationship: String,
        destination: String,
    },
    /// Forced non-optional substruct attribute without a default, under `deny_missing_defaults`
    MissingDefault { entity: String, property: String },
    /// Template placeholders left unbound, under `strict_templates`
    UnresolvedPlaceholders(Vec<String>),
    /// Writing an output file failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Schema(msg) => write!(f, "Schema error: {}", msg),
            GenerateError::Config(msg) => write!(f, "Config error: {}", msg),
            GenerateError::DuplicateEntity(name) => {
                write!(f, "Entity '{}' is defined more than once", name)
            }
            GenerateError::UnresolvedRelationship {
                entity,
                relationship,
                destination,
            } => write!(
                f,
                "Relationship '{}.{}' targets unknown entity '{}'",
                entity, relationship, destination
            ),
            GenerateError::MissingDefault { entity, property } => write!(
                f,
                "Substruct property {}.{} is forced non-optional but has no default",
                entity, property
            ),
            GenerateError::UnresolvedPlaceholders(names) => {
                write!(f, "Unresolved template placeholders: {}", names.join(", "))
            }
            GenerateError::Io { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
