//! YAML schema loader.
//!
//! This module handles loading entity definitions from YAML and validating
//! them before generation.
//!
//! Supports both:
//! - A single schema file with an `entities:` list
//! - A directory of entity files, each with an `entity:` wrapper

use crate::schema::model::{Entity, Schema};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Wrapper for a single-entity YAML file
#[derive(Debug, Deserialize)]
struct EntitySpec {
    entity: Entity,
}

/// Load entities from a schema file or a directory of entity files
///
/// # Example
///
/// ```ignore
/// use slategen::schema::load_schema;
///
/// let entities = load_schema("schema/blog.yaml").unwrap();
/// ```
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Vec<Entity>, String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(format!("Schema path does not exist: {}", path.display()));
    }

    let entities = if path.is_dir() {
        load_entities(path)?
    } else {
        let yaml_content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        parse_schema(&yaml_content)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?
    };

    validate_schema(&entities)?;
    Ok(entities)
}

/// Parse a schema document with an `entities:` list
pub fn parse_schema(yaml: &str) -> Result<Vec<Entity>, String> {
    let schema: Schema =
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse YAML: {}", e))?;
    Ok(schema.entities)
}

/// Load all entity files from a directory, ordered by file name
pub fn load_entities<P: AsRef<Path>>(dir: P) -> Result<Vec<Entity>, String> {
    let dir_path = dir.as_ref();

    let read_dir = fs::read_dir(dir_path)
        .map_err(|e| format!("Failed to read directory {}: {}", dir_path.display(), e))?;

    let mut paths = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();

        // Only process .yaml and .yml files
        if let Some(ext) = path.extension() {
            if ext == "yaml" || ext == "yml" {
                paths.push(path);
            }
        }
    }

    // read_dir order is platform dependent; generation order must not be
    paths.sort();

    let mut entities = Vec::new();
    for path in paths {
        match load_entity(&path) {
            Ok(entity) => entities.push(entity),
            Err(e) => return Err(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    Ok(entities)
}

/// Load a single entity definition from a YAML file
pub fn load_entity<P: AsRef<Path>>(path: P) -> Result<Entity, String> {
    let yaml_content =
        fs::read_to_string(path.as_ref()).map_err(|e| format!("Failed to read file: {}", e))?;

    let spec: EntitySpec = serde_yaml::from_str(&yaml_content)
        .map_err(|e| format!("Failed to parse YAML: {}", e))?;

    validate_entity(&spec.entity)?;
    Ok(spec.entity)
}

/// Validate a whole schema
///
/// Checks every entity on its own and rejects duplicate entity names.
/// Relationship destinations are checked later, by symbol resolution.
pub fn validate_schema(entities: &[Entity]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for entity in entities {
        validate_entity(entity)?;
        if !seen.insert(entity.name.as_str()) {
            return Err(format!("Entity '{}' is defined more than once", entity.name));
        }
    }
    Ok(())
}

/// Validate entity definition
///
/// Checks for:
/// - Non-empty entity and member names
/// - Unique attribute/substruct and relationship names
/// - Substruct attributes restricted to comparable types
/// - `ordered` only on to-many relationships
pub fn validate_entity(entity: &Entity) -> Result<(), String> {
    if entity.name.is_empty() {
        return Err("Entity name cannot be empty".to_string());
    }

    // Attributes and substructs share the binding's member namespace
    let mut members = HashSet::new();
    for attr in &entity.attributes {
        check_name(&attr.name, "Attribute", &entity.name)?;
        if !members.insert(attr.name.as_str()) {
            return Err(format!(
                "Duplicate member '{}' in entity '{}'",
                attr.name, entity.name
            ));
        }
    }

    for substruct in &entity.substructs {
        check_name(&substruct.var_name, "Substruct", &entity.name)?;
        if !members.insert(substruct.var_name.as_str()) {
            return Err(format!(
                "Duplicate member '{}' in entity '{}'",
                substruct.var_name, entity.name
            ));
        }

        let mut fields = HashSet::new();
        for attr in &substruct.attributes {
            check_name(&attr.name, "Substruct attribute", &entity.name)?;
            if !fields.insert(attr.name.as_str()) {
                return Err(format!(
                    "Duplicate attribute '{}' in substruct '{}.{}'",
                    attr.name, entity.name, substruct.var_name
                ));
            }
            if !attr.attr_type.is_comparable() {
                return Err(format!(
                    "Substruct attribute '{}.{}.{}' cannot be {}",
                    entity.name, substruct.var_name, attr.name, attr.attr_type
                ));
            }
        }
    }

    let mut relationships = HashSet::new();
    for relationship in &entity.relationships {
        check_name(&relationship.name, "Relationship", &entity.name)?;
        if !relationships.insert(relationship.name.as_str()) {
            return Err(format!(
                "Duplicate relationship '{}' in entity '{}'",
                relationship.name, entity.name
            ));
        }
        if relationship.ordered && !relationship.to_many {
            return Err(format!(
                "Relationship '{}.{}' is ordered but not to-many",
                entity.name, relationship.name
            ));
        }
    }

    Ok(())
}

fn check_name(name: &str, kind: &str, entity_name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!(
            "{} name cannot be empty in entity '{}'",
            kind, entity_name
        ));
    }
    Ok(())
}
