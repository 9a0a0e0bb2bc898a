//! Writing generated code to disk.
//!
//! A run resolves every entity first, then emits entities in input order.
//! The file pattern decides the layout: with the `{}` placeholder each entity
//! gets its own file, written as soon as the entity is emitted; without it
//! all entities share one file, written once at the end. Files already
//! written are left in place if a later entity fails.

use crate::codegen::emit::{Advisory, EmitOptions, Emitter};
use crate::codegen::fs_utils;
use crate::codegen::symbols::SymbolTable;
use crate::codegen::utils::{apply_pattern, is_per_entity};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::schema::Entity;
use std::path::PathBuf;

/// Extension of every generated file
pub const SWIFT_EXTENSION: &str = "swift";

/// Binding file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One file per entity, each with its own header
    PerEntity,
    /// One file holding every entity after a single header
    Aggregated,
}

impl OutputMode {
    pub fn for_pattern(file_pattern: &str) -> Self {
        if is_per_entity(file_pattern) {
            OutputMode::PerEntity
        } else {
            OutputMode::Aggregated
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
    pub advisories: Vec<Advisory>,
}

/// Generate bindings (and, if configured, managed object files) for `entities`
///
/// # Example
///
/// ```ignore
/// use slategen::{generate, load_schema, GeneratorConfig};
///
/// let entities = load_schema("schema/blog.yaml").unwrap();
/// let config = GeneratorConfig {
///     class_pattern: "Slate{}".to_string(),
///     output_dir: "Generated".into(),
///     ..Default::default()
/// };
/// let report = generate(&entities, &config).unwrap();
/// ```
pub fn generate(
    entities: &[Entity],
    config: &GeneratorConfig,
) -> Result<GenerationReport, GenerateError> {
    config.validate().map_err(GenerateError::Config)?;

    // Phase 1: every name is known before any code is emitted
    let symbols = SymbolTable::resolve(entities, &config.class_pattern, &config.backing_pattern)?;
    let emitter = Emitter::new(&symbols, EmitOptions::from(config));

    // Phase 2: emit and write
    let mode = OutputMode::for_pattern(&config.file_pattern);
    let mut report = GenerationReport::default();
    let mut accumulator = match mode {
        OutputMode::Aggregated => emitter.file_header(&config.file_pattern)?,
        OutputMode::PerEntity => String::new(),
    };

    for entity in entities {
        let filename = apply_pattern(&config.file_pattern, &entity.name);
        if mode == OutputMode::PerEntity {
            accumulator = emitter.file_header(&filename)?;
        }

        let emitted = emitter.emit_entity(entity)?;
        accumulator += &emitted.code;
        report.advisories.extend(emitted.advisories);

        if mode == OutputMode::PerEntity {
            let path = config
                .output_dir
                .join(format!("{}.{}", filename, SWIFT_EXTENSION));
            fs_utils::write_file(&path, &accumulator)?;
            report.files.push(path);
        }
    }

    if let Some(entity_dir) = &config.entity_output_dir {
        for entity in entities {
            let filename = format!("{}.{}", emitter.backing_name(entity)?, SWIFT_EXTENSION);
            let file = emitter.storage_file(entity, &filename)?;
            let path = entity_dir.join(&filename);
            fs_utils::write_file(&path, file)?;
            report.files.push(path);
        }
    }

    if mode == OutputMode::Aggregated {
        let path = config
            .output_dir
            .join(format!("{}.{}", config.file_pattern, SWIFT_EXTENSION));
        fs_utils::write_file(&path, &accumulator)?;
        report.files.push(path);
    }

    tracing::info!(
        "Generated {} entities into {} files ({} advisories)",
        entities.len(),
        report.files.len(),
        report.advisories.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_pattern() {
        assert_eq!(OutputMode::for_pattern("{}+Slate"), OutputMode::PerEntity);
        assert_eq!(OutputMode::for_pattern("SlateModels"), OutputMode::Aggregated);
    }

    #[test]
    fn test_invalid_config_rejected_before_resolution() {
        let config = GeneratorConfig {
            file_pattern: String::new(),
            ..Default::default()
        };
        assert!(matches!(generate(&[], &config), Err(GenerateError::Config(_))));
    }
}
