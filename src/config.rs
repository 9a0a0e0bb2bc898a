//! Generation run configuration.
//!
//! Loaded from a YAML file (all keys optional) and overridden field by field
//! from the command line.

use crate::codegen::utils::is_per_entity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_pattern() -> String {
    "{}".to_string()
}

fn default_file_pattern() -> String {
    "{}Slate".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Options for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Emit bindings as final classes instead of structs
    #[serde(default)]
    pub use_class: bool,
    /// Binding type name pattern, `{}` is the entity name
    #[serde(default = "default_pattern")]
    pub class_pattern: String,
    /// Managed object class pattern, `{}` is the entity's declared class
    #[serde(default = "default_pattern")]
    pub backing_pattern: String,
    /// Output file name pattern (without extension); `{}` selects one file per entity
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// When set, managed object property files are written here too
    #[serde(default)]
    pub entity_output_dir: Option<PathBuf>,
    /// Extra module imported by every binding file
    #[serde(default)]
    pub import_module: Option<String>,
    /// Bind integer attributes as `Int`
    #[serde(default)]
    pub use_int: bool,
    /// Record the command line in each file header
    #[serde(default)]
    pub embed_command: bool,
    /// The command line recorded when `embed_command` is set
    #[serde(default)]
    pub command_line: Option<String>,
    /// Fail instead of warn on forced substruct members without a default
    #[serde(default)]
    pub deny_missing_defaults: bool,
    /// Fail on template placeholders left unbound
    #[serde(default)]
    pub strict_templates: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            use_class: false,
            class_pattern: default_pattern(),
            backing_pattern: default_pattern(),
            file_pattern: default_file_pattern(),
            output_dir: default_output_dir(),
            entity_output_dir: None,
            import_module: None,
            use_int: false,
            embed_command: false,
            command_line: None,
            deny_missing_defaults: false,
            strict_templates: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        let config: GeneratorConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config YAML {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.class_pattern.is_empty() {
            return Err("class_pattern cannot be empty".to_string());
        }
        if self.file_pattern.is_empty() {
            return Err("file_pattern cannot be empty".to_string());
        }
        if !is_per_entity(&self.class_pattern) {
            return Err(format!(
                "class_pattern '{}' must contain the {{}} entity placeholder",
                self.class_pattern
            ));
        }
        if !is_per_entity(&self.backing_pattern) {
            return Err(format!(
                "backing_pattern '{}' must contain the {{}} entity placeholder",
                self.backing_pattern
            ));
        }
        Ok(())
    }

    /// One output file per entity rather than a single file
    pub fn file_per_entity(&self) -> bool {
        is_per_entity(&self.file_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: GeneratorConfig = serde_yaml::from_str("use_class: true\n").unwrap();
        assert!(config.use_class);
        assert_eq!(config.class_pattern, "{}");
        assert_eq!(config.file_pattern, "{}Slate");
        assert!(config.file_per_entity());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
class_pattern: "Slate{}"
backing_pattern: "CD{}"
file_pattern: SlateModels
output_dir: Generated
entity_output_dir: Generated/Entities
import_module: Shared
use_int: true
deny_missing_defaults: true
"#;
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.file_per_entity());
        assert_eq!(config.entity_output_dir, Some(PathBuf::from("Generated/Entities")));
        assert_eq!(config.import_module.as_deref(), Some("Shared"));
        assert!(config.use_int);
        assert!(config.deny_missing_defaults);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_class_pattern_needs_placeholder() {
        let config = GeneratorConfig {
            class_pattern: "Slate".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_yaml::from_str::<GeneratorConfig>("colour: red\n").is_err());
    }
}
