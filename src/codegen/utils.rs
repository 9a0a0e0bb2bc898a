//! Utility functions for code generation.

/// Placeholder a naming pattern substitutes with the entity name
pub const ENTITY_PLACEHOLDER: &str = "{}";

/// Apply a naming pattern (e.g. `"Slate{}"`) to a name
pub fn apply_pattern(pattern: &str, name: &str) -> String {
    pattern.replace(ENTITY_PLACEHOLDER, name)
}

/// Whether a naming pattern varies per entity
pub fn is_per_entity(pattern: &str) -> bool {
    pattern.contains(ENTITY_PLACEHOLDER)
}

/// Escape a string for use in a Swift string literal
pub fn escape_swift_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_pattern() {
        assert_eq!(apply_pattern("Slate{}", "User"), "SlateUser");
        assert_eq!(apply_pattern("{}", "User"), "User");
        assert_eq!(apply_pattern("Bindings", "User"), "Bindings");
        assert!(is_per_entity("{}+Slate"));
        assert!(!is_per_entity("Bindings"));
    }

    #[test]
    fn test_escape_swift_string() {
        assert_eq!(escape_swift_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_swift_string("a\\b"), "a\\\\b");
    }
}
