//! Symbol resolution across entities.
//!
//! Builds the entity-name lookups every emitter call uses to name other
//! entities. The table is built from the complete entity list before anything
//! is emitted, since relationships may point at entities that appear later in
//! the input.

use crate::codegen::utils::apply_pattern;
use crate::error::GenerateError;
use crate::schema::Entity;
use indexmap::IndexMap;

/// Immutable entity-name lookups for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    bindings: IndexMap<String, String>,
    backing: IndexMap<String, String>,
}

impl SymbolTable {
    /// Resolve every entity, then check every relationship destination.
    ///
    /// `binding_pattern` is applied to the entity name, `backing_pattern` to
    /// the entity's backing class. Fails on duplicate entity names and on any
    /// relationship whose destination is not among `entities`.
    pub fn resolve(
        entities: &[Entity],
        binding_pattern: &str,
        backing_pattern: &str,
    ) -> Result<Self, GenerateError> {
        let mut table = SymbolTable::default();

        for entity in entities {
            let previous = table
                .bindings
                .insert(entity.name.clone(), apply_pattern(binding_pattern, &entity.name));
            if previous.is_some() {
                return Err(GenerateError::DuplicateEntity(entity.name.clone()));
            }
            table.backing.insert(
                entity.name.clone(),
                apply_pattern(backing_pattern, entity.backing_class()),
            );
        }

        for entity in entities {
            for relationship in &entity.relationships {
                if !table.bindings.contains_key(&relationship.destination) {
                    return Err(GenerateError::UnresolvedRelationship {
                        entity: entity.name.clone(),
                        relationship: relationship.name.clone(),
                        destination: relationship.destination.clone(),
                    });
                }
            }
        }

        tracing::debug!("Resolved {} entities", table.len());
        Ok(table)
    }

    /// Generated binding type name for `entity`
    pub fn binding_name(&self, entity: &str) -> Option<&str> {
        self.bindings.get(entity).map(String::as_str)
    }

    /// Managed object class name for `entity`
    pub fn backing_name(&self, entity: &str) -> Option<&str> {
        self.backing.get(entity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Relationship;

    fn blog() -> Vec<Entity> {
        vec![
            Entity::new("Post")
                .with_class("PostMO")
                .with_relationship(Relationship::to_one("author", "User")),
            Entity::new("User").with_relationship(Relationship::to_many("posts", "Post", true)),
        ]
    }

    #[test]
    fn test_forward_reference_resolves() {
        let table = SymbolTable::resolve(&blog(), "Slate{}", "{}").unwrap();
        assert_eq!(table.binding_name("User"), Some("SlateUser"));
        assert_eq!(table.binding_name("Post"), Some("SlatePost"));
        assert_eq!(table.backing_name("Post"), Some("PostMO"));
        assert_eq!(table.backing_name("User"), Some("User"));
    }

    #[test]
    fn test_backing_pattern_applies_to_class() {
        let table = SymbolTable::resolve(&blog(), "{}", "CD{}").unwrap();
        assert_eq!(table.backing_name("Post"), Some("CDPostMO"));
    }

    #[test]
    fn test_missing_destination_is_fatal() {
        let entities =
            vec![Entity::new("Post").with_relationship(Relationship::to_one("author", "User"))];
        let err = SymbolTable::resolve(&entities, "{}", "{}").unwrap_err();
        match err {
            GenerateError::UnresolvedRelationship { entity, relationship, destination } => {
                assert_eq!(entity, "Post");
                assert_eq!(relationship, "author");
                assert_eq!(destination, "User");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_entity_is_fatal() {
        let entities = vec![Entity::new("User"), Entity::new("User")];
        assert!(matches!(
            SymbolTable::resolve(&entities, "{}", "{}"),
            Err(GenerateError::DuplicateEntity(_))
        ));
    }

    #[test]
    fn test_order_independent() {
        let mut reversed = blog();
        reversed.reverse();
        let a = SymbolTable::resolve(&blog(), "S{}", "{}").unwrap();
        let b = SymbolTable::resolve(&reversed, "S{}", "{}").unwrap();
        for name in ["User", "Post"] {
            assert_eq!(a.binding_name(name), b.binding_name(name));
            assert_eq!(a.backing_name(name), b.backing_name(name));
        }
    }

    #[test]
    fn test_separate_runs_do_not_share_entries() {
        let first = SymbolTable::resolve(&blog(), "{}", "{}").unwrap();
        let second = SymbolTable::resolve(&[Entity::new("Tag")], "{}", "{}").unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second.binding_name("User"), None);
    }
}
