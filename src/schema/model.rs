//! In-memory schema records.
//!
//! These are produced once per run by the loader and read by every later
//! phase without modification.

use crate::schema::attr_type::{AttributeType, TypePolicy};
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata key carrying a default-value expression
pub const DEFAULT_KEY: &str = "default";

/// Metadata key overriding an attribute's optionality inside a substruct
pub const OPT_IN_STRUCT_KEY: &str = "optInStruct";

/// A full schema as read from a single YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// Entity definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entity {
    pub name: String,
    /// Managed object class; the entity name when absent
    #[serde(default, rename = "class")]
    pub backing_class: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub substructs: Vec<Substruct>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn backing_class(&self) -> &str {
        self.backing_class.as_deref().unwrap_or(&self.name)
    }

    /// Entities holding a transformable value get no equality operator
    pub fn is_comparable(&self) -> bool {
        self.attributes.iter().all(|a| a.attr_type.is_comparable())
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.backing_class = Some(class.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_substruct(mut self, substruct: Substruct) -> Self {
        self.substructs.push(substruct);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// Attribute definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, alias = "use_scalar")]
    pub scalar: bool,
    /// Free-form metadata (`default`, `optInStruct`, ...)
    #[serde(default)]
    pub userdata: IndexMap<String, String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            optional: false,
            scalar: false,
            userdata: IndexMap::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn scalar(mut self, scalar: bool) -> Self {
        self.scalar = scalar;
        self
    }

    pub fn with_userdata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.userdata.insert(key.into(), value.into());
        self
    }

    /// Scalar storage only applies to types the store can hold as primitives
    pub fn uses_scalar(&self) -> bool {
        self.scalar && self.attr_type.supports_scalar()
    }

    pub fn policy(&self) -> TypePolicy {
        self.attr_type.policy()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.userdata
            .get(DEFAULT_KEY)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Explicit optionality inside a substruct, if the schema sets one
    pub fn optionality_override(&self) -> Option<bool> {
        self.userdata.get(OPT_IN_STRUCT_KEY).map(|v| v == "true")
    }

    /// Optionality of this attribute as a member of a substruct
    pub fn optional_in_struct(&self) -> bool {
        self.optionality_override().unwrap_or(self.optional)
    }

    /// Whether the managed object declares this property optional.
    /// Every boxed property is; scalar properties never are.
    pub fn storage_optional(&self) -> bool {
        !self.uses_scalar()
    }
}

/// A nested group of attributes, flattened in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Substruct {
    /// Variable name on the binding and prefix of the flattened properties
    #[serde(rename = "name")]
    pub var_name: String,
    #[serde(default, rename = "struct")]
    pub struct_name: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Substruct {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            struct_name: None,
            optional: false,
            attributes: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_struct_name(mut self, name: impl Into<String>) -> Self {
        self.struct_name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Generated struct type name, PascalCase of the variable name by default
    pub fn type_name(&self) -> String {
        self.struct_name
            .clone()
            .unwrap_or_else(|| self.var_name.to_case(Case::Pascal))
    }

    /// Flattened storage property name for `attribute`
    pub fn storage_name(&self, attribute: &Attribute) -> String {
        format!("{}_{}", self.var_name, attribute.name)
    }

    /// Storage flag recording whether an optional substruct is present
    pub fn presence_flag(&self) -> String {
        format!("{}_has", self.var_name)
    }
}

/// Relationship definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Relationship {
    pub name: String,
    pub destination: String,
    #[serde(default)]
    pub to_many: bool,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub optional: bool,
}

impl Relationship {
    pub fn to_one(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            to_many: false,
            ordered: false,
            optional: false,
        }
    }

    pub fn to_many(name: impl Into<String>, destination: impl Into<String>, ordered: bool) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            to_many: true,
            ordered,
            optional: true,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// To-many relationships are always optional on the binding
    pub fn binding_optional(&self) -> bool {
        self.optional || self.to_many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_class_defaults_to_name() {
        assert_eq!(Entity::new("User").backing_class(), "User");
        assert_eq!(Entity::new("User").with_class("UserMO").backing_class(), "UserMO");
    }

    #[test]
    fn test_override_wins_over_attribute_flag() {
        let attr = Attribute::new("city", AttributeType::String).optional(true);
        assert!(attr.optional_in_struct());

        let attr = attr.with_userdata(OPT_IN_STRUCT_KEY, "false");
        assert!(!attr.optional_in_struct());

        let attr = Attribute::new("zip", AttributeType::String)
            .with_userdata(OPT_IN_STRUCT_KEY, "true");
        assert!(attr.optional_in_struct());
    }

    #[test]
    fn test_scalar_ignored_for_reference_types() {
        let attr = Attribute::new("name", AttributeType::String).scalar(true);
        assert!(!attr.uses_scalar());
        assert!(attr.storage_optional());

        let attr = Attribute::new("age", AttributeType::Integer64).scalar(true);
        assert!(attr.uses_scalar());
        assert!(!attr.storage_optional());
        assert!(attr.scalar(false).storage_optional());
    }

    #[test]
    fn test_empty_default_is_no_default() {
        let attr = Attribute::new("city", AttributeType::String).with_userdata(DEFAULT_KEY, "");
        assert_eq!(attr.default_value(), None);
    }

    #[test]
    fn test_substruct_names() {
        let sub = Substruct::new("home_address");
        assert_eq!(sub.type_name(), "HomeAddress");
        assert_eq!(sub.presence_flag(), "home_address_has");
        let attr = Attribute::new("city", AttributeType::String);
        assert_eq!(sub.storage_name(&attr), "home_address_city");
        assert_eq!(Substruct::new("loc").with_struct_name("Location").type_name(), "Location");
    }

    #[test]
    fn test_transformable_entity_not_comparable() {
        let entity = Entity::new("Blob")
            .with_attribute(Attribute::new("id", AttributeType::Integer64))
            .with_attribute(Attribute::new("payload", AttributeType::Transformable));
        assert!(!entity.is_comparable());
    }
}
