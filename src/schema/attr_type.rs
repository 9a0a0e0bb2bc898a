//! The closed set of attribute types a schema may declare.
//!
//! Each type carries the generation-policy flags the emitter needs to decide
//! how a stored value is read back into a binding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute type as declared in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    #[serde(alias = "Integer 16", alias = "int16")]
    Integer16,
    #[serde(alias = "Integer 32", alias = "int32")]
    Integer32,
    #[serde(alias = "Integer 64", alias = "int64")]
    Integer64,
    #[serde(alias = "Decimal")]
    Decimal,
    #[serde(alias = "Double")]
    Double,
    #[serde(alias = "Float")]
    Float,
    #[serde(alias = "String")]
    String,
    #[serde(alias = "Boolean", alias = "bool")]
    Boolean,
    #[serde(alias = "Date")]
    Date,
    #[serde(alias = "Binary", alias = "binary_data")]
    Binary,
    #[serde(alias = "URI", alias = "url")]
    Uri,
    #[serde(alias = "UUID")]
    Uuid,
    #[serde(alias = "Transformable")]
    Transformable,
}

/// Generation-policy flags of an attribute type.
///
/// `needs_conversion` describes boxed storage only: a scalar-stored value is
/// always read as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypePolicy {
    /// The store exposes the value as optional even when the schema says it isn't.
    pub forces_optional: bool,
    /// Boxed storage must go through a value accessor to reach the binding type.
    pub needs_conversion: bool,
    /// Eligible for `Int` bridging.
    pub integer_like: bool,
}

impl TypePolicy {
    /// Same policy with storage optionality widened by `optional`.
    pub fn forcing_optional(self, optional: bool) -> Self {
        Self {
            forces_optional: self.forces_optional || optional,
            ..self
        }
    }
}

impl AttributeType {
    pub const ALL: [AttributeType; 13] = [
        AttributeType::Integer16,
        AttributeType::Integer32,
        AttributeType::Integer64,
        AttributeType::Decimal,
        AttributeType::Double,
        AttributeType::Float,
        AttributeType::String,
        AttributeType::Boolean,
        AttributeType::Date,
        AttributeType::Binary,
        AttributeType::Uri,
        AttributeType::Uuid,
        AttributeType::Transformable,
    ];

    pub fn policy(self) -> TypePolicy {
        TypePolicy {
            forces_optional: self.forces_optional(),
            needs_conversion: self.value_conversion().is_some(),
            integer_like: self.is_integer(),
        }
    }

    /// Type of the member in the generated binding
    pub fn binding_type(self, use_int: bool) -> &'static str {
        match self {
            AttributeType::Integer16 | AttributeType::Integer32 | AttributeType::Integer64
                if use_int =>
            {
                "Int"
            }
            AttributeType::Integer16 => "Int16",
            AttributeType::Integer32 => "Int32",
            AttributeType::Integer64 => "Int64",
            AttributeType::Decimal => "Decimal",
            AttributeType::Double => "Double",
            AttributeType::Float => "Float",
            AttributeType::String => "String",
            AttributeType::Boolean => "Bool",
            AttributeType::Date => "Date",
            AttributeType::Binary => "Data",
            AttributeType::Uri => "URL",
            AttributeType::Uuid => "UUID",
            AttributeType::Transformable => "NSObject",
        }
    }

    /// Type of the property on the managed object
    pub fn storage_type(self, scalar: bool) -> &'static str {
        match self {
            AttributeType::Integer16 if scalar => "Int16",
            AttributeType::Integer32 if scalar => "Int32",
            AttributeType::Integer64 if scalar => "Int64",
            AttributeType::Double if scalar => "Double",
            AttributeType::Float if scalar => "Float",
            AttributeType::Boolean if scalar => "Bool",
            AttributeType::Integer16
            | AttributeType::Integer32
            | AttributeType::Integer64
            | AttributeType::Double
            | AttributeType::Float
            | AttributeType::Boolean => "NSNumber",
            AttributeType::Decimal => "NSDecimalNumber",
            AttributeType::String => "String",
            AttributeType::Date => "Date",
            AttributeType::Binary => "Data",
            AttributeType::Uri => "URL",
            AttributeType::Uuid => "UUID",
            AttributeType::Transformable => "NSObject",
        }
    }

    /// Whether the store can hold this type as a primitive
    pub fn supports_scalar(self) -> bool {
        matches!(
            self,
            AttributeType::Integer16
                | AttributeType::Integer32
                | AttributeType::Integer64
                | AttributeType::Double
                | AttributeType::Float
                | AttributeType::Boolean
        )
    }

    pub fn forces_optional(self) -> bool {
        !self.supports_scalar()
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            AttributeType::Integer16 | AttributeType::Integer32 | AttributeType::Integer64
        )
    }

    /// Accessor that unwraps boxed storage into the binding type
    pub fn value_conversion(self) -> Option<&'static str> {
        match self {
            AttributeType::Integer16 => Some(".int16Value"),
            AttributeType::Integer32 => Some(".int32Value"),
            AttributeType::Integer64 => Some(".int64Value"),
            AttributeType::Double => Some(".doubleValue"),
            AttributeType::Float => Some(".floatValue"),
            AttributeType::Boolean => Some(".boolValue"),
            AttributeType::Decimal => Some(".decimalValue"),
            _ => None,
        }
    }

    /// Empty value substituted when optional storage is read into a
    /// non-optional binding. `None` when the type has no sensible empty value.
    pub fn zero_value(self) -> Option<&'static str> {
        match self {
            AttributeType::Integer16
            | AttributeType::Integer32
            | AttributeType::Integer64
            | AttributeType::Double
            | AttributeType::Float
            | AttributeType::Decimal => Some("0"),
            AttributeType::Boolean => Some("false"),
            AttributeType::String => Some("\"\""),
            AttributeType::Date => Some("Date(timeIntervalSinceReferenceDate: 0)"),
            AttributeType::Binary => Some("Data()"),
            AttributeType::Uuid => Some("UUID()"),
            AttributeType::Uri | AttributeType::Transformable => None,
        }
    }

    /// Transformable values have no equality and are barred from substructs
    pub fn is_comparable(self) -> bool {
        self != AttributeType::Transformable
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::Integer16 => "Integer 16",
            AttributeType::Integer32 => "Integer 32",
            AttributeType::Integer64 => "Integer 64",
            AttributeType::Decimal => "Decimal",
            AttributeType::Double => "Double",
            AttributeType::Float => "Float",
            AttributeType::String => "String",
            AttributeType::Boolean => "Boolean",
            AttributeType::Date => "Date",
            AttributeType::Binary => "Binary",
            AttributeType::Uri => "URI",
            AttributeType::Uuid => "UUID",
            AttributeType::Transformable => "Transformable",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_types_never_force_optional() {
        for ty in AttributeType::ALL {
            assert_ne!(ty.supports_scalar(), ty.policy().forces_optional, "{}", ty);
        }
    }

    #[test]
    fn test_storage_type_boxes_numbers() {
        assert_eq!(AttributeType::Integer64.storage_type(false), "NSNumber");
        assert_eq!(AttributeType::Integer64.storage_type(true), "Int64");
        // scalar flag is meaningless for reference types
        assert_eq!(AttributeType::String.storage_type(true), "String");
    }

    #[test]
    fn test_int_bridging_only_touches_integers() {
        assert_eq!(AttributeType::Integer16.binding_type(true), "Int");
        assert_eq!(AttributeType::Integer16.binding_type(false), "Int16");
        assert_eq!(AttributeType::Double.binding_type(true), "Double");
    }

    #[test]
    fn test_deserialize_display_spellings() {
        let ty: AttributeType = serde_yaml::from_str("\"Integer 32\"").unwrap();
        assert_eq!(ty, AttributeType::Integer32);
        let ty: AttributeType = serde_yaml::from_str("uuid").unwrap();
        assert_eq!(ty, AttributeType::Uuid);
        let ty: AttributeType = serde_yaml::from_str("URI").unwrap();
        assert_eq!(ty, AttributeType::Uri);
    }
}
