//! How a stored value is read into a binding member.
//!
//! [`assignment_strategy`] is the whole decision; [`ValueRead::render`] only
//! turns the chosen strategy into a Swift expression.

use crate::schema::{AttributeType, TypePolicy};

/// Shape of the expression assigning one binding member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStrategy {
    /// Stored value is assigned unchanged
    Direct,
    /// Optional member; an absent stored value stays absent
    SafeUnwrap,
    /// Non-optional member over optional storage, unwrapped with `!`.
    /// A nil stored value aborts at runtime.
    ForceUnwrap,
    /// Non-optional member over boxed storage, read through the type's value
    /// accessor and falling back to the type's zero value
    Convert,
}

/// Pick the assignment strategy for a member.
///
/// | use_scalar | declared_optional | forces_optional | needs conversion | strategy |
/// |---|---|---|---|---|
/// | yes | any | any | no | `Direct` |
/// | no | yes | any | any | `SafeUnwrap` |
/// | no | no | yes | any | `ForceUnwrap` |
/// | no | no | no | yes | `Convert` |
///
/// Scalar storage never needs conversion, so the first row covers every
/// scalar member.
pub fn assignment_strategy(
    declared_optional: bool,
    use_scalar: bool,
    policy: TypePolicy,
) -> AssignmentStrategy {
    let needs_conversion = !use_scalar && policy.needs_conversion;

    if use_scalar && !needs_conversion {
        AssignmentStrategy::Direct
    } else if declared_optional {
        AssignmentStrategy::SafeUnwrap
    } else if policy.forces_optional {
        AssignmentStrategy::ForceUnwrap
    } else if needs_conversion {
        AssignmentStrategy::Convert
    } else {
        AssignmentStrategy::Direct
    }
}

/// A stored value about to be read into a binding member
#[derive(Debug, Clone, Copy)]
pub struct ValueRead<'a> {
    /// Storage expression, e.g. `managedObject.age`
    pub source: &'a str,
    pub attr_type: AttributeType,
    /// Effective scalar storage
    pub scalar: bool,
    /// Bind integer types as `Int`
    pub use_int: bool,
    /// Fallback expression for a forced unwrap
    pub default: Option<&'a str>,
}

impl ValueRead<'_> {
    /// Accessor chain turning the stored value into the binding type
    pub fn conversion(&self) -> &'static str {
        let bridge_int = self.use_int && self.attr_type.policy().integer_like;
        match (self.scalar, bridge_int) {
            (true, true) => ".slate_asInt",
            (true, false) => "",
            // NSNumber.intValue is Int32; integerValue is Int
            (false, true) => ".integerValue",
            (false, false) => self.attr_type.value_conversion().unwrap_or(""),
        }
    }

    fn chained(&self) -> String {
        let conv = self.conversion();
        if conv.is_empty() {
            self.source.to_string()
        } else {
            format!("{}?{}", self.source, conv)
        }
    }

    /// Swift expression reading this value with `strategy`
    pub fn render(&self, strategy: AssignmentStrategy) -> String {
        let conv = self.conversion();
        match strategy {
            AssignmentStrategy::Direct => format!("{}{}", self.source, conv),
            AssignmentStrategy::SafeUnwrap => self.chained(),
            AssignmentStrategy::ForceUnwrap => match self.default {
                Some(default) => format!("({} ?? {})", self.chained(), default),
                None => format!("{}!{}", self.source, conv),
            },
            AssignmentStrategy::Convert => {
                match self.default.or_else(|| self.attr_type.zero_value()) {
                    Some(zero) => format!("({} ?? {})", self.chained(), zero),
                    None => format!("{}!{}", self.source, conv),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssignmentStrategy::*;

    fn policy(forces_optional: bool, needs_conversion: bool) -> TypePolicy {
        TypePolicy {
            forces_optional,
            needs_conversion,
            integer_like: false,
        }
    }

    #[test]
    fn test_full_combination_table() {
        // (use_scalar, declared_optional, forces_optional, needs_conversion) -> strategy
        let table = [
            ((true, false, false, false), Direct),
            ((true, false, false, true), Direct),
            ((true, false, true, false), Direct),
            ((true, false, true, true), Direct),
            ((true, true, false, false), Direct),
            ((true, true, false, true), Direct),
            ((true, true, true, false), Direct),
            ((true, true, true, true), Direct),
            ((false, true, false, false), SafeUnwrap),
            ((false, true, false, true), SafeUnwrap),
            ((false, true, true, false), SafeUnwrap),
            ((false, true, true, true), SafeUnwrap),
            ((false, false, true, false), ForceUnwrap),
            ((false, false, true, true), ForceUnwrap),
            ((false, false, false, true), Convert),
            ((false, false, false, false), Direct),
        ];

        for ((scalar, optional, forces, converts), expected) in table {
            assert_eq!(
                assignment_strategy(optional, scalar, policy(forces, converts)),
                expected,
                "scalar={} optional={} forces={} converts={}",
                scalar,
                optional,
                forces,
                converts
            );
        }
    }

    #[test]
    fn test_real_types() {
        let int = AttributeType::Integer64.policy();
        assert_eq!(assignment_strategy(false, true, int), Direct);
        assert_eq!(assignment_strategy(false, false, int), Convert);
        assert_eq!(assignment_strategy(true, false, int), SafeUnwrap);

        let string = AttributeType::String.policy();
        assert_eq!(assignment_strategy(false, false, string), ForceUnwrap);
        assert_eq!(assignment_strategy(true, false, string), SafeUnwrap);
    }

    fn read(attr_type: AttributeType, scalar: bool) -> ValueRead<'static> {
        ValueRead {
            source: "managedObject.age",
            attr_type,
            scalar,
            use_int: false,
            default: None,
        }
    }

    #[test]
    fn test_render_expressions() {
        let int = read(AttributeType::Integer64, false);
        assert_eq!(read(AttributeType::Integer64, true).render(Direct), "managedObject.age");
        assert_eq!(int.render(Convert), "(managedObject.age?.int64Value ?? 0)");
        assert_eq!(int.render(SafeUnwrap), "managedObject.age?.int64Value");
        assert_eq!(int.render(ForceUnwrap), "managedObject.age!.int64Value");

        let string = read(AttributeType::String, false);
        assert_eq!(string.render(SafeUnwrap), "managedObject.age");
        assert_eq!(string.render(ForceUnwrap), "managedObject.age!");
    }

    #[test]
    fn test_render_default_replaces_force() {
        let mut string = read(AttributeType::String, false);
        string.default = Some("\"none\"");
        assert_eq!(string.render(ForceUnwrap), "(managedObject.age ?? \"none\")");

        let mut int = read(AttributeType::Integer32, false);
        int.default = Some("7");
        assert_eq!(int.render(ForceUnwrap), "(managedObject.age?.int32Value ?? 7)");
        assert_eq!(int.render(Convert), "(managedObject.age?.int32Value ?? 7)");
    }

    #[test]
    fn test_int_bridging() {
        let mut scalar = read(AttributeType::Integer16, true);
        scalar.use_int = true;
        assert_eq!(scalar.render(Direct), "managedObject.age.slate_asInt");

        let mut boxed = read(AttributeType::Integer16, false);
        boxed.use_int = true;
        assert_eq!(boxed.render(Convert), "(managedObject.age?.integerValue ?? 0)");
        assert_eq!(boxed.render(SafeUnwrap), "managedObject.age?.integerValue");
        assert_eq!(boxed.render(ForceUnwrap), "managedObject.age!.integerValue");

        let mut double = read(AttributeType::Double, true);
        double.use_int = true;
        assert_eq!(double.render(Direct), "managedObject.age");
    }

    #[test]
    fn test_uri_without_zero_falls_back_to_force() {
        let uri = read(AttributeType::Uri, false);
        assert_eq!(uri.render(Convert), "managedObject.age!");
    }
}
