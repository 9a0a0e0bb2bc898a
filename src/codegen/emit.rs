//! Per-entity Swift code emission.
//!
//! For each entity the emitter produces, in this order:
//! 1. `SlateObjectConvertible` glue on the managed object class
//! 2. managed object accessors (entity name, fetch request, factory)
//! 3. the binding type, with nested substruct types
//! 4. relationship accessors on `SlateRelationshipResolver`
//! 5. `Equatable`, unless the entity holds a transformable attribute
//!
//! Other entities are named only through the [`SymbolTable`].

use crate::codegen::strategy::{assignment_strategy, AssignmentStrategy, ValueRead};
use crate::codegen::symbols::SymbolTable;
use crate::codegen::template::{Bindings, Template};
use crate::codegen::templates;
use crate::codegen::utils::escape_swift_string;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::schema::{Entity, Relationship, Substruct};
use std::fmt;

/// Emission switches taken from the run configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub use_class: bool,
    pub use_int: bool,
    pub deny_missing_defaults: bool,
    pub strict_templates: bool,
    pub import_module: Option<String>,
    /// Command line recorded in file headers
    pub command_line: Option<String>,
}

impl From<&GeneratorConfig> for EmitOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            use_class: config.use_class,
            use_int: config.use_int,
            deny_missing_defaults: config.deny_missing_defaults,
            strict_templates: config.strict_templates,
            import_module: config.import_module.clone().filter(|m| !m.is_empty()),
            command_line: config
                .command_line
                .clone()
                .filter(|_| config.embed_command),
        }
    }
}

/// A forced non-optional substruct member with no default value.
///
/// The generated code aborts at runtime if the stored value is ever nil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub entity: String,
    /// Flattened storage property name
    pub property: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "substruct property {}.{} is forced non-optional but does not have a default userdata key",
            self.entity, self.property
        )
    }
}

/// Generated code for one entity
#[derive(Debug, Clone, Default)]
pub struct EmittedEntity {
    pub code: String,
    pub advisories: Vec<Advisory>,
}

/// Emits entity code against a resolved symbol table
pub struct Emitter<'a> {
    symbols: &'a SymbolTable,
    options: EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(symbols: &'a SymbolTable, options: EmitOptions) -> Self {
        Self { symbols, options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    pub(crate) fn render(
        &self,
        template: &Template,
        bindings: &Bindings,
    ) -> Result<String, GenerateError> {
        if self.options.strict_templates {
            template
                .render_strict(bindings)
                .map_err(GenerateError::UnresolvedPlaceholders)
        } else {
            Ok(template.render(bindings))
        }
    }

    fn binding_name(&self, entity: &Entity) -> Result<&'a str, GenerateError> {
        self.symbols.binding_name(&entity.name).ok_or_else(|| {
            GenerateError::Schema(format!("Entity '{}' was not resolved", entity.name))
        })
    }

    pub(crate) fn backing_name(&self, entity: &Entity) -> Result<&'a str, GenerateError> {
        self.symbols.backing_name(&entity.name).ok_or_else(|| {
            GenerateError::Schema(format!("Entity '{}' was not resolved", entity.name))
        })
    }

    fn destination_name(
        &self,
        entity: &Entity,
        relationship: &Relationship,
    ) -> Result<&'a str, GenerateError> {
        self.symbols
            .binding_name(&relationship.destination)
            .ok_or_else(|| GenerateError::UnresolvedRelationship {
                entity: entity.name.clone(),
                relationship: relationship.name.clone(),
                destination: relationship.destination.clone(),
            })
    }

    /// Header opening every generated binding file
    pub fn file_header(&self, filename: &str) -> Result<String, GenerateError> {
        let bindings = Bindings::new()
            .set("FILENAME", filename)
            .set("COMMAND", self.command_comment()?)
            .set(
                "EXTRAIMPORT",
                self.options
                    .import_module
                    .as_ref()
                    .map(|module| format!("\nimport {}", module))
                    .unwrap_or_default(),
            );
        self.render(&templates::FILE_HEADER, &bindings)
    }

    pub(crate) fn command_comment(&self) -> Result<String, GenerateError> {
        match &self.options.command_line {
            Some(command) => self.render(
                &templates::COMMAND_LINE,
                &Bindings::new().set("COMMANDLINE", command.as_str()),
            ),
            None => Ok(String::new()),
        }
    }

    /// All generated code for `entity`, in fixed section order
    pub fn emit_entity(&self, entity: &Entity) -> Result<EmittedEntity, GenerateError> {
        tracing::debug!("Emitting {}", entity.name);

        let mut advisories = Vec::new();
        let mut code = self.object_convertible(entity)?;
        code += &self.managed_object_extension(entity)?;
        code += &self.binding_impl(entity, &mut advisories)?;
        code += &self.relationships(entity)?;
        if let Some(equatable) = self.equatable(entity)? {
            code += &equatable;
        }

        Ok(EmittedEntity { code, advisories })
    }

    /// Managed object to binding conversion
    pub fn object_convertible(&self, entity: &Entity) -> Result<String, GenerateError> {
        let bindings = Bindings::new()
            .set("COREDATACLASS", self.backing_name(entity)?)
            .set("SLATECLASS", self.binding_name(entity)?);
        self.render(&templates::OBJECT_CONVERTIBLE, &bindings)
    }

    pub fn managed_object_extension(&self, entity: &Entity) -> Result<String, GenerateError> {
        let bindings = Bindings::new()
            .set("COREDATACLASS", self.backing_name(entity)?)
            .set("COREDATAENTITYNAME", escape_swift_string(&entity.name));
        self.render(&templates::MANAGED_OBJECT_EXTENSION, &bindings)
    }

    /// The binding type: one member per attribute, then one per substruct
    pub fn binding_impl(
        &self,
        entity: &Entity,
        advisories: &mut Vec<Advisory>,
    ) -> Result<String, GenerateError> {
        let class_name = self.binding_name(entity)?;
        let mut declarations = String::new();
        let mut assignments = String::new();

        for attr in &entity.attributes {
            declarations += &self.render(
                &templates::ATTR_DECLARATION,
                &Bindings::new()
                    .set("ATTR", attr.name.as_str())
                    .set("TYPE", attr.attr_type.binding_type(self.options.use_int))
                    .set("OPTIONAL", optional_mark(attr.optional)),
            )?;

            let strategy = assignment_strategy(attr.optional, attr.uses_scalar(), attr.policy());
            let source = format!("managedObject.{}", attr.name);
            let read = ValueRead {
                source: &source,
                attr_type: attr.attr_type,
                scalar: attr.uses_scalar(),
                use_int: self.options.use_int,
                default: None,
            };
            assignments += &self.render(
                &templates::ATTR_ASSIGNMENT,
                &Bindings::new()
                    .set("ATTR", attr.name.as_str())
                    .set("VALUE", read.render(strategy)),
            )?;
        }

        let mut substructs = String::new();
        for substruct in &entity.substructs {
            substructs += &self.substruct_impl(entity, substruct, advisories)?;

            let substruct_type = format!("{}.{}", class_name, substruct.type_name());
            declarations += &self.render(
                &templates::ATTR_DECLARATION,
                &Bindings::new()
                    .set("ATTR", substruct.var_name.as_str())
                    .set("TYPE", substruct_type.as_str())
                    .set("OPTIONAL", optional_mark(substruct.optional)),
            )?;

            let template = if substruct.optional {
                &templates::OPT_SUBSTRUCT_ASSIGNMENT
            } else {
                &templates::SUBSTRUCT_ASSIGNMENT
            };
            assignments += &self.render(
                template,
                &Bindings::new()
                    .set("ATTR", substruct.var_name.as_str())
                    .set("TYPE", substruct_type)
                    .set("PRESENCE", substruct.presence_flag()),
            )?;
        }

        let bindings = Bindings::new()
            .set("OBJTYPE", if self.options.use_class { "final class" } else { "struct" })
            .set("SLATECLASS", class_name)
            .set("COREDATACLASS", self.backing_name(entity)?)
            .set("ATTRDECLARATIONS", declarations)
            .set("ATTRASSIGNMENT", assignments)
            .set("SUBSTRUCTS", substructs);
        self.render(&templates::BINDING_IMPL, &bindings)
    }

    /// Nested type re-assembling a substruct from its flattened properties
    fn substruct_impl(
        &self,
        entity: &Entity,
        substruct: &Substruct,
        advisories: &mut Vec<Advisory>,
    ) -> Result<String, GenerateError> {
        let mut declarations = String::new();
        let mut assignments = String::new();

        for attr in &substruct.attributes {
            let optional = attr.optional_in_struct();
            declarations += &self.render(
                &templates::SUBSTRUCT_ATTR_DECLARATION,
                &Bindings::new()
                    .set("ATTR", attr.name.as_str())
                    .set("TYPE", attr.attr_type.binding_type(self.options.use_int))
                    .set("OPTIONAL", optional_mark(optional)),
            )?;

            // storage is optional whenever the attribute itself is
            let policy = attr.policy().forcing_optional(attr.optional);
            let strategy = assignment_strategy(optional, attr.uses_scalar(), policy);
            let property = substruct.storage_name(attr);

            if strategy == AssignmentStrategy::ForceUnwrap && attr.default_value().is_none() {
                let advisory = Advisory {
                    entity: self.backing_name(entity)?.to_string(),
                    property: property.clone(),
                };
                if self.options.deny_missing_defaults {
                    return Err(GenerateError::MissingDefault {
                        entity: advisory.entity,
                        property: advisory.property,
                    });
                }
                tracing::warn!("{}", advisory);
                advisories.push(advisory);
            }

            let source = format!("managedObject.{}", property);
            let read = ValueRead {
                source: &source,
                attr_type: attr.attr_type,
                scalar: attr.uses_scalar(),
                use_int: self.options.use_int,
                default: attr.default_value(),
            };
            assignments += &self.render(
                &templates::SUBSTRUCT_ATTR_ASSIGNMENT,
                &Bindings::new()
                    .set("ATTR", attr.name.as_str())
                    .set("VALUE", read.render(strategy)),
            )?;
        }

        let bindings = Bindings::new()
            .set("SLATESUBSTRUCT", substruct.type_name())
            .set("COREDATACLASS", self.backing_name(entity)?)
            .set("ATTRDECLARATIONS", declarations)
            .set("ATTRASSIGNMENT", assignments);
        self.render(&templates::SUBSTRUCT_IMPL, &bindings)
    }

    /// Relationship accessors, one per relationship in declaration order
    pub fn relationships(&self, entity: &Entity) -> Result<String, GenerateError> {
        let backing = self.backing_name(entity)?;
        let mut accessors = String::new();

        for relationship in &entity.relationships {
            let target = self.destination_name(entity, relationship)?;
            let accessor = if relationship.to_many {
                let adapter = if relationship.ordered {
                    "self.resolveOrdered"
                } else {
                    "self.resolveUnordered"
                };
                self.render(
                    &templates::RELATIONSHIP_TO_MANY,
                    &Bindings::new()
                        .set("RELATIONSHIPNAME", relationship.name.as_str())
                        .set("TARGETSLATECLASS", target)
                        .set("COREDATACLASS", backing)
                        .set("ADAPTER", adapter),
                )?
            } else {
                self.render(
                    &templates::RELATIONSHIP_TO_ONE,
                    &Bindings::new()
                        .set("RELATIONSHIPNAME", relationship.name.as_str())
                        .set("TARGETSLATECLASS", target)
                        .set("COREDATACLASS", backing)
                        .set("OPTIONAL", optional_mark(relationship.optional))
                        .set("NONOPTIONAL", if relationship.optional { "" } else { "!" }),
                )?
            };
            accessors += &accessor;
        }

        let bindings = Bindings::new()
            .set("OBJQUAL", if self.options.use_class { ": " } else { " == " })
            .set("SLATECLASS", self.binding_name(entity)?)
            .set("RELATIONSHIPS", accessors);
        self.render(&templates::RELATIONSHIP_RESOLVER, &bindings)
    }

    /// Equality over identity and every attribute; `None` when an attribute
    /// is transformable
    pub fn equatable(&self, entity: &Entity) -> Result<Option<String>, GenerateError> {
        if !entity.is_comparable() {
            return Ok(None);
        }

        let mut terms = String::new();
        for attr in &entity.attributes {
            terms += &self.render(
                &templates::EQUATABLE_TERM,
                &Bindings::new().set("ATTR", attr.name.as_str()),
            )?;
        }

        let bindings = Bindings::new()
            .set("SLATECLASS", self.binding_name(entity)?)
            .set("ATTRS", terms);
        self.render(&templates::EQUATABLE, &bindings).map(Some)
    }
}

fn optional_mark(optional: bool) -> &'static str {
    if optional {
        "?"
    } else {
        ""
    }
}
