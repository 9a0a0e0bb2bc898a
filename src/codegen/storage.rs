//! Managed object property declarations.
//!
//! Substructs appear here flattened: an optional `<var>_has` flag, then one
//! `<var>_<attr>` property per member.

use crate::codegen::emit::Emitter;
use crate::codegen::template::Bindings;
use crate::codegen::templates;
use crate::codegen::utils::escape_swift_string;
use crate::error::GenerateError;
use crate::schema::Entity;

impl Emitter<'_> {
    /// `@NSManaged` declarations for every stored property of `entity`
    pub fn storage_properties(&self, entity: &Entity) -> Result<String, GenerateError> {
        let mut properties = String::new();

        for attr in &entity.attributes {
            properties += &self.storage_property(
                &attr.name,
                attr.attr_type.storage_type(attr.uses_scalar()),
                attr.storage_optional(),
            )?;
        }

        for substruct in &entity.substructs {
            properties.push('\n');

            if substruct.optional {
                properties += &self.storage_property(&substruct.presence_flag(), "Bool", false)?;
            }

            for attr in &substruct.attributes {
                properties += &self.storage_property(
                    &substruct.storage_name(attr),
                    attr.attr_type.storage_type(attr.uses_scalar()),
                    attr.storage_optional(),
                )?;
            }
        }

        for relationship in &entity.relationships {
            properties.push('\n');

            let storage_type = match (relationship.to_many, relationship.ordered) {
                (true, true) => "NSOrderedSet",
                (true, false) => "NSSet",
                (false, _) => self
                    .symbols()
                    .backing_name(&relationship.destination)
                    .ok_or_else(|| GenerateError::UnresolvedRelationship {
                        entity: entity.name.clone(),
                        relationship: relationship.name.clone(),
                        destination: relationship.destination.clone(),
                    })?,
            };

            properties += &self.storage_property(
                &relationship.name,
                storage_type,
                relationship.binding_optional(),
            )?;
        }

        Ok(properties)
    }

    fn storage_property(
        &self,
        name: &str,
        storage_type: &str,
        optional: bool,
    ) -> Result<String, GenerateError> {
        self.render(
            &templates::STORAGE_PROPERTY,
            &Bindings::new()
                .set("VARNAME", name)
                .set("TYPE", storage_type)
                .set("OPTIONAL", if optional { "?" } else { "" }),
        )
    }

    /// A complete managed object class file for `entity`
    pub fn storage_file(&self, entity: &Entity, filename: &str) -> Result<String, GenerateError> {
        let bindings = Bindings::new()
            .set("FILENAME", filename)
            .set("COMMAND", self.command_comment()?)
            .set("CDENTITYCLASS", self.backing_name(entity)?)
            .set("CDENTITYNAME", escape_swift_string(&entity.name))
            .set("PROPERTIES", self.storage_properties(entity)?);
        self.render(&templates::STORAGE_FILE, &bindings)
    }
}
