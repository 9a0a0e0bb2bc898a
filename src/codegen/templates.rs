//! Swift source templates.
//!
//! Placeholders per template are listed by `Template::placeholders`; the
//! emitter binds all of them.

use crate::codegen::template::Template;

pub const FILE_HEADER: Template = Template::new(
    "//
//  {FILENAME}.swift
//
//  Generated by slategen. Do not edit by hand.{COMMAND}
//

import Foundation
import CoreData
import Slate{EXTRAIMPORT}

",
);

/// Embedded into `{COMMAND}` when the invoking command line is recorded
pub const COMMAND_LINE: Template = Template::new(
    "
//  This file was generated by slategen using:
//  {COMMANDLINE}",
);

pub const OBJECT_CONVERTIBLE: Template = Template::new(
    "// MARK: - {SLATECLASS}

extension {COREDATACLASS}: SlateObjectConvertible {

    /// Returns an immutable {SLATECLASS} built from this managed object.
    public var slateObject: SlateObject {
        return {SLATECLASS}(managedObject: self)
    }
}

",
);

pub const MANAGED_OBJECT_EXTENSION: Template = Template::new(
    "extension {COREDATACLASS} {

    /// Name of the Core Data entity stored by {COREDATACLASS}.
    @nonobjc public class var __entityName: String {
        return \"{COREDATAENTITYNAME}\"
    }

    /// Fetch request for {COREDATAENTITYNAME} objects.
    @nonobjc public class func slateFetchRequest() -> NSFetchRequest<{COREDATACLASS}> {
        return NSFetchRequest<{COREDATACLASS}>(entityName: \"{COREDATAENTITYNAME}\")
    }

    /// Inserts a new {COREDATAENTITYNAME} object into the given context.
    public static func create(in moc: NSManagedObjectContext) -> {COREDATACLASS}? {
        return NSEntityDescription.insertNewObject(forEntityName: \"{COREDATAENTITYNAME}\", into: moc) as? {COREDATACLASS}
    }
}

",
);

pub const BINDING_IMPL: Template = Template::new(
    "public {OBJTYPE} {SLATECLASS}: SlateObject {

    /// Managed object class backing {SLATECLASS}.
    public static let __slate_managedObjectType: NSManagedObject.Type = {COREDATACLASS}.self

    /// Identity of the managed object this value was read from.
    public let slateID: SlateID

    // -- Attribute Declarations --
{ATTRDECLARATIONS}
    /// Reads every stored property from `managedObject`.
    public init(managedObject: {COREDATACLASS}) {
        self.slateID = managedObject.objectID

        // -- Attribute Assignments --
{ATTRASSIGNMENT}    }
{SUBSTRUCTS}}

",
);

pub const ATTR_DECLARATION: Template = Template::new(
    "    public let {ATTR}: {TYPE}{OPTIONAL}
",
);

pub const ATTR_ASSIGNMENT: Template = Template::new(
    "        self.{ATTR} = {VALUE}
",
);

pub const SUBSTRUCT_ASSIGNMENT: Template = Template::new(
    "        self.{ATTR} = {TYPE}(managedObject: managedObject)
",
);

pub const OPT_SUBSTRUCT_ASSIGNMENT: Template = Template::new(
    "        self.{ATTR} = managedObject.{PRESENCE} ? {TYPE}(managedObject: managedObject) : nil
",
);

pub const SUBSTRUCT_IMPL: Template = Template::new(
    "
    public struct {SLATESUBSTRUCT}: Equatable {

{ATTRDECLARATIONS}
        /// Reads the flattened properties of this group from `managedObject`.
        public init(managedObject: {COREDATACLASS}) {
{ATTRASSIGNMENT}        }
    }
",
);

pub const SUBSTRUCT_ATTR_DECLARATION: Template = Template::new(
    "        public let {ATTR}: {TYPE}{OPTIONAL}
",
);

pub const SUBSTRUCT_ATTR_ASSIGNMENT: Template = Template::new(
    "            self.{ATTR} = {VALUE}
",
);

pub const RELATIONSHIP_RESOLVER: Template = Template::new(
    "extension SlateRelationshipResolver where SlateObjectType{OBJQUAL}{SLATECLASS} {
{RELATIONSHIPS}}

",
);

pub const RELATIONSHIP_TO_ONE: Template = Template::new(
    "
    /// Resolves the `{RELATIONSHIPNAME}` relationship.
    public var {RELATIONSHIPNAME}: {TARGETSLATECLASS}{OPTIONAL} {
        return self.convert({COREDATACLASS}.self)
            .flatMap { $0.{RELATIONSHIPNAME} }
            .flatMap { {TARGETSLATECLASS}(managedObject: $0) }{NONOPTIONAL}
    }
",
);

pub const RELATIONSHIP_TO_MANY: Template = Template::new(
    "
    /// Resolves the `{RELATIONSHIPNAME}` relationship.
    public var {RELATIONSHIPNAME}: [{TARGETSLATECLASS}]? {
        guard let managedObject = self.convert({COREDATACLASS}.self) else {
            return nil
        }
        return {ADAPTER}(managedObject.{RELATIONSHIPNAME}, as: {TARGETSLATECLASS}.self)
    }
",
);

pub const EQUATABLE: Template = Template::new(
    "extension {SLATECLASS}: Equatable {

    public static func == (lhs: {SLATECLASS}, rhs: {SLATECLASS}) -> Bool {
        return (lhs.slateID == rhs.slateID){ATTRS}
    }
}

",
);

pub const EQUATABLE_TERM: Template = Template::new(
    " &&
               (lhs.{ATTR} == rhs.{ATTR})",
);

pub const STORAGE_FILE: Template = Template::new(
    "//
//  {FILENAME}
//
//  Generated by slategen. Do not edit by hand.{COMMAND}
//

import Foundation
import CoreData

@objc({CDENTITYCLASS})
public class {CDENTITYCLASS}: NSManagedObject {

    @nonobjc public class func fetchRequest() -> NSFetchRequest<{CDENTITYCLASS}> {
        return NSFetchRequest<{CDENTITYCLASS}>(entityName: \"{CDENTITYNAME}\")
    }

{PROPERTIES}}
",
);

pub const STORAGE_PROPERTY: Template = Template::new(
    "    @NSManaged public var {VARNAME}: {TYPE}{OPTIONAL}
",
);
