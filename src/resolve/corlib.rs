//! The slice of the core library the resolver and the predicates depend on.
use crate::types::{
    builder::TypeBuilder,
    generics::TypeSignature,
    TypeCode, TypeDescription,
};
use dashmap::DashMap;

#[derive(Clone, Copy, Debug)]
pub struct CoreTypes {
    pub object: TypeDescription,
    pub value_type: TypeDescription,
    pub enum_type: TypeDescription,

    pub boolean: TypeDescription,
    pub char: TypeDescription,
    pub sbyte: TypeDescription,
    pub byte: TypeDescription,
    pub int16: TypeDescription,
    pub uint16: TypeDescription,
    pub int32: TypeDescription,
    pub uint32: TypeDescription,
    pub int64: TypeDescription,
    pub uint64: TypeDescription,
    pub intptr: TypeDescription,
    pub uintptr: TypeDescription,
    pub single: TypeDescription,
    pub double: TypeDescription,

    pub string: TypeDescription,
    pub decimal: TypeDescription,
    pub date_time: TypeDescription,
    pub date_time_offset: TypeDescription,
    pub time_span: TypeDescription,
    pub guid: TypeDescription,
    pub nullable: TypeDescription,

    pub icomparable: TypeDescription,
    pub ienumerable: TypeDescription,
    pub ienumerable_generic: TypeDescription,
    pub icollection: TypeDescription,
    pub ilist: TypeDescription,
    pub list: TypeDescription,
}

impl CoreTypes {
    pub(crate) fn load(types: &DashMap<String, TypeDescription>) -> Self {
        // Core types never clash and never need instantiation at load time, so
        // they bypass `TypeRegistry::define`.
        let define = |builder: TypeBuilder| {
            let td = TypeDescription::leak(builder.build());
            types.insert(td.type_name(), td);
            td
        };

        let object = define(TypeBuilder::class("System", "Object"));
        let value_type = define(TypeBuilder::class("System", "ValueType").extends(object));
        let enum_type = define(TypeBuilder::class("System", "Enum").extends(value_type));

        let icomparable = define(TypeBuilder::interface("System", "IComparable"));
        let primitive = |name: &str, code: TypeCode| {
            define(
                TypeBuilder::primitive(name, code)
                    .extends(value_type)
                    .implements(icomparable),
            )
        };
        let boolean = primitive("Boolean", TypeCode::Boolean);
        let char = primitive("Char", TypeCode::Char);
        let sbyte = primitive("SByte", TypeCode::SByte);
        let byte = primitive("Byte", TypeCode::Byte);
        let int16 = primitive("Int16", TypeCode::Int16);
        let uint16 = primitive("UInt16", TypeCode::UInt16);
        let int32 = primitive("Int32", TypeCode::Int32);
        let uint32 = primitive("UInt32", TypeCode::UInt32);
        let int64 = primitive("Int64", TypeCode::Int64);
        let uint64 = primitive("UInt64", TypeCode::UInt64);
        let intptr = primitive("IntPtr", TypeCode::Object);
        let uintptr = primitive("UIntPtr", TypeCode::Object);
        let single = primitive("Single", TypeCode::Single);
        let double = primitive("Double", TypeCode::Double);

        let string = define(
            TypeBuilder::class("System", "String")
                .type_code(TypeCode::String)
                .extends(object)
                .implements(icomparable),
        );
        let scalar = |name: &str, code: TypeCode| {
            define(
                TypeBuilder::value_type("System", name)
                    .type_code(code)
                    .extends(value_type)
                    .implements(icomparable),
            )
        };
        let decimal = scalar("Decimal", TypeCode::Decimal);
        let date_time = scalar("DateTime", TypeCode::DateTime);
        let date_time_offset = scalar("DateTimeOffset", TypeCode::Object);
        let time_span = scalar("TimeSpan", TypeCode::Object);
        let guid = scalar("Guid", TypeCode::Object);
        let nullable = define(
            TypeBuilder::value_type("System", "Nullable`1")
                .extends(value_type)
                .generic_parameters(["T"]),
        );

        let ienumerable = define(TypeBuilder::interface("System.Collections", "IEnumerable"));
        let ienumerable_generic = define(
            TypeBuilder::interface("System.Collections.Generic", "IEnumerable`1")
                .generic_parameters(["T"])
                .implements(ienumerable),
        );
        let icollection = define(
            TypeBuilder::interface("System.Collections.Generic", "ICollection`1")
                .generic_parameters(["T"])
                .implements(TypeSignature::generic(
                    ienumerable_generic,
                    [TypeSignature::TypeGeneric(0)],
                )),
        );
        let ilist = define(
            TypeBuilder::interface("System.Collections.Generic", "IList`1")
                .generic_parameters(["T"])
                .implements(TypeSignature::generic(
                    icollection,
                    [TypeSignature::TypeGeneric(0)],
                )),
        );
        let list = define(
            TypeBuilder::class("System.Collections.Generic", "List`1")
                .generic_parameters(["T"])
                .extends(object)
                .implements(TypeSignature::generic(ilist, [TypeSignature::TypeGeneric(0)]))
                .property("Count", int32),
        );

        Self {
            object,
            value_type,
            enum_type,
            boolean,
            char,
            sbyte,
            byte,
            int16,
            uint16,
            int32,
            uint32,
            int64,
            uint64,
            intptr,
            uintptr,
            single,
            double,
            string,
            decimal,
            date_time,
            date_time_offset,
            time_span,
            guid,
            nullable,
            icomparable,
            ienumerable,
            ienumerable_generic,
            icollection,
            ilist,
            list,
        }
    }

    /// Types classified as simple before any query runs.
    pub fn simple_type_seed(&self) -> [TypeDescription; 7] {
        [
            self.enum_type,
            self.string,
            self.decimal,
            self.date_time,
            self.date_time_offset,
            self.time_span,
            self.guid,
        ]
    }

    /// `X` when `ty` is `Nullable<X>`.
    pub fn nullable_underlying(&self, ty: TypeDescription) -> Option<TypeDescription> {
        match ty.generic_type_definition() {
            Some(def) if def == self.nullable && !ty.is_generic_type_definition() => {
                ty.generic_arguments().first().copied()
            }
            _ => None,
        }
    }
}
