//! The type registry: this crate's stand-in for loaded assembly metadata.
//!
//! Types and methods are registered once (at startup or when a test builds its
//! fixture) and are immutable afterwards. Lookups hand out cheap copyable
//! descriptors whose identity is the address of the leaked definition.
use crate::{
    error::TypeResolutionError,
    types::{
        builder::{MethodBuilder, TypeBuilder},
        generics::{GenericLookup, TypeSignature},
        members::{Accessibility, BindingFlags, MethodDefinition, MethodDescription},
        simple::SimpleTypeCache,
        GenericInstantiation, TypeDefinition, TypeDescription, TypeKind,
    },
    value::Value,
};
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::debug;

pub mod corlib;

pub use corlib::CoreTypes;

pub struct TypeRegistry {
    types: DashMap<String, TypeDescription>,
    instantiations: DashMap<(TypeDescription, Vec<TypeDescription>), TypeDescription>,
    methods: DashMap<TypeDescription, Vec<&'static MethodDefinition>>,
    pub(crate) hierarchy_cache: DashMap<(TypeDescription, TypeDescription), bool>,
    pub(crate) simple_types: SimpleTypeCache,
    core: CoreTypes,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let types = DashMap::new();
        let core = CoreTypes::load(&types);
        let simple_types = SimpleTypeCache::new(core.simple_type_seed());
        Self {
            types,
            instantiations: DashMap::new(),
            methods: DashMap::new(),
            hierarchy_cache: DashMap::new(),
            simple_types,
            core,
        }
    }

    pub fn core(&self) -> &CoreTypes {
        &self.core
    }

    pub fn locate_type(&self, full_name: &str) -> Result<TypeDescription, TypeResolutionError> {
        self.types
            .get(full_name)
            .map(|t| *t)
            .ok_or_else(|| TypeResolutionError::TypeNotFound(full_name.to_string()))
    }

    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Registers a new type. Classes without an explicit base extend
    /// `System.Object`, structs `System.ValueType`, enums `System.Enum`.
    pub fn define(&self, builder: TypeBuilder) -> Result<TypeDescription, TypeResolutionError> {
        let builder = if builder.has_base() {
            builder
        } else {
            match builder.kind() {
                TypeKind::Class => builder.extends(self.core.object),
                TypeKind::Struct | TypeKind::Primitive => builder.extends(self.core.value_type),
                TypeKind::Enum => builder.extends(self.core.enum_type),
                TypeKind::Interface => builder,
            }
        };

        let mut definition = builder.build();
        definition.extends = definition
            .extends
            .map(|s| self.close_signature(s))
            .transpose()?;
        definition.implements = definition
            .implements
            .into_iter()
            .map(|s| self.close_signature(s))
            .collect::<Result<_, _>>()?;

        match self.types.entry(definition.full_name()) {
            Entry::Occupied(o) => Err(TypeResolutionError::DuplicateType(o.key().clone())),
            Entry::Vacant(v) => {
                let td = TypeDescription::leak(definition);
                debug!(type_name = %td, "defined type");
                v.insert(td);
                Ok(td)
            }
        }
    }

    /// Adds a method to the method table of `parent`. Methods of generic types
    /// are always recorded on the open definition.
    pub fn define_method(&self, parent: TypeDescription, builder: MethodBuilder) -> MethodDescription {
        let parent = parent.generic_type_definition().unwrap_or(parent);
        let method: &'static MethodDefinition = Box::leak(Box::new(builder.build()));
        self.methods.entry(parent).or_default().push(method);
        let description = MethodDescription { parent, method };
        debug!(method = %description, "defined method");
        description
    }

    /// Closes `definition` over `arguments`. The same definition and arguments
    /// always produce the same type identity.
    pub fn instantiate(
        &self,
        definition: TypeDescription,
        arguments: &[TypeDescription],
    ) -> Result<TypeDescription, TypeResolutionError> {
        if !definition.is_generic_type_definition() {
            return Err(TypeResolutionError::NotGenericDefinition(
                definition.to_string(),
            ));
        }
        let expected = definition.definition.generic_parameters.len();
        if arguments.len() != expected {
            return Err(TypeResolutionError::GenericArityMismatch {
                type_name: definition.type_name(),
                expected,
                actual: arguments.len(),
            });
        }

        let key = (definition, arguments.to_vec());
        if let Some(existing) = self.instantiations.get(&key) {
            return Ok(*existing);
        }

        let lookup = GenericLookup::new(arguments.to_vec());
        let template = definition.definition;
        let extends = template
            .extends
            .as_ref()
            .map(|s| lookup.make_concrete(self, s).map(TypeSignature::Type))
            .transpose()?;
        let implements = template
            .implements
            .iter()
            .map(|s| lookup.make_concrete(self, s).map(TypeSignature::Type))
            .collect::<Result<_, _>>()?;

        // two threads may race to build the same instantiation; the first insert wins
        let instantiated = *self.instantiations.entry(key).or_insert_with(|| {
            TypeDescription::leak(TypeDefinition {
                namespace: template.namespace.clone(),
                name: template.name.clone(),
                kind: template.kind,
                type_code: template.type_code,
                generic_parameters: vec![],
                instantiation: Some(GenericInstantiation {
                    definition,
                    arguments: arguments.to_vec(),
                }),
                extends,
                implements,
                enum_underlying: None,
                properties: vec![],
            })
        });
        debug!(type_name = %instantiated, "instantiated generic type");
        Ok(instantiated)
    }

    /// Methods visible on `ty` under `flags`, declared ones first, then those
    /// inherited along the base chain. Inherited private and inherited static
    /// members are never visible.
    pub fn get_methods(&self, ty: TypeDescription, flags: BindingFlags) -> Vec<MethodDescription> {
        let mut found = vec![];
        for (depth, parent) in ty.ancestors().enumerate() {
            let inherited = depth > 0;
            if inherited && flags.contains(BindingFlags::DECLARED_ONLY) {
                break;
            }

            let table_key = parent.generic_type_definition().unwrap_or(parent);
            let Some(table) = self.methods.get(&table_key) else {
                continue;
            };
            for &method in table.iter() {
                let visible_kind = if method.instance {
                    flags.contains(BindingFlags::INSTANCE)
                } else {
                    flags.contains(BindingFlags::STATIC) && !inherited
                };
                let visible_access = match method.accessibility {
                    Accessibility::Public => flags.contains(BindingFlags::PUBLIC),
                    Accessibility::Private if inherited => false,
                    _ => flags.contains(BindingFlags::NON_PUBLIC),
                };
                if visible_kind && visible_access {
                    found.push(MethodDescription { parent, method });
                }
            }
        }
        found
    }

    pub fn runtime_type_of(&self, value: &Value) -> Option<TypeDescription> {
        value.runtime_type(&self.core)
    }

    /// Instantiates fully closed generic signatures so that stored base types
    /// and interfaces name concrete types wherever possible.
    fn close_signature(&self, signature: TypeSignature) -> Result<TypeSignature, TypeResolutionError> {
        match &signature {
            TypeSignature::Generic(..) if signature.is_closed() => GenericLookup::default()
                .make_concrete(self, &signature)
                .map(TypeSignature::Type),
            _ => Ok(signature),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
