//! Picks the generic overload a call refers to, from the runtime types of its
//! already-evaluated arguments.
use crate::{
    error::MethodResolutionError,
    resolve::TypeRegistry,
    types::{
        comparer::TypeComparer,
        generics::{GenericLookup, TypeSignature},
        members::{BindingFlags, MethodDescription},
        TypeDescription,
    },
    value::Value,
};
use tracing::{debug, trace};

pub const DEFAULT_GENERIC_ARITY: usize = 1;

/// Public and non-public instance methods, declared or inherited.
pub const RESOLVER_BINDING_FLAGS: BindingFlags = BindingFlags::PUBLIC
    .union(BindingFlags::NON_PUBLIC)
    .union(BindingFlags::INSTANCE);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodLookup {
    Found(MethodDescription),
    NotFound,
}

impl MethodLookup {
    pub fn found(self) -> Option<MethodDescription> {
        match self {
            MethodLookup::Found(m) => Some(m),
            MethodLookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MethodLookup::Found(_))
    }
}

pub struct GenericMethodResolver<'r> {
    registry: &'r TypeRegistry,
    comparer: TypeComparer<'r>,
}

impl<'r> GenericMethodResolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            comparer: TypeComparer::new(registry),
        }
    }

    /// [`find_matching_generic_method`](Self::find_matching_generic_method)
    /// for methods with a single type parameter.
    pub fn find_generic_method(
        &self,
        ty: TypeDescription,
        name: &str,
        args: &[Value],
    ) -> Result<MethodLookup, MethodResolutionError> {
        self.find_matching_generic_method(ty, name, args, DEFAULT_GENERIC_ARITY)
    }

    /// Finds the unique instance method on `ty` named `name` that is generic
    /// over exactly `generic_count` type parameters and whose parameters accept
    /// `args` positionally.
    ///
    /// No match is not an error. More than one match is
    /// [`MethodResolutionError::AmbiguousMatch`]; a [`Value::Missing`] argument
    /// is rejected up front with [`MethodResolutionError::UnsupportedArgument`].
    pub fn find_matching_generic_method(
        &self,
        ty: TypeDescription,
        name: &str,
        args: &[Value],
        generic_count: usize,
    ) -> Result<MethodLookup, MethodResolutionError> {
        if let Some(index) = args.iter().position(Value::is_missing) {
            return Err(MethodResolutionError::UnsupportedArgument { index });
        }

        let matches: Vec<MethodDescription> = self
            .registry
            .get_methods(ty, RESOLVER_BINDING_FLAGS)
            .into_iter()
            .filter(|m| m.name() == name)
            .filter(|m| self.is_candidate(*m, args, generic_count))
            .collect();

        match matches.as_slice() {
            [] => {
                debug!(%ty, name, generic_count, "no matching generic method");
                Ok(MethodLookup::NotFound)
            }
            [method] => {
                debug!(%method, "resolved generic method");
                Ok(MethodLookup::Found(*method))
            }
            _ => Err(MethodResolutionError::AmbiguousMatch {
                method: format!("{}::{}", ty, name),
                candidates: matches.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    fn is_candidate(&self, method: MethodDescription, args: &[Value], generic_count: usize) -> bool {
        if !method.is_generic_method() {
            trace!(%method, "rejected: not generic");
            return false;
        }
        if method.generic_arity() != generic_count {
            trace!(%method, generic_count, "rejected: generic arity");
            return false;
        }
        if method.parameters().len() != args.len() {
            trace!(%method, args = args.len(), "rejected: parameter count");
            return false;
        }

        let lookup = method.type_generics();
        for (index, (param, arg)) in method.parameters().iter().zip(args).enumerate() {
            if !self.parameter_accepts(&lookup, &param.parameter_type, arg) {
                trace!(%method, index, ?arg, "rejected: argument type");
                return false;
            }
        }
        true
    }

    fn parameter_accepts(&self, lookup: &GenericLookup, parameter: &TypeSignature, arg: &Value) -> bool {
        // `T`, `List<T>` and friends are unbound here, so nothing is assignable to them
        if parameter.mentions_method_generics() {
            return false;
        }
        match lookup.make_concrete(self.registry, parameter) {
            Ok(declared) => self.comparer.accepts_value(declared, arg),
            Err(e) => {
                trace!(%parameter, error = %e, "parameter type could not be made concrete");
                false
            }
        }
    }
}
