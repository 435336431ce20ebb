//! # dotnet-type-ext
//!
//! Runtime generic-overload resolution over a CLR-style type registry.
//!
//! Given a type, a method name, the already-evaluated call arguments and the
//! number of type parameters the caller intends to supply,
//! [`GenericMethodResolver`] finds the single generic method the call refers
//! to by looking at the *runtime* types of the arguments.
//! [`GenericInvoker`] closes that method over concrete type arguments and
//! calls it, synchronously or by awaiting its asynchronous result.
//!
//! ## Core Types
//!
//! - **[`TypeRegistry`]**: Owns type definitions, method tables, generic instantiations and the simple-type cache.
//! - **[`TypeDescription`]**: A registered type.
//! - **[`MethodDescription`]**: A registered method.
//! - **[`TypeExtensions`]**: Generic-ancestry and interface predicates.
pub mod binder;
pub mod error;
pub mod exceptions;
pub mod invoke;
pub mod resolve;
pub mod types;
pub mod value;

pub use binder::{GenericMethodResolver, MethodLookup, DEFAULT_GENERIC_ARITY};
pub use error::{InvokeError, MethodResolutionError, TypeResolutionError};
pub use exceptions::Exception;
pub use invoke::{AsyncNativeMethod, BoundMethod, CallFrame, GenericInvoker, MethodBody, NativeMethod};
pub use resolve::{CoreTypes, TypeRegistry};
pub use types::{
    builder::{MethodBuilder, TypeBuilder},
    extensions::TypeExtensions,
    generics::{GenericLookup, TypeSignature},
    members::{BindingFlags, MethodDescription, PropertyDescription},
    TypeDescription, TypeKind,
};
pub use value::{ObjectRef, Value};
