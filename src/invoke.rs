//! Binding resolved generic methods to type arguments and calling them.
use crate::{
    binder::GenericMethodResolver,
    error::{InvokeError, MethodResolutionError},
    exceptions::Exception,
    resolve::TypeRegistry,
    types::{
        comparer::TypeComparer,
        generics::GenericLookup,
        members::{BindingFlags, MethodDescription},
        TypeDescription,
    },
    value::{ObjectRef, Value},
};
use enum_dispatch::enum_dispatch;
use std::{
    fmt::{self, Debug, Formatter},
    future::Future,
    pin::Pin,
    sync::Arc,
};
use tracing::debug;

pub type PendingResult = Pin<Box<dyn Future<Output = Result<Value, Exception>> + Send + 'static>>;

/// What calling a body produced: a finished result, or a computation still in
/// flight.
pub enum Invocation {
    Completed(Result<Value, Exception>),
    Pending(PendingResult),
}

pub struct CallFrame<'a> {
    pub method: MethodDescription,
    pub this: Option<&'a ObjectRef>,
    pub generics: &'a GenericLookup,
    pub args: &'a [Value],
}

impl CallFrame<'_> {
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

#[enum_dispatch]
pub trait Invocable {
    fn call(&self, frame: CallFrame<'_>) -> Invocation;
}

#[enum_dispatch(Invocable)]
#[derive(Clone, Debug)]
pub enum MethodBody {
    NativeMethod,
    AsyncNativeMethod,
}

type SyncFn = dyn for<'a> Fn(CallFrame<'a>) -> Result<Value, Exception> + Send + Sync;
type AsyncFn = dyn for<'a> Fn(CallFrame<'a>) -> PendingResult + Send + Sync;

#[derive(Clone)]
pub struct NativeMethod(Arc<SyncFn>);

impl NativeMethod {
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(CallFrame<'a>) -> Result<Value, Exception> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl Invocable for NativeMethod {
    fn call(&self, frame: CallFrame<'_>) -> Invocation {
        Invocation::Completed((self.0)(frame))
    }
}

impl Debug for NativeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NativeMethod")
    }
}

/// A body whose result is itself an asynchronous computation. The closure
/// copies what it needs out of the frame; the future it returns owns its data.
#[derive(Clone)]
pub struct AsyncNativeMethod(Arc<AsyncFn>);

impl AsyncNativeMethod {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: for<'a> Fn(CallFrame<'a>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, Exception>> + Send + 'static,
    {
        Self(Arc::new(move |frame: CallFrame<'_>| -> PendingResult {
            Box::pin(f(frame))
        }))
    }
}

impl Invocable for AsyncNativeMethod {
    fn call(&self, frame: CallFrame<'_>) -> Invocation {
        Invocation::Pending((self.0)(frame))
    }
}

impl Debug for AsyncNativeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncNativeMethod")
    }
}

/// A method closed over concrete type arguments (`MakeGenericMethod`).
#[derive(Clone, Debug)]
pub struct BoundMethod {
    pub method: MethodDescription,
    pub generics: GenericLookup,
}

impl BoundMethod {
    pub fn bind(method: MethodDescription, type_arguments: &[TypeDescription]) -> Result<Self, InvokeError> {
        if type_arguments.len() != method.generic_arity() {
            return Err(InvokeError::GenericArityMismatch {
                method: method.to_string(),
                expected: method.generic_arity(),
                actual: type_arguments.len(),
            });
        }
        Ok(Self {
            method,
            generics: method.type_generics().with_method_generics(type_arguments.to_vec()),
        })
    }

    pub fn parameter_types(&self, registry: &TypeRegistry) -> Result<Vec<TypeDescription>, InvokeError> {
        self.method
            .parameters()
            .iter()
            .map(|p| {
                self.generics
                    .make_concrete(registry, &p.parameter_type)
                    .map_err(InvokeError::from)
            })
            .collect()
    }

    /// Checks the target and the arguments against the concrete signature,
    /// then calls the body.
    pub fn invoke(
        &self,
        registry: &TypeRegistry,
        this: Option<&ObjectRef>,
        args: &[Value],
    ) -> Result<Invocation, InvokeError> {
        let method = self.method;
        let this = if method.is_static() {
            None
        } else {
            Some(this.ok_or_else(|| InvokeError::TargetRequired(method.to_string()))?)
        };

        let parameter_types = self.parameter_types(registry)?;
        if parameter_types.len() != args.len() {
            return Err(InvokeError::ArgumentCount {
                method: method.to_string(),
                expected: parameter_types.len(),
                actual: args.len(),
            });
        }
        let comparer = TypeComparer::new(registry);
        for (index, (expected, arg)) in parameter_types.iter().zip(args).enumerate() {
            if !comparer.accepts_value(*expected, arg) {
                return Err(InvokeError::ArgumentMismatch {
                    method: method.to_string(),
                    index,
                    expected: expected.to_string(),
                    actual: describe(registry, arg),
                });
            }
        }

        let body = method
            .body()
            .ok_or_else(|| InvokeError::MissingBody(method.to_string()))?;
        debug!(%method, generics = ?self.generics, "invoking");
        Ok(body.call(CallFrame {
            method,
            this,
            generics: &self.generics,
            args,
        }))
    }
}

fn describe(registry: &TypeRegistry, value: &Value) -> String {
    match value {
        Value::Missing => "System.Reflection.Missing".to_string(),
        _ => registry
            .runtime_type_of(value)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "null".to_string()),
    }
}

/// Resolves, binds and calls generic methods by name.
pub struct GenericInvoker<'r> {
    registry: &'r TypeRegistry,
    resolver: GenericMethodResolver<'r>,
}

impl<'r> GenericInvoker<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            resolver: GenericMethodResolver::new(registry),
        }
    }

    /// Resolves on the target's runtime type with an arity of
    /// `generic_types.len()`. Unlike the bare resolver, a missing method is an
    /// error here.
    pub fn bind(
        &self,
        target: &ObjectRef,
        name: &str,
        generic_types: &[TypeDescription],
        args: &[Value],
    ) -> Result<BoundMethod, InvokeError> {
        let ty = target.runtime_type();
        let method = self
            .resolver
            .find_matching_generic_method(ty, name, args, generic_types.len())?
            .found()
            .ok_or_else(|| InvokeError::MethodNotFound {
                type_name: ty.to_string(),
                method: name.to_string(),
            })?;
        BoundMethod::bind(method, generic_types)
    }

    pub fn invoke_generic(
        &self,
        target: &ObjectRef,
        name: &str,
        generic_types: &[TypeDescription],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        let bound = self.bind(target, name, generic_types, args)?;
        if bound.method.is_async() {
            return Err(InvokeError::AsyncMethod(bound.method.to_string()));
        }
        complete(bound.invoke(self.registry, Some(target), args)?, &bound)
    }

    /// Like [`invoke_generic`](Self::invoke_generic), for methods whose result
    /// is an asynchronous computation: waits for it and returns what it
    /// produced. Its failure is returned as is.
    pub async fn invoke_generic_async(
        &self,
        target: &ObjectRef,
        name: &str,
        generic_types: &[TypeDescription],
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        let bound = self.bind(target, name, generic_types, args)?;
        if !bound.method.is_async() {
            return Err(InvokeError::NotAsync(bound.method.to_string()));
        }
        match bound.invoke(self.registry, Some(target), args)? {
            Invocation::Pending(pending) => Ok(pending.await?),
            Invocation::Completed(result) => Ok(result?),
        }
    }

    /// Calls the only public method named `name` on `declaring`, closed over a
    /// single type argument, without a target instance.
    pub fn invoke_static_generic(
        &self,
        declaring: TypeDescription,
        name: &str,
        type_argument: TypeDescription,
        args: &[Value],
    ) -> Result<Value, InvokeError> {
        let candidates: Vec<MethodDescription> = self
            .registry
            .get_methods(
                declaring,
                BindingFlags::PUBLIC | BindingFlags::INSTANCE | BindingFlags::STATIC,
            )
            .into_iter()
            .filter(|m| m.name() == name)
            .collect();
        let method = match candidates.as_slice() {
            [] => {
                return Err(InvokeError::MethodNotFound {
                    type_name: declaring.to_string(),
                    method: name.to_string(),
                })
            }
            [method] => *method,
            _ => {
                return Err(MethodResolutionError::AmbiguousMatch {
                    method: format!("{}::{}", declaring, name),
                    candidates: candidates.iter().map(ToString::to_string).collect(),
                }
                .into())
            }
        };

        let bound = BoundMethod::bind(method, &[type_argument])?;
        if bound.method.is_async() {
            return Err(InvokeError::AsyncMethod(bound.method.to_string()));
        }
        complete(bound.invoke(self.registry, None, args)?, &bound)
    }
}

fn complete(invocation: Invocation, bound: &BoundMethod) -> Result<Value, InvokeError> {
    match invocation {
        Invocation::Completed(result) => Ok(result?),
        Invocation::Pending(_) => Err(InvokeError::AsyncMethod(bound.method.to_string())),
    }
}
