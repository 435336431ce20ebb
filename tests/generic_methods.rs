mod common;

use common::fixture;
use dotnet_type_ext::{
    GenericInvoker, GenericMethodResolver, InvokeError, MethodBuilder, MethodLookup,
    MethodResolutionError, NativeMethod, ObjectRef, TypeBuilder, TypeRegistry, Value,
};

#[test]
fn two_arguments_single_generic() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);
    let args = [Value::Int32(1), Value::Boolean(true)];

    let method = resolver
        .find_generic_method(f.host, "TestMethod", &args)
        .unwrap()
        .found()
        .expect("matching method not found");
    assert_eq!(method.generic_arity(), 1);
    assert_eq!(method.parameters().len(), 2);

    let target = ObjectRef::new(f.host);
    let result = GenericInvoker::new(&f.registry)
        .invoke_generic(&target, "TestMethod", &[f.type1], &args)
        .unwrap();
    assert_eq!(result.as_str(), Some("GenericWith2Params"));
}

#[test]
fn two_arguments_two_generics() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);
    let args = [Value::Int32(1), Value::Boolean(true)];

    let method = resolver
        .find_matching_generic_method(f.host, "TestMethod", &args, 2)
        .unwrap()
        .found()
        .expect("matching method not found");
    assert_eq!(method.generic_arity(), 2);

    let target = ObjectRef::new(f.host);
    let result = GenericInvoker::new(&f.registry)
        .invoke_generic(&target, "TestMethod", &[f.type1, f.type1], &args)
        .unwrap();
    assert_eq!(result.as_str(), Some("2GenericWith2Params"));
}

#[test]
fn no_arguments_picks_by_arity() {
    let f = fixture();
    let target = ObjectRef::new(f.host);
    let invoker = GenericInvoker::new(&f.registry);

    let one = invoker
        .invoke_generic(&target, "TestMethod", &[f.type1], &[])
        .unwrap();
    let two = invoker
        .invoke_generic(&target, "TestMethod", &[f.type1, f.type2], &[])
        .unwrap();
    assert_eq!(one.as_str(), Some("Generic"));
    assert_eq!(two.as_str(), Some("2Generic"));
}

#[test]
fn missing_argument_is_unsupported() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);

    assert_eq!(
        resolver.find_generic_method(f.host, "TestMethod", &[Value::Int32(1), Value::Missing]),
        Err(MethodResolutionError::UnsupportedArgument { index: 1 })
    );
    // rejected before any lookup, even for names that do not exist
    assert_eq!(
        resolver.find_generic_method(f.host, "Nope", &[Value::Missing]),
        Err(MethodResolutionError::UnsupportedArgument { index: 0 })
    );
}

#[test]
fn runtime_type_selects_overload() {
    let f = fixture();
    let target = ObjectRef::new(f.host);
    let invoker = GenericInvoker::new(&f.registry);

    let with_type1 = [
        Value::Int32(1),
        Value::Boolean(true),
        Value::Object(ObjectRef::new(f.type1)),
    ];
    let with_type2 = [
        Value::Int32(1),
        Value::Boolean(true),
        Value::Object(ObjectRef::new(f.type2)),
    ];

    let result = invoker
        .invoke_generic(&target, "TestMethod", &[f.type1], &with_type1)
        .unwrap();
    assert_eq!(result.as_str(), Some("GenericWith3Params_t1"));

    let result = invoker
        .invoke_generic(&target, "TestMethod", &[f.type1], &with_type2)
        .unwrap();
    assert_eq!(result.as_str(), Some("GenericWith3Params_t2"));
}

#[test]
fn unknown_name_is_not_found() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);
    let args = [
        Value::Int32(1),
        Value::Boolean(true),
        Value::Object(ObjectRef::new(f.type1)),
    ];

    assert_eq!(
        resolver.find_generic_method(f.host, "TestMethodxxx", &args),
        Ok(MethodLookup::NotFound)
    );

    let target = ObjectRef::new(f.host);
    let err = GenericInvoker::new(&f.registry)
        .invoke_generic(&target, "TestMethodxxx", &[f.type1], &args)
        .unwrap_err();
    assert!(matches!(err, InvokeError::MethodNotFound { .. }));
    assert!(err.to_string().starts_with("Matching method not found"));
}

#[test]
fn default_values_do_not_make_arguments_optional() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);

    // TestMethod<T>(int, bool? = null) still needs both arguments; with one
    // argument no overload qualifies.
    assert_eq!(
        resolver.find_generic_method(f.host, "TestMethod", &[Value::Int32(1)]),
        Ok(MethodLookup::NotFound)
    );
    assert_eq!(
        resolver.find_generic_method(f.host, "TestMethod", &[Value::Int32(1), Value::Null]),
        resolver.find_generic_method(
            f.host,
            "TestMethod",
            &[Value::Int32(1), Value::Boolean(false)]
        )
    );
}

#[test]
fn no_numeric_widening_in_arguments() {
    let f = fixture();
    let resolver = GenericMethodResolver::new(&f.registry);
    assert_eq!(
        resolver.find_generic_method(f.host, "TestMethod", &[Value::Int64(1), Value::Boolean(true)]),
        Ok(MethodLookup::NotFound)
    );
}

#[test]
fn subclass_matching_both_overloads_is_ambiguous() {
    let registry = TypeRegistry::new();
    let core = *registry.core();
    let base = registry.define(TypeBuilder::class("Tests", "Base")).unwrap();
    let derived = registry
        .define(TypeBuilder::class("Tests", "Derived").extends(base))
        .unwrap();
    let host = registry.define(TypeBuilder::class("Tests", "Host")).unwrap();
    let with_base = registry.define_method(
        host,
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .parameter("i", core.int32)
            .parameter("b", core.boolean)
            .parameter("model", base),
    );
    registry.define_method(
        host,
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .parameter("i", core.int32)
            .parameter("b", core.boolean)
            .parameter("model", derived),
    );
    let resolver = GenericMethodResolver::new(&registry);

    let base_args = [
        Value::Int32(1),
        Value::Boolean(true),
        Value::Object(ObjectRef::new(base)),
    ];
    assert_eq!(
        resolver.find_generic_method(host, "TestMethod", &base_args),
        Ok(MethodLookup::Found(with_base))
    );

    // a Derived fits both slots; the resolver reports it instead of ranking
    let derived_args = [
        Value::Int32(1),
        Value::Boolean(true),
        Value::Object(ObjectRef::new(derived)),
    ];
    match resolver.find_generic_method(host, "TestMethod", &derived_args) {
        Err(MethodResolutionError::AmbiguousMatch { method, candidates }) => {
            assert_eq!(method, "Tests.Host::TestMethod");
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("expected an ambiguous match, got {:?}", other),
    }
}

#[test]
fn private_and_inherited_methods_are_candidates() {
    let registry = TypeRegistry::new();
    let core = *registry.core();
    let base = registry.define(TypeBuilder::class("Tests", "Base")).unwrap();
    let derived = registry
        .define(TypeBuilder::class("Tests", "Derived").extends(base))
        .unwrap();
    registry.define_method(
        base,
        MethodBuilder::new("Describe")
            .generic_parameters(["T"])
            .parameter("count", core.int32)
            .body(NativeMethod::new(|frame| {
                let count = frame.arg(0).and_then(Value::as_i32).unwrap_or_default();
                Ok(Value::from(format!("{} x {}", count, frame.generics.method_generics[0])))
            })),
    );
    registry.define_method(
        derived,
        MethodBuilder::new("Secret")
            .generic_parameters(["T"])
            .private()
            .body(NativeMethod::new(|_| Ok(Value::from("hidden")))),
    );
    let target = ObjectRef::new(derived);
    let invoker = GenericInvoker::new(&registry);

    let described = invoker
        .invoke_generic(&target, "Describe", &[core.guid], &[Value::Int32(3)])
        .unwrap();
    assert_eq!(described.as_str(), Some("3 x System.Guid"));

    let secret = invoker
        .invoke_generic(&target, "Secret", &[core.string], &[])
        .unwrap();
    assert_eq!(secret.as_str(), Some("hidden"));
}

#[test]
fn static_methods_are_not_candidates() {
    let registry = TypeRegistry::new();
    let host = registry.define(TypeBuilder::class("Tests", "Host")).unwrap();
    registry.define_method(
        host,
        MethodBuilder::new("Create")
            .generic_parameters(["T"])
            .static_method(),
    );
    let resolver = GenericMethodResolver::new(&registry);
    assert_eq!(
        resolver.find_generic_method(host, "Create", &[]),
        Ok(MethodLookup::NotFound)
    );
}
