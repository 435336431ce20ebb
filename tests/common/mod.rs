#![allow(dead_code)]

use dotnet_type_ext::{
    MethodBuilder, NativeMethod, TypeBuilder, TypeDescription, TypeRegistry, TypeSignature, Value,
};

pub struct Fixture {
    pub registry: TypeRegistry,
    pub host: TypeDescription,
    pub type1: TypeDescription,
    pub type2: TypeDescription,
}

fn returns(text: &'static str) -> NativeMethod {
    NativeMethod::new(move |_| Ok(Value::from(text)))
}

/// A host type carrying every `TestMethod` overload shape the resolver has to
/// tell apart.
pub fn fixture() -> Fixture {
    let registry = TypeRegistry::new();
    let core = *registry.core();
    let type1 = registry.define(TypeBuilder::class("Tests", "Type1")).unwrap();
    let type2 = registry.define(TypeBuilder::class("Tests", "Type2")).unwrap();
    let host = registry
        .define(TypeBuilder::class("Tests", "TypeExtensionTests"))
        .unwrap();
    let nullable_bool = TypeSignature::generic(core.nullable, [core.boolean]);

    let overloads = [
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .returns(core.string)
            .body(returns("Generic")),
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T", "U"])
            .returns(core.string)
            .body(returns("2Generic")),
        MethodBuilder::new("TestMethod")
            .returns(core.string)
            .body(returns("NonGeneric")),
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .parameter("testInt", core.int32)
            .parameter("testBool", core.boolean)
            .parameter("t1", type1)
            .returns(core.string)
            .body(returns("GenericWith3Params_t1")),
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T", "U"])
            .parameter("testInt", core.int32)
            .optional_parameter("testBool", nullable_bool.clone(), Value::Null)
            .returns(core.string)
            .body(returns("2GenericWith2Params")),
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .parameter("testInt", core.int32)
            .optional_parameter("testBool", nullable_bool, Value::Null)
            .returns(core.string)
            .body(returns("GenericWith2Params")),
        MethodBuilder::new("TestMethod")
            .generic_parameters(["T"])
            .parameter("testInt", core.int32)
            .parameter("testBool", core.boolean)
            .parameter("t2", type2)
            .returns(core.string)
            .body(returns("GenericWith3Params_t2")),
    ];
    for overload in overloads {
        registry.define_method(host, overload);
    }

    Fixture {
        registry,
        host,
        type1,
        type2,
    }
}
