use clap::Parser;
use dotnet_type_ext::{BindingFlags, MethodDescription, TypeDescription, TypeRegistry};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the registry's view of a core library type"
)]
struct Args {
    /// The full name of the type to dump (e.g. System.Int32, System.Nullable`1)
    type_name: String,
    /// Close a generic type definition over these types (full names, in order)
    #[arg(short, long = "generic", value_name = "TYPE")]
    generic: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = TypeRegistry::new();

    let ty = match resolve_type(&registry, &args) {
        Ok(ty) => ty,
        Err(e) => {
            eprintln!("{}", e);
            println!("\nAvailable types:");
            for name in registry.type_names() {
                println!("  {}", name);
            }
            return ExitCode::FAILURE;
        }
    };

    print_type_info(&registry, ty);
    ExitCode::SUCCESS
}

fn resolve_type(
    registry: &TypeRegistry,
    args: &Args,
) -> Result<TypeDescription, dotnet_type_ext::TypeResolutionError> {
    let ty = registry.locate_type(&args.type_name)?;
    if args.generic.is_empty() {
        return Ok(ty);
    }
    let arguments = args
        .generic
        .iter()
        .map(|name| registry.locate_type(name))
        .collect::<Result<Vec<_>, _>>()?;
    registry.instantiate(ty, &arguments)
}

fn print_type_info(registry: &TypeRegistry, ty: TypeDescription) {
    println!("{}", ty);
    println!("  kind: {:?}", ty.kind());
    println!("  type code: {:?}", ty.type_code());
    println!("  simple: {}", registry.is_simple_type(ty));
    if let Some(def) = ty.generic_type_definition() {
        println!(
            "  generic: definition {} ({} parameters)",
            def,
            ty.generic_arity()
        );
    }

    println!("\nHierarchy:");
    for (depth, ancestor) in ty.ancestors().enumerate() {
        println!("  {}{}", "  ".repeat(depth), ancestor);
    }

    println!("\nInterfaces:");
    for iface in ty.interfaces() {
        let generic_of = iface
            .generic_type_definition()
            .map(|def| format!(" (generic of {})", def))
            .unwrap_or_default();
        println!("  - {}{}", iface, generic_of);
    }

    println!("\nProperties:");
    for prop in ty.properties() {
        let collection = registry.is_collection_property(prop).unwrap_or(false);
        println!("  - {:?} (collection: {})", prop, collection);
    }

    println!("\nMethods:");
    let flags = BindingFlags::PUBLIC
        | BindingFlags::NON_PUBLIC
        | BindingFlags::INSTANCE
        | BindingFlags::STATIC;
    let methods = registry.get_methods(ty, flags);
    if methods.is_empty() {
        println!("  (none)");
    }
    for method in methods {
        let body = match method.body() {
            Some(body) => format!("{:?}", body),
            None => "no body".to_string(),
        };
        println!("  - {} [{}]", method, body);
        for line in describe_parameters(method) {
            println!("      {}", line);
        }
    }

    if let Some(base) = ty.base_type() {
        println!("\nInterfaces introduced over {}:", base);
        for iface in introduced_interfaces(ty) {
            println!("  - {}", iface);
        }
    }
}

/// Interfaces `ty` implements that its base type does not.
fn introduced_interfaces(ty: TypeDescription) -> Vec<TypeDescription> {
    let inherited = ty.base_type().map(|b| b.interfaces()).unwrap_or_default();
    ty.interfaces()
        .into_iter()
        .filter(|iface| !inherited.contains(iface))
        .collect()
}

fn describe_parameters(method: MethodDescription) -> Vec<String> {
    method
        .parameters()
        .iter()
        .map(|p| match &p.default {
            Some(default) => format!("{}: {} = {:?}", p.name, p.parameter_type, default),
            None => format!("{}: {}", p.name, p.parameter_type),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotnet_type_ext::{MethodBuilder, TypeBuilder, TypeSignature, Value};

    #[test]
    fn introduced_interfaces_skip_inherited_ones() {
        let registry = TypeRegistry::new();
        let core = *registry.core();
        let ishape = registry.define(TypeBuilder::interface("Tests", "IShape")).unwrap();
        let shape = registry
            .define(TypeBuilder::class("Tests", "Shape").implements(ishape))
            .unwrap();
        let circle = registry
            .define(
                TypeBuilder::class("Tests", "Circle")
                    .extends(shape)
                    .implements(core.icomparable),
            )
            .unwrap();

        assert_eq!(introduced_interfaces(circle), vec![core.icomparable]);
        assert_eq!(introduced_interfaces(shape), vec![ishape]);
    }

    #[test]
    fn parameters_show_defaults() {
        let registry = TypeRegistry::new();
        let core = *registry.core();
        let host = registry.define(TypeBuilder::class("Tests", "Host")).unwrap();
        let method = registry.define_method(
            host,
            MethodBuilder::new("Run")
                .parameter("count", core.int32)
                .optional_parameter(
                    "flag",
                    TypeSignature::generic(core.nullable, [core.boolean]),
                    Value::Null,
                ),
        );

        assert_eq!(
            describe_parameters(method),
            vec![
                "count: System.Int32".to_string(),
                "flag: System.Nullable`1<System.Boolean> = Null".to_string(),
            ]
        );
    }
}
