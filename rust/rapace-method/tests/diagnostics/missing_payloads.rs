use rapace_method::HasMethodName;

struct Definition;

impl HasMethodName for Definition {
    const METHOD_NAME: &'static str = "/pkg.Service/Definition";
}

rapace_method::assert_service_method!(Definition);

fn main() {}
