use rapace_method::{HasIncomingType, HasMethodName};

struct Definition;

impl HasMethodName for Definition {
    const METHOD_NAME: &'static str = "/pkg.Service/Definition";
}

impl HasIncomingType for Definition {
    type IncomingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
