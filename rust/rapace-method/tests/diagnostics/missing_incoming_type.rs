use rapace_method::{HasMethodName, HasOutgoingType};

struct Definition;

impl HasMethodName for Definition {
    const METHOD_NAME: &'static str = "/pkg.Service/Definition";
}

impl HasOutgoingType for Definition {
    type OutgoingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
