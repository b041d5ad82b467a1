use rapace_method::{HasIncomingType, HasMethodName, HasOutgoingType};

struct Opaque;

struct Definition;

impl HasMethodName for Definition {
    const METHOD_NAME: &'static str = "/pkg.Service/Definition";
}

impl HasIncomingType for Definition {
    type IncomingType = Opaque;
}

impl HasOutgoingType for Definition {
    type OutgoingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
