use rapace_method::{HasIncomingType, HasOutgoingType};

struct Definition;

impl HasIncomingType for Definition {
    type IncomingType = String;
}

impl HasOutgoingType for Definition {
    type OutgoingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
