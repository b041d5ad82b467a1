use rapace_method::HasOutgoingType;

struct Definition;

impl HasOutgoingType for Definition {
    type OutgoingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
