use rapace_method::HasIncomingType;

struct Definition;

impl HasIncomingType for Definition {
    type IncomingType = String;
}

rapace_method::assert_service_method!(Definition);

fn main() {}
