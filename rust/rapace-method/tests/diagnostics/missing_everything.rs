struct Definition;

rapace_method::assert_service_method!(Definition);

fn main() {}
