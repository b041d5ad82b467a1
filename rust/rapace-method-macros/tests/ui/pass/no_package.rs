use rapace_method::{HasMethodName, MethodDescriptor, StreamingMode};

#[rapace_method::service]
pub(crate) trait Echo {
    async fn echo(&self, text: String) -> String;
    async fn reverse_bytes(&self, bytes: Vec<u8>) -> Vec<u8>;
}

fn main() {
    assert_eq!(echo_methods::Echo::METHOD_NAME, "/Echo/Echo");
    assert_eq!(
        echo_methods::ReverseBytes::method_name(),
        "/Echo/ReverseBytes"
    );
    assert_eq!(
        echo_methods::METHOD_NAMES,
        ["/Echo/Echo", "/Echo/ReverseBytes"]
    );
    assert_eq!(echo_methods::Echo::STREAM_TYPE, StreamingMode::Unary);
}
