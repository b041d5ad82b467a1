use std::collections::HashMap;

use rapace_method::{MethodDescriptor, RequestType, ResponseType, StreamingMode};

#[rapace_method::service(package = "blobs")]
pub trait Blobs {
    async fn put(&self, digest: [u8; 32]) -> u64;
    async fn stat(&self, filter: Vec<Option<String>>) -> (u32, String);
    async fn tags(&self, tags: HashMap<String, u8>) -> rapace_method::Stream<[u8; 32]>;
}

fn same<A: 'static, B: 'static>() -> bool {
    std::any::TypeId::of::<A>() == std::any::TypeId::of::<B>()
}

fn main() {
    use blobs_methods::*;

    assert!(same::<RequestType<Put>, [u8; 32]>());
    assert!(same::<ResponseType<Stat>, (u32, String)>());
    assert!(same::<RequestType<Tags>, HashMap<String, u8>>());
    assert!(same::<ResponseType<Tags>, [u8; 32]>());

    assert_eq!(Put::STREAM_TYPE, StreamingMode::Unary);
    assert_eq!(Tags::STREAM_TYPE, StreamingMode::ServerStreaming);
}
