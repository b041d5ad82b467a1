//! Definitions that must not build.
//!
//! Which diagnostics each contract violation produces is covered by
//! `tests/diagnostics.rs`.
//!
//! Streams do not nest:
//!
//! ```compile_fail,E0277
//! use rapace_method::{HasIncomingType, HasMethodName, HasOutgoingType, Stream};
//!
//! struct Nested;
//! impl HasMethodName for Nested {
//!     const METHOD_NAME: &'static str = "/pkg.Service/Nested";
//! }
//! impl HasIncomingType for Nested {
//!     type IncomingType = Stream<Stream<String>>;
//! }
//! impl HasOutgoingType for Nested {
//!     type OutgoingType = String;
//! }
//!
//! rapace_method::assert_service_method!(Nested);
//! ```
//!
//! Nor does a nested stream yield a descriptor:
//!
//! ```compile_fail,E0277
//! use rapace_method::{HasIncomingType, HasMethodName, HasOutgoingType, MethodDescriptor, Stream};
//!
//! struct Nested;
//! impl HasMethodName for Nested {
//!     const METHOD_NAME: &'static str = "/pkg.Service/Nested";
//! }
//! impl HasIncomingType for Nested {
//!     type IncomingType = String;
//! }
//! impl HasOutgoingType for Nested {
//!     type OutgoingType = Stream<Stream<String>>;
//! }
//!
//! let _ = <Nested as MethodDescriptor>::STREAM_TYPE;
//! ```
//!
//! The descriptor of an incomplete definition cannot be named:
//!
//! ```compile_fail
//! use rapace_method::{HasMethodName, MethodDescriptor};
//!
//! struct NameOnly;
//! impl HasMethodName for NameOnly {
//!     const METHOD_NAME: &'static str = "/pkg.Service/NameOnly";
//! }
//!
//! let _ = <NameOnly as MethodDescriptor>::STREAM_TYPE;
//! ```
//!
//! The stream tag cannot be constructed:
//!
//! ```compile_fail
//! let _ = rapace_method::Stream::<String> {
//!     _never: unreachable!(),
//!     _message: std::marker::PhantomData,
//! };
//! ```
