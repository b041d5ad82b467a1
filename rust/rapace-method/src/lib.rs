#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

// Lets `::rapace_method::` paths emitted by `#[service]` resolve inside this crate too.
extern crate self as rapace_method;

#[cfg(doctest)]
mod build_failures;
mod descriptor;
mod error;
mod message;
mod mode;
mod path;
pub mod probe;
mod stream;

pub use descriptor::*;
pub use error::*;
pub use message::*;
pub use mode::*;
pub use path::*;
pub use probe::{CapabilityReport, HasIncomingType, HasMethodName, HasOutgoingType};
pub use stream::*;

// Re-export the service macro
#[cfg(feature = "macros")]
pub use rapace_method_macros::service;

// Re-export facet so definitions can name the message base without another import
pub use facet;

#[doc(hidden)]
pub extern crate tracing;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use rapace_method::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        HasIncomingType, HasMethodName, HasOutgoingType, Message, MethodDescriptor, MethodInfo,
        Payload, ServiceMethod, Stream, StreamingMode,
    };

    #[cfg(feature = "macros")]
    pub use crate::service;

    pub use facet::Facet;
}
