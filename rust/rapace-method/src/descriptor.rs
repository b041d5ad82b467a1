//! Method descriptors: what the dispatch layer needs to know about one method.
//!
//! A descriptor is assembled from a definition type entirely by the compiler:
//! the three capabilities are required as separate bounds, both payloads are
//! unwrapped through [`Payload`] and must be [`Message`]s, and the streaming
//! mode is classified from the two `STREAMED` flags.

use std::fmt;

use crate::probe::{HasIncomingType, HasMethodName, HasOutgoingType};
use crate::{Message, MethodPath, MethodPathError, Payload, StreamingMode, Unwrapped};

/// A type that provides all three method capabilities.
///
/// Implemented for every such type; there is nothing to implement by hand.
pub trait ServiceMethod: HasMethodName + HasIncomingType + HasOutgoingType {}

impl<T> ServiceMethod for T where T: HasMethodName + HasIncomingType + HasOutgoingType {}

/// A declared `IncomingType`: a type [`Payload`] can unwrap.
#[diagnostic::on_unimplemented(
    message = "RPC request type `{Self}` is not a message",
    label = "invalid `IncomingType`",
    note = "the request must be a `#[derive(Facet)]` type, optionally wrapped once in `Stream<_>`"
)]
pub trait RequestPayload: Payload {}

impl<P: Payload> RequestPayload for P {}

/// A declared `OutgoingType`: a type [`Payload`] can unwrap.
#[diagnostic::on_unimplemented(
    message = "RPC response type `{Self}` is not a message",
    label = "invalid `OutgoingType`",
    note = "the response must be a `#[derive(Facet)]` type, optionally wrapped once in `Stream<_>`"
)]
pub trait ResponsePayload: Payload {}

impl<P: Payload> ResponsePayload for P {}

/// The unwrapped request of a definition, required to be a message.
#[diagnostic::on_unimplemented(
    message = "RPC request type `{Self}` is not a message",
    label = "invalid `IncomingType`",
    note = "a streamed request carries `#[derive(Facet)]` messages; streams do not nest"
)]
pub trait RequestMessage: Message {}

impl<M: Message> RequestMessage for M {}

/// The unwrapped response of a definition, required to be a message.
#[diagnostic::on_unimplemented(
    message = "RPC response type `{Self}` is not a message",
    label = "invalid `OutgoingType`",
    note = "a streamed response carries `#[derive(Facet)]` messages; streams do not nest"
)]
pub trait ResponseMessage: Message {}

impl<M: Message> ResponseMessage for M {}

/// The normalized view of a method definition.
///
/// `Request` and `Response` are always the unwrapped messages, never a
/// `Stream`. `STREAM_TYPE` depends only on which positions were wrapped.
pub trait MethodDescriptor: ServiceMethod {
    /// Message passed to the method.
    type Request: Message;

    /// Message returned from the method.
    type Response: Message;

    /// Whether `IncomingType` was declared as `Stream<_>`.
    const REQUEST_STREAMED: bool;

    /// Whether `OutgoingType` was declared as `Stream<_>`.
    const RESPONSE_STREAMED: bool;

    /// Streaming mode of the method.
    const STREAM_TYPE: StreamingMode;

    /// Fully qualified name of the method, `/<package>.<Service>/<Method>`
    /// by convention. The name is taken as declared; [`MethodPath::parse`]
    /// checks the structure for tooling.
    fn method_name() -> &'static str;

    /// Type-erased snapshot of this descriptor.
    fn info() -> MethodInfo
    where
        Self: Sized,
    {
        MethodInfo::of::<Self>()
    }
}

impl<M> MethodDescriptor for M
where
    M: ServiceMethod,
    M::IncomingType: RequestPayload,
    M::OutgoingType: ResponsePayload,
    Unwrapped<M::IncomingType>: RequestMessage,
    Unwrapped<M::OutgoingType>: ResponseMessage,
{
    type Request = Unwrapped<M::IncomingType>;
    type Response = Unwrapped<M::OutgoingType>;

    const REQUEST_STREAMED: bool = <M::IncomingType as Payload>::STREAMED;
    const RESPONSE_STREAMED: bool = <M::OutgoingType as Payload>::STREAMED;
    const STREAM_TYPE: StreamingMode =
        StreamingMode::classify(Self::REQUEST_STREAMED, Self::RESPONSE_STREAMED);

    fn method_name() -> &'static str {
        M::METHOD_NAME
    }
}

/// Unwrapped request message of a method definition.
pub type RequestType<M> = <M as MethodDescriptor>::Request;

/// Unwrapped response message of a method definition.
pub type ResponseType<M> = <M as MethodDescriptor>::Response;

/// Const entry point of [`assert_service_method!`](crate::assert_service_method).
///
/// Every capability and payload requirement is a separate bound, so each
/// violation is reported on its own.
#[doc(hidden)]
pub const fn assemble<T>()
where
    T: HasMethodName,
    T: HasIncomingType,
    T: HasOutgoingType,
    <T as HasIncomingType>::IncomingType: RequestPayload,
    <T as HasOutgoingType>::OutgoingType: ResponsePayload,
    Unwrapped<<T as HasIncomingType>::IncomingType>: RequestMessage,
    Unwrapped<<T as HasOutgoingType>::OutgoingType>: ResponseMessage,
{
}

/// Requires, at build time, that a type is a complete method definition.
///
/// Fails the build with one diagnostic per missing capability and one per
/// payload side that is not a message. Expands to an unnamed const item, so
/// it can be placed anywhere an item can.
///
/// ```
/// use rapace_method::{HasIncomingType, HasMethodName, HasOutgoingType, Stream};
///
/// struct Chat;
/// impl HasMethodName for Chat {
///     const METHOD_NAME: &'static str = "/chat.Chat/Talk";
/// }
/// impl HasIncomingType for Chat {
///     type IncomingType = Stream<String>;
/// }
/// impl HasOutgoingType for Chat {
///     type OutgoingType = Stream<String>;
/// }
///
/// rapace_method::assert_service_method!(Chat);
/// ```
///
/// A definition missing its payload declarations does not build:
///
/// ```compile_fail,E0277
/// use rapace_method::HasMethodName;
///
/// struct NameOnly;
/// impl HasMethodName for NameOnly {
///     const METHOD_NAME: &'static str = "/pkg.Service/NameOnly";
/// }
///
/// rapace_method::assert_service_method!(NameOnly);
/// ```
#[macro_export]
macro_rules! assert_service_method {
    ($ty:ty) => {
        const _: () = $crate::assemble::<$ty>();
    };
}

/// Type-erased, comparable snapshot of a [`MethodDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    /// Fully qualified method name
    pub method_name: &'static str,
    /// Name of the unwrapped request message
    pub request_type: &'static str,
    /// Name of the unwrapped response message
    pub response_type: &'static str,
    /// Streaming mode
    pub streaming_mode: StreamingMode,
}

impl MethodInfo {
    /// Snapshot the descriptor of `M`.
    pub fn of<M: MethodDescriptor>() -> Self {
        let info = MethodInfo {
            method_name: M::method_name(),
            request_type: std::any::type_name::<M::Request>(),
            response_type: std::any::type_name::<M::Response>(),
            streaming_mode: M::STREAM_TYPE,
        };
        tracing::debug!(
            method = info.method_name,
            request = info.request_type,
            response = info.response_type,
            mode = %info.streaming_mode,
            "assembled method descriptor"
        );
        info
    }

    /// Service and method segments of the name.
    pub fn path(&self) -> Result<MethodPath<'static>, MethodPathError> {
        MethodPath::parse(self.method_name)
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stream = |streamed: bool| if streamed { "stream " } else { "" };
        write!(
            f,
            "{} ({}{} -> {}{})",
            self.method_name,
            stream(self.streaming_mode.request_streamed()),
            self.request_type,
            stream(self.streaming_mode.response_streamed()),
            self.response_type,
        )
    }
}
