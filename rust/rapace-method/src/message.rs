//! The message base representation.

use facet::Facet;

/// A single RPC message: the unit a request or response is made of.
///
/// Any type with a static [`Facet`] shape qualifies, which is what the
/// serialization layer needs to encode and decode it. `Stream<_>` is not a
/// message, so a stream can never be nested inside another stream.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an RPC message",
    label = "payload types must derive `Facet`",
    note = "request and response payloads are `#[derive(Facet)]` types; wrap one in `Stream<_>` to make that side streaming"
)]
pub trait Message: Facet<'static> {}

impl<T> Message for T where T: Facet<'static> {}
