//! The stream wrapper tag and payload unwrapping.

use std::convert::Infallible;
use std::marker::PhantomData;

use crate::Message;

/// Marks a payload position as a sequence of `M` messages instead of one.
///
/// `Stream` is a type-level tag. It cannot be constructed: it only exists in
/// `IncomingType`/`OutgoingType` declarations, where [`Payload`] recognizes it.
/// Streams do not nest: a `Stream<M>` is never a [`Message`], so the
/// descriptor rejects `Stream<Stream<M>>`.
pub struct Stream<M> {
    _never: Infallible,
    _message: PhantomData<fn() -> M>,
}

/// Unwraps a declared payload type into its message type and streaming flag.
///
/// | declared        | `Message` | `STREAMED` |
/// |-----------------|-----------|------------|
/// | `M`             | `M`       | `false`    |
/// | `Stream<M>`     | `M`       | `true`     |
///
/// The tag is removed at most once. Whether the result is a [`Message`] is
/// checked separately, so a failure names the unwrapped type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an RPC payload",
    label = "expected a message or `Stream<message>`",
    note = "payloads are `#[derive(Facet)]` types, optionally wrapped once in `Stream<_>`"
)]
pub trait Payload {
    /// The payload with any stream tag removed.
    type Message;

    /// Whether the declared payload carried the stream tag.
    const STREAMED: bool;
}

impl<M: Message> Payload for M {
    type Message = M;
    const STREAMED: bool = false;
}

impl<M> Payload for Stream<M> {
    type Message = M;
    const STREAMED: bool = true;
}

/// The message type carried by payload `P`.
pub type Unwrapped<P> = <P as Payload>::Message;

/// Returns whether payload `P` carries the stream tag.
pub const fn is_streamed<P: Payload>() -> bool {
    P::STREAMED
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    #[derive(facet::Facet)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn unwrapped_id<P: Payload>() -> TypeId
    where
        P::Message: 'static,
    {
        TypeId::of::<P::Message>()
    }

    #[test]
    fn plain_payload_is_unchanged() {
        assert_eq!(unwrapped_id::<Point>(), TypeId::of::<Point>());
        assert!(!is_streamed::<Point>());
        assert!(!is_streamed::<String>());
    }

    #[test]
    fn stream_payload_is_unwrapped_once() {
        assert_eq!(unwrapped_id::<Stream<Point>>(), TypeId::of::<Point>());
        assert!(is_streamed::<Stream<Point>>());
    }

    #[test]
    fn stream_tag_is_removed_once() {
        assert_eq!(
            unwrapped_id::<Stream<Stream<Point>>>(),
            TypeId::of::<Stream<Point>>()
        );
        assert!(!crate::is_message!(Unwrapped<Stream<Stream<Point>>>));
    }

    #[test]
    fn unwrapped_alias_names_the_message() {
        let p: Unwrapped<Stream<Point>> = Point { x: 1, y: 2 };
        assert_eq!((p.x, p.y), (1, 2));
    }
}
