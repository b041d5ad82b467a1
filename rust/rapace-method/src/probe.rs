//! Capability probes.
//!
//! A method definition is any type that implements the three capability
//! traits below. Each is checked as its own bound, so the compiler reports
//! every missing one separately.
//!
//! The `has_*!` and [`probe!`](crate::probe!) macros evaluate the same
//! capabilities to a `bool` instead of failing the build. They resolve through
//! autoref method lookup on [`Probe`]: the `true` impl applies by value when
//! the bound holds, otherwise lookup falls through to the `false` impl on
//! `&Probe<T>`. The type must be concrete at the call site.

use std::marker::PhantomData;

use crate::{Capability, ContractError};

/// Provides the fully qualified name of the RPC method.
///
/// The name has the structure `/<package>.<Service>/<Method>`, where the
/// service name is the fully qualified name of the service and the method
/// name is the method as declared in the service definition.
#[diagnostic::on_unimplemented(
    message = "RPC service method `{Self}` must provide a method name",
    label = "missing `METHOD_NAME`",
    note = "implement `HasMethodName` with `const METHOD_NAME: &'static str = \"/<package>.<Service>/<Method>\";`"
)]
pub trait HasMethodName {
    /// Fully qualified method name, e.g. `/routeguide.RouteGuide/GetFeature`.
    const METHOD_NAME: &'static str;
}

/// Declares the payload passed to the method.
///
/// May be a message or `Stream<message>` for a client-streaming request.
#[diagnostic::on_unimplemented(
    message = "RPC service method `{Self}` must provide an `IncomingType`",
    label = "missing `IncomingType`",
    note = "implement `HasIncomingType` with `type IncomingType = RequestMessage;` (or `Stream<RequestMessage>`)"
)]
pub trait HasIncomingType {
    /// Request payload, optionally wrapped in [`Stream`](crate::Stream).
    type IncomingType;
}

/// Declares the payload returned from the method.
///
/// May be a message or `Stream<message>` for a server-streaming response.
#[diagnostic::on_unimplemented(
    message = "RPC service method `{Self}` must provide an `OutgoingType`",
    label = "missing `OutgoingType`",
    note = "implement `HasOutgoingType` with `type OutgoingType = ResponseMessage;` (or `Stream<ResponseMessage>`)"
)]
pub trait HasOutgoingType {
    /// Response payload, optionally wrapped in [`Stream`](crate::Stream).
    type OutgoingType;
}

/// Zero-sized receiver for the autoref probes.
#[doc(hidden)]
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    #[doc(hidden)]
    pub const fn new() -> Self {
        Probe(PhantomData)
    }
}

#[doc(hidden)]
pub trait ProvidesMethodName {
    fn has_method_name(&self) -> bool {
        true
    }
}
impl<T: HasMethodName> ProvidesMethodName for Probe<T> {}

#[doc(hidden)]
pub trait LacksMethodName {
    fn has_method_name(&self) -> bool {
        false
    }
}
impl<T> LacksMethodName for &Probe<T> {}

#[doc(hidden)]
pub trait ProvidesIncomingType {
    fn has_incoming_type(&self) -> bool {
        true
    }
}
impl<T: HasIncomingType> ProvidesIncomingType for Probe<T> {}

#[doc(hidden)]
pub trait LacksIncomingType {
    fn has_incoming_type(&self) -> bool {
        false
    }
}
impl<T> LacksIncomingType for &Probe<T> {}

#[doc(hidden)]
pub trait ProvidesOutgoingType {
    fn has_outgoing_type(&self) -> bool {
        true
    }
}
impl<T: HasOutgoingType> ProvidesOutgoingType for Probe<T> {}

#[doc(hidden)]
pub trait LacksOutgoingType {
    fn has_outgoing_type(&self) -> bool {
        false
    }
}
impl<T> LacksOutgoingType for &Probe<T> {}

#[doc(hidden)]
pub trait IsMessage {
    fn is_message(&self) -> bool {
        true
    }
}
impl<T: crate::Message> IsMessage for Probe<T> {}

#[doc(hidden)]
pub trait NotMessage {
    fn is_message(&self) -> bool {
        false
    }
}
impl<T> NotMessage for &Probe<T> {}

/// Evaluates to `true` if the type implements [`HasMethodName`].
#[macro_export]
macro_rules! has_method_name {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{LacksMethodName as _, ProvidesMethodName as _};
        (&$crate::probe::Probe::<$ty>::new()).has_method_name()
    }};
}

/// Evaluates to `true` if the type implements [`HasIncomingType`].
#[macro_export]
macro_rules! has_incoming_type {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{LacksIncomingType as _, ProvidesIncomingType as _};
        (&$crate::probe::Probe::<$ty>::new()).has_incoming_type()
    }};
}

/// Evaluates to `true` if the type implements [`HasOutgoingType`].
#[macro_export]
macro_rules! has_outgoing_type {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{LacksOutgoingType as _, ProvidesOutgoingType as _};
        (&$crate::probe::Probe::<$ty>::new()).has_outgoing_type()
    }};
}

/// Evaluates to `true` if the type is a [`Message`](crate::Message).
///
/// A `Stream<M>` is never a message; probe the unwrapped type instead.
#[macro_export]
macro_rules! is_message {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{IsMessage as _, NotMessage as _};
        (&$crate::probe::Probe::<$ty>::new()).is_message()
    }};
}

/// Probes all three capabilities of a type into a [`CapabilityReport`].
///
/// ```
/// struct Incomplete;
///
/// impl rapace_method::HasIncomingType for Incomplete {
///     type IncomingType = String;
/// }
///
/// let report = rapace_method::probe!(Incomplete);
/// assert!(!report.is_complete());
/// assert_eq!(report.violations().len(), 2);
/// ```
#[macro_export]
macro_rules! probe {
    ($ty:ty) => {
        $crate::probe::CapabilityReport::new(
            ::std::any::type_name::<$ty>(),
            $crate::has_method_name!($ty),
            $crate::has_incoming_type!($ty),
            $crate::has_outgoing_type!($ty),
        )
    };
}

/// Checks that an unwrapped payload type is a message, as a `Result`.
///
/// The side is `Request` or `Response`.
///
/// ```
/// use rapace_method::{ContractError, PayloadSide};
///
/// struct Opaque;
///
/// assert!(rapace_method::check_payload!(Request, String).is_ok());
/// match rapace_method::check_payload!(Response, Opaque) {
///     Err(ContractError::InvalidBaseType { side, type_name }) => {
///         assert_eq!(side, PayloadSide::Response);
///         assert!(type_name.ends_with("Opaque"));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[macro_export]
macro_rules! check_payload {
    ($side:ident, $ty:ty) => {
        if $crate::is_message!($ty) {
            ::std::result::Result::Ok(())
        } else {
            ::std::result::Result::Err($crate::ContractError::InvalidBaseType {
                side: $crate::PayloadSide::$side,
                type_name: ::std::any::type_name::<$ty>(),
            })
        }
    };
}

/// Which capabilities a definition type provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    definition: &'static str,
    method_name: bool,
    incoming_type: bool,
    outgoing_type: bool,
}

impl CapabilityReport {
    #[doc(hidden)]
    pub const fn new(
        definition: &'static str,
        method_name: bool,
        incoming_type: bool,
        outgoing_type: bool,
    ) -> Self {
        CapabilityReport {
            definition,
            method_name,
            incoming_type,
            outgoing_type,
        }
    }

    /// Name of the probed type.
    pub fn definition(&self) -> &'static str {
        self.definition
    }

    /// Whether the probed type provides `capability`.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::MethodName => self.method_name,
            Capability::IncomingType => self.incoming_type,
            Capability::OutgoingType => self.outgoing_type,
        }
    }

    /// Whether the probed type provides all three capabilities.
    pub fn is_complete(&self) -> bool {
        self.method_name && self.incoming_type && self.outgoing_type
    }

    /// Capabilities the probed type lacks, in contract order.
    pub fn missing(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| !self.has(*c))
    }

    /// One [`ContractError::MissingCapability`] per missing capability.
    pub fn violations(&self) -> Vec<ContractError> {
        self.missing()
            .map(|capability| {
                tracing::debug!(
                    definition = self.definition,
                    member = capability.member(),
                    "RPC service method is missing a capability"
                );
                ContractError::MissingCapability {
                    definition: self.definition,
                    capability,
                }
            })
            .collect()
    }
}
