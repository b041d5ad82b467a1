//! Contract violations.
//!
//! The compiler is what enforces the method contract; these types describe the
//! same violations as values, for tooling that probes definitions instead of
//! requiring them.

use std::fmt;

/// One of the three members a method definition must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `const METHOD_NAME: &'static str` ([`HasMethodName`](crate::HasMethodName))
    MethodName,
    /// `type IncomingType` ([`HasIncomingType`](crate::HasIncomingType))
    IncomingType,
    /// `type OutgoingType` ([`HasOutgoingType`](crate::HasOutgoingType))
    OutgoingType,
}

impl Capability {
    /// All capabilities, in the order the contract lists them.
    pub const ALL: [Capability; 3] = [
        Capability::MethodName,
        Capability::IncomingType,
        Capability::OutgoingType,
    ];

    /// Name of the member, as written in the definition.
    pub const fn member(self) -> &'static str {
        match self {
            Capability::MethodName => "METHOD_NAME",
            Capability::IncomingType => "IncomingType",
            Capability::OutgoingType => "OutgoingType",
        }
    }

    /// Trait that carries the member.
    pub const fn trait_name(self) -> &'static str {
        match self {
            Capability::MethodName => "HasMethodName",
            Capability::IncomingType => "HasIncomingType",
            Capability::OutgoingType => "HasOutgoingType",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` ({})", self.member(), self.trait_name())
    }
}

/// Which payload position a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadSide {
    /// The unwrapped `IncomingType`
    Request,
    /// The unwrapped `OutgoingType`
    Response,
}

impl fmt::Display for PayloadSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadSide::Request => write!(f, "request"),
            PayloadSide::Response => write!(f, "response"),
        }
    }
}

/// A violated precondition of the method contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The definition lacks a required member
    MissingCapability {
        /// Name of the definition type
        definition: &'static str,
        /// The missing member
        capability: Capability,
    },
    /// An unwrapped payload is not a message
    InvalidBaseType {
        /// Request or response
        side: PayloadSide,
        /// Name of the offending type
        type_name: &'static str,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::MissingCapability {
                definition,
                capability,
            } => write!(
                f,
                "RPC service method `{}` must provide {}",
                definition, capability
            ),
            ContractError::InvalidBaseType { side, type_name } => write!(
                f,
                "RPC {} type `{}` is not a message (it must implement `Facet`)",
                side, type_name
            ),
        }
    }
}

impl std::error::Error for ContractError {}
