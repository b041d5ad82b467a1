//! Streaming modes.

use std::fmt;
use std::str::FromStr;

use facet::Facet;

/// RPC streaming mode, derived from which payload positions are streamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[repr(u8)]
pub enum StreamingMode {
    /// Unary RPC: single request, single response
    Unary,
    /// Client streaming: multiple requests, single response
    ClientStreaming,
    /// Server streaming: single request, multiple responses
    ServerStreaming,
    /// Bidirectional streaming: multiple requests and responses
    BidiStreaming,
}

impl StreamingMode {
    /// Every mode, in wire order.
    pub const ALL: [StreamingMode; 4] = [
        StreamingMode::Unary,
        StreamingMode::ClientStreaming,
        StreamingMode::ServerStreaming,
        StreamingMode::BidiStreaming,
    ];

    /// Classify a method from whether its request and response are streamed.
    ///
    /// Total over its inputs: every pair maps to exactly one mode.
    pub const fn classify(request_streamed: bool, response_streamed: bool) -> Self {
        match (request_streamed, response_streamed) {
            (false, false) => StreamingMode::Unary,
            (true, false) => StreamingMode::ClientStreaming,
            (false, true) => StreamingMode::ServerStreaming,
            (true, true) => StreamingMode::BidiStreaming,
        }
    }

    /// Whether the client sends a stream of requests.
    pub const fn request_streamed(self) -> bool {
        matches!(
            self,
            StreamingMode::ClientStreaming | StreamingMode::BidiStreaming
        )
    }

    /// Whether the server sends a stream of responses.
    pub const fn response_streamed(self) -> bool {
        matches!(
            self,
            StreamingMode::ServerStreaming | StreamingMode::BidiStreaming
        )
    }

    /// Convert from u32 wire value
    pub const fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(StreamingMode::Unary),
            1 => Some(StreamingMode::ClientStreaming),
            2 => Some(StreamingMode::ServerStreaming),
            3 => Some(StreamingMode::BidiStreaming),
            _ => None,
        }
    }

    /// Convert to u32 for wire transmission
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Kebab-case name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            StreamingMode::Unary => "unary",
            StreamingMode::ClientStreaming => "client-streaming",
            StreamingMode::ServerStreaming => "server-streaming",
            StreamingMode::BidiStreaming => "bidi-streaming",
        }
    }
}

impl TryFrom<u32> for StreamingMode {
    type Error = UnknownStreamingMode;

    fn try_from(val: u32) -> Result<Self, Self::Error> {
        StreamingMode::from_u32(val).ok_or(UnknownStreamingMode::Value(val))
    }
}

impl From<StreamingMode> for u32 {
    fn from(mode: StreamingMode) -> u32 {
        mode.as_u32()
    }
}

impl FromStr for StreamingMode {
    type Err = UnknownStreamingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownStreamingMode::Name(s.to_owned()))
    }
}

impl fmt::Display for StreamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when converting an unknown wire value or name into a [`StreamingMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownStreamingMode {
    /// Wire value outside `0..=3`
    Value(u32),
    /// Name that is not one of the kebab-case mode names
    Name(String),
}

impl fmt::Display for UnknownStreamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownStreamingMode::Value(val) => write!(f, "unknown streaming mode: {}", val),
            UnknownStreamingMode::Name(name) => write!(
                f,
                "unknown streaming mode {:?} (expected unary, client-streaming, server-streaming or bidi-streaming)",
                name
            ),
        }
    }
}

impl std::error::Error for UnknownStreamingMode {}
