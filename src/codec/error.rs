//! Error types for the wire codec.

use thiserror::Error;

/// Errors that can occur while encoding or decoding the wire format.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Wire text is not valid JSON
    #[error("Malformed wire text: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The tree still contains a component; resolve it first
    #[error("Cannot encode unresolved component '{name}'")]
    UnresolvedComponent { name: String },

    /// The element sentinel appeared somewhere other than an element marker
    #[error("Element sentinel outside of an element marker")]
    StraySentinel,

    /// A certified object lacks a usable `type` or `props`
    #[error("Invalid element: {reason}")]
    InvalidElement { reason: String },
}
