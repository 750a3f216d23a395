//! Faults raised while resolving, serializing or encoding a UI tree.

use thiserror::Error;

use crate::codec::CodecError;
use crate::content::ContentError;

/// Errors that abort a render walk.
///
/// A walk has exactly three outcomes: a tree, [`RenderError::NotFound`], or
/// any other variant, which the service layer treats as a server fault.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Content behind the requested path does not exist
    #[error("Not found ({status}): {source}")]
    NotFound {
        status: u16,
        #[source]
        source: ContentError,
    },

    /// A node shape the consumer cannot handle
    #[error("Unsupported node: {kind}")]
    UnsupportedNode { kind: &'static str },

    /// A component was invoked without a prop it needs
    #[error("Component '{component}' is missing prop '{prop}'")]
    MissingProp { component: String, prop: String },

    /// Content store failed for a reason other than absence
    #[error("Content error: {0}")]
    Content(ContentError),

    /// Wire encoding or decoding failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl From<ContentError> for RenderError {
    fn from(err: ContentError) -> Self {
        if err.is_not_found() {
            RenderError::NotFound {
                status: 404,
                source: err,
            }
        } else {
            RenderError::Content(err)
        }
    }
}

impl RenderError {
    pub fn unsupported(kind: &'static str) -> Self {
        RenderError::UnsupportedNode { kind }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::NotFound { .. })
    }

    /// HTTP status the service boundary answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            RenderError::NotFound { status, .. } => *status,
            RenderError::UnsupportedNode { .. }
            | RenderError::MissingProp { .. }
            | RenderError::Content(_)
            | RenderError::Codec(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_content_maps_to_404() {
        let err = RenderError::from(ContentError::NotFound {
            slug: "missing".to_string(),
            source: None,
        });
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn unsupported_node_is_a_server_fault() {
        let err = RenderError::unsupported("record");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Unsupported node: record");
    }
}
