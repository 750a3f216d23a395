//! Component resolution.
//!
//! [`resolve_once`] performs a single component invocation. Consumers walk
//! the rest of the tree themselves because each applies its own policy to
//! host elements, sequences and primitives: [`crate::html`] renders them,
//! [`resolve_for_transport`] rebuilds them without components.

mod client;

pub use client::resolve_for_transport;

use crate::element::UiValue;
use crate::error::RenderError;

/// Invokes `node` if it is a component element, otherwise returns it as is.
///
/// The result may itself be a component element; it is not resolved further.
pub async fn resolve_once(node: UiValue) -> Result<UiValue, RenderError> {
    match node {
        UiValue::Component(element) => {
            let (component, props) = element.into_parts();
            tracing::debug!(component = component.name(), "Invoking component");
            component.render(props).await
        }
        other => Ok(other),
    }
}
