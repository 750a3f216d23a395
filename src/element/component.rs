//! Component seam: something that turns props into a new UI value.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::{ComponentElement, Props, UiValue};
use crate::error::RenderError;

/// A user-defined composite.
///
/// Rendering may suspend on I/O (content lookup) and may fail; a failure
/// aborts the whole walk it is part of.
#[async_trait]
pub trait Component: Send + Sync {
    /// Name used in logs and fault messages.
    fn name(&self) -> &str;

    /// Invoke the component with its props.
    async fn render(&self, props: Props) -> Result<UiValue, RenderError>;
}

/// Adapts an async closure into a [`Component`].
pub struct FnComponent<F> {
    name: String,
    f: F,
}

#[async_trait]
impl<F, Fut> Component for FnComponent<F>
where
    F: Fn(Props) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<UiValue, RenderError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&self, props: Props) -> Result<UiValue, RenderError> {
        (self.f)(props).await
    }
}

/// Builds a component element from a closure.
///
/// ```ignore
/// let greeting = component_fn("Greeting", |props| async move {
///     Ok(el("p").children(props.get("name").cloned().unwrap_or_default()).into())
/// });
/// ```
pub fn component_fn<F, Fut>(name: impl Into<String>, f: F) -> ComponentElement
where
    F: Fn(Props) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<UiValue, RenderError>> + Send + 'static,
{
    ComponentElement::new(Arc::new(FnComponent {
        name: name.into(),
        f,
    }))
}
