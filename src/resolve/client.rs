use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use super::resolve_once;
use crate::element::{HostElement, Props, UiValue};
use crate::error::RenderError;

/// Resolves every component in `node`, producing a tree of primitives,
/// sequences, host elements and records only.
///
/// Components run here, on the producing side, so the result is safe to hand
/// to [`crate::codec::encode`]. Sibling values are resolved concurrently but
/// keep their original positions.
pub fn resolve_for_transport(node: UiValue) -> BoxFuture<'static, Result<UiValue, RenderError>> {
    resolve_node(node).boxed()
}

async fn resolve_node(node: UiValue) -> Result<UiValue, RenderError> {
    match node {
        UiValue::Primitive(_) => Ok(node),
        UiValue::Sequence(items) => {
            let items = try_join_all(items.into_iter().map(resolve_for_transport)).await?;
            Ok(UiValue::Sequence(items))
        }
        UiValue::Host(element) => {
            let (tag, attributes, children) = element.into_parts();
            let (attributes, children) = futures::try_join!(
                resolve_props(attributes),
                resolve_for_transport(children)
            )?;
            Ok(HostElement::from_parts(tag, attributes, children).into())
        }
        UiValue::Component(_) => {
            let rendered = resolve_once(node).await?;
            resolve_for_transport(rendered).await
        }
        UiValue::Record(entries) => Ok(UiValue::Record(resolve_props(entries).await?)),
    }
}

async fn resolve_props(props: Props) -> Result<Props, RenderError> {
    let entries = try_join_all(props.into_iter().map(|(name, value)| async move {
        resolve_for_transport(value).await.map(|value| (name, value))
    }))
    .await?;
    Ok(entries.into_iter().collect())
}
