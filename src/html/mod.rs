//! HTML serialization of a UI tree.

use std::borrow::Cow;

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use crate::element::{HostElement, Primitive, UiValue};
use crate::error::RenderError;
use crate::resolve::resolve_once;

/// Renders `node` to an HTML string, invoking components as they are reached.
///
/// Siblings render concurrently and are concatenated in tree order. Any fault
/// aborts the whole render; no partial output is returned.
pub fn to_html(node: UiValue) -> BoxFuture<'static, Result<String, RenderError>> {
    render_node(node).boxed()
}

async fn render_node(node: UiValue) -> Result<String, RenderError> {
    match node {
        UiValue::Primitive(value) => Ok(value
            .as_text()
            .map(|text| escape_html(&text).into_owned())
            .unwrap_or_default()),
        UiValue::Sequence(items) => {
            let parts = try_join_all(items.into_iter().map(to_html)).await?;
            Ok(parts.concat())
        }
        UiValue::Host(element) => render_host(element).await,
        UiValue::Component(_) => {
            let rendered = resolve_once(node).await?;
            to_html(rendered).await
        }
        UiValue::Record(_) => Err(RenderError::unsupported("record")),
    }
}

async fn render_host(element: HostElement) -> Result<String, RenderError> {
    let (tag, attributes, children) = element.into_parts();

    let mut html = format!("<{tag}");
    for (name, value) in &attributes {
        match value {
            UiValue::Primitive(Primitive::Null | Primitive::Bool(false)) => {}
            UiValue::Primitive(Primitive::Bool(true)) => {
                html.push_str(&format!(" {name}=\"\""));
            }
            UiValue::Primitive(value) => {
                let text = value.as_text().unwrap_or_default();
                html.push_str(&format!(" {name}=\"{}\"", escape_html(&text)));
            }
            other => return Err(RenderError::unsupported(other.kind())),
        }
    }
    html.push('>');
    html.push_str(&to_html(children).await?);
    html.push_str(&format!("</{tag}>"));
    Ok(html)
}

/// Escapes text for use in HTML content and double-quoted attribute values.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{component_fn, el, CHILDREN};
    use std::time::Duration;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[tokio::test]
    async fn text_nodes_never_leak_markup() {
        for s in ["<script>", "a & b", "\"quoted\"", "it's", "<>&\"'"] {
            let html = to_html(UiValue::text(s)).await.unwrap();
            assert!(!html.contains(['<', '>', '"', '\'']), "{html}");
            assert_eq!(html.matches('&').count(), html.matches(';').count());
        }
    }

    #[tokio::test]
    async fn primitives_render_as_text_or_nothing() {
        assert_eq!(to_html(UiValue::number(2026)).await.unwrap(), "2026");
        assert_eq!(to_html(UiValue::bool(true)).await.unwrap(), "");
        assert_eq!(to_html(UiValue::null()).await.unwrap(), "");
        assert_eq!(to_html(UiValue::Sequence(Vec::new())).await.unwrap(), "");
    }

    #[tokio::test]
    async fn host_element_with_attributes() {
        let tree = el("a")
            .attr("href", "/?q=\"x\"&y")
            .attr("hidden", false)
            .attr("download", true)
            .children("Home");
        assert_eq!(
            to_html(tree.into()).await.unwrap(),
            "<a href=\"/?q=&quot;x&quot;&amp;y\" download=\"\">Home</a>"
        );
    }

    #[tokio::test]
    async fn void_tags_still_get_closing_tag() {
        let tree = el("nav").children(vec![UiValue::from(el("hr")), UiValue::from(el("input"))]);
        assert_eq!(
            to_html(tree.into()).await.unwrap(),
            "<nav><hr></hr><input></input></nav>"
        );
    }

    #[tokio::test]
    async fn sequence_order_survives_skewed_latency() {
        let items = (0..5u64).map(|i| {
            UiValue::from(component_fn(format!("Item{i}"), move |_| async move {
                tokio::time::sleep(Duration::from_millis((5 - i) * 15)).await;
                Ok::<_, RenderError>(UiValue::from(el("li").children(UiValue::number(i))))
            }))
        });
        let tree = el("ul").children(UiValue::sequence(items));
        assert_eq!(
            to_html(tree.into()).await.unwrap(),
            "<ul><li>0</li><li>1</li><li>2</li><li>3</li><li>4</li></ul>"
        );
    }

    #[tokio::test]
    async fn nested_components_render_their_host_output() {
        let footer = component_fn("Footer", |props| async move {
            let author = props.get("author").cloned().unwrap_or_default();
            Ok::<_, RenderError>(UiValue::from(
                el("footer").children(vec![UiValue::text("(c) "), author]),
            ))
        })
        .prop("author", "Kai <Phan>");
        let layout = component_fn("Layout", move |_| {
            let footer = footer.clone();
            async move { Ok::<_, RenderError>(UiValue::from(footer)) }
        });

        assert_eq!(
            to_html(layout.into()).await.unwrap(),
            "<footer>(c) Kai &lt;Phan&gt;</footer>"
        );
    }

    #[tokio::test]
    async fn records_are_unsupported_nodes() {
        let forged = UiValue::record([
            ("type".to_string(), UiValue::text("div")),
            (CHILDREN.to_string(), UiValue::text("x")),
        ]);
        let err = to_html(el("main").children(forged).into()).await.unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedNode { kind: "record" }));
    }

    #[tokio::test]
    async fn non_primitive_attribute_is_unsupported() {
        let tree = el("div").attr("data-x", vec![UiValue::text("a")]);
        let err = to_html(tree.into()).await.unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedNode { kind: "sequence" }));
    }

    #[tokio::test]
    async fn component_fault_aborts_render() {
        let failing = component_fn("Broken", |_| async {
            Err::<UiValue, _>(RenderError::unsupported("record"))
        });
        let tree = el("main").children(vec![UiValue::text("ok"), failing.into()]);
        assert!(to_html(tree.into()).await.is_err());
    }
}
