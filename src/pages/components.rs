use std::sync::Arc;

use async_trait::async_trait;

use super::Site;
use crate::element::{el, Component, ComponentElement, Props, UiValue, CHILDREN};
use crate::error::RenderError;

fn required_str(props: &Props, component: &str, prop: &str) -> Result<String, RenderError> {
    props
        .get(prop)
        .and_then(UiValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| RenderError::MissingProp {
            component: component.to_string(),
            prop: prop.to_string(),
        })
}

/// Picks the page for the `path` prop and wraps it in the layout.
pub struct RouterPage {
    site: Arc<Site>,
}

impl RouterPage {
    pub fn new(site: Arc<Site>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl Component for RouterPage {
    fn name(&self) -> &str {
        "Router"
    }

    async fn render(&self, props: Props) -> Result<UiValue, RenderError> {
        let path = required_str(&props, self.name(), "path")?;
        let page = match path.as_str() {
            "/" => ComponentElement::new(Arc::new(BlogIndex::new(self.site.clone()))),
            _ => {
                let slug = path.strip_prefix('/').unwrap_or(&path);
                ComponentElement::new(Arc::new(PostPage::new(self.site.clone()))).prop("slug", slug)
            }
        };

        Ok(ComponentElement::new(Arc::new(Layout::new(self.site.clone())))
            .prop(CHILDREN, page)
            .into())
    }
}

/// Document shell: head, navigation, main content and footer.
pub struct Layout {
    site: Arc<Site>,
}

impl Layout {
    pub fn new(site: Arc<Site>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl Component for Layout {
    fn name(&self) -> &str {
        "Layout"
    }

    async fn render(&self, mut props: Props) -> Result<UiValue, RenderError> {
        let children = props.shift_remove(CHILDREN).unwrap_or_default();

        let head = el("head").children(UiValue::from(el("title").children(self.site.title.as_str())));
        let nav = el("nav").children(vec![
            UiValue::from(el("a").attr("href", "/").children("Home")),
            el("hr").into(),
            el("input").into(),
            el("hr").into(),
        ]);
        let footer = ComponentElement::new(Arc::new(Footer))
            .prop("author", self.site.author.as_str())
            .prop("year", self.site.year);
        let body = el("body").children(vec![
            UiValue::from(nav),
            el("main").children(children).into(),
            footer.into(),
        ]);

        Ok(el("html").children(vec![UiValue::from(head), body.into()]).into())
    }
}

/// Copyright line.
pub struct Footer;

#[async_trait]
impl Component for Footer {
    fn name(&self) -> &str {
        "Footer"
    }

    async fn render(&self, props: Props) -> Result<UiValue, RenderError> {
        let author = required_str(&props, self.name(), "author")?;
        let year = props.get("year").cloned().unwrap_or_default();

        let line = el("i").children(vec![
            UiValue::text("(c) "),
            UiValue::text(author),
            UiValue::text(" "),
            year,
        ]);
        Ok(el("footer")
            .children(vec![
                UiValue::from(el("hr")),
                el("p").children(UiValue::from(line)).into(),
            ])
            .into())
    }
}

/// Lists every stored post.
pub struct BlogIndex {
    site: Arc<Site>,
}

impl BlogIndex {
    pub fn new(site: Arc<Site>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl Component for BlogIndex {
    fn name(&self) -> &str {
        "BlogIndex"
    }

    async fn render(&self, _props: Props) -> Result<UiValue, RenderError> {
        let slugs = self.site.content.list().await?;
        let posts: Vec<UiValue> = slugs
            .into_iter()
            .map(|slug| {
                UiValue::from(
                    ComponentElement::new(Arc::new(PostPage::new(self.site.clone())))
                        .prop("slug", slug),
                )
            })
            .collect();

        Ok(el("section")
            .children(vec![
                UiValue::from(el("h1").children("Welcome to my blog")),
                el("div").children(posts).into(),
            ])
            .into())
    }
}

/// A single post, looked up by its `slug` prop.
pub struct PostPage {
    site: Arc<Site>,
}

impl PostPage {
    pub fn new(site: Arc<Site>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl Component for PostPage {
    fn name(&self) -> &str {
        "Post"
    }

    async fn render(&self, props: Props) -> Result<UiValue, RenderError> {
        let slug = required_str(&props, self.name(), "slug")?;
        let content = self.site.content.read(&slug).await?;

        let heading = el("h2").children(UiValue::from(
            el("a").attr("href", format!("/{slug}")).children(slug),
        ));
        Ok(el("section")
            .children(vec![
                UiValue::from(heading),
                el("article").children(content).into(),
            ])
            .into())
    }
}
