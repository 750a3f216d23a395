//! The UI tree: values, host elements and component elements.
//!
//! Elements are certified by construction. A [`UiValue::Host`] or
//! [`UiValue::Component`] can only be produced through [`HostElement::new`]
//! and [`ComponentElement::new`], and the tree has no
//! `Deserialize` impl: decoded wire data becomes an element only when
//! [`crate::codec::decode`] sees the element sentinel.

mod component;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Number;

pub use component::{component_fn, Component, FnComponent};

/// Ordered name → value map used for props, attributes and plain records.
pub type Props = IndexMap<String, UiValue>;

/// Reserved prop carrying an element's children.
pub const CHILDREN: &str = "children";

/// Leaf values. Strings and numbers render as text, booleans and null as nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Primitive {
    /// Text rendering of the value, `None` for booleans and null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Primitive::String(s) => Some(s.clone()),
            Primitive::Number(n) => Some(n.to_string()),
            Primitive::Bool(_) | Primitive::Null => None,
        }
    }
}

/// A node of the UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiValue {
    Primitive(Primitive),
    Sequence(Vec<UiValue>),
    Host(HostElement),
    Component(ComponentElement),
    /// Plain data that is not an element (a props bag, an uncertified
    /// object read off the wire).
    Record(Props),
}

impl UiValue {
    pub fn null() -> Self {
        UiValue::Primitive(Primitive::Null)
    }

    pub fn text(s: impl Into<String>) -> Self {
        UiValue::Primitive(Primitive::String(s.into()))
    }

    pub fn number(n: impl Into<Number>) -> Self {
        UiValue::Primitive(Primitive::Number(n.into()))
    }

    pub fn bool(b: bool) -> Self {
        UiValue::Primitive(Primitive::Bool(b))
    }

    pub fn sequence(items: impl IntoIterator<Item = UiValue>) -> Self {
        UiValue::Sequence(items.into_iter().collect())
    }

    pub fn record(entries: impl IntoIterator<Item = (String, UiValue)>) -> Self {
        UiValue::Record(entries.into_iter().collect())
    }

    /// True for certified host and component elements.
    pub fn is_element(&self) -> bool {
        matches!(self, UiValue::Host(_) | UiValue::Component(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, UiValue::Primitive(Primitive::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            UiValue::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Short name of the node kind, used in fault messages.
    pub fn kind(&self) -> &'static str {
        match self {
            UiValue::Primitive(_) => "primitive",
            UiValue::Sequence(_) => "sequence",
            UiValue::Host(_) => "host element",
            UiValue::Component(_) => "component element",
            UiValue::Record(_) => "record",
        }
    }
}

impl Default for UiValue {
    fn default() -> Self {
        UiValue::null()
    }
}

impl From<&str> for UiValue {
    fn from(s: &str) -> Self {
        UiValue::text(s)
    }
}

impl From<String> for UiValue {
    fn from(s: String) -> Self {
        UiValue::text(s)
    }
}

impl From<i64> for UiValue {
    fn from(n: i64) -> Self {
        UiValue::number(n)
    }
}

impl From<i32> for UiValue {
    fn from(n: i32) -> Self {
        UiValue::number(n)
    }
}

impl From<bool> for UiValue {
    fn from(b: bool) -> Self {
        UiValue::bool(b)
    }
}

impl From<Vec<UiValue>> for UiValue {
    fn from(items: Vec<UiValue>) -> Self {
        UiValue::Sequence(items)
    }
}

impl From<HostElement> for UiValue {
    fn from(el: HostElement) -> Self {
        UiValue::Host(el)
    }
}

impl From<ComponentElement> for UiValue {
    fn from(el: ComponentElement) -> Self {
        UiValue::Component(el)
    }
}

/// Native markup: a tag, attributes in insertion order, and children.
///
/// Tag and attribute names are trusted and emitted verbatim; only values are
/// escaped when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct HostElement {
    tag: String,
    attributes: Props,
    children: Box<UiValue>,
}

impl HostElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Props::new(),
            children: Box::new(UiValue::null()),
        }
    }

    /// Sets an attribute. The reserved `children` name sets the children.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<UiValue>) -> Self {
        let name = name.into();
        if name == CHILDREN {
            self.children = Box::new(value.into());
        } else {
            self.attributes.insert(name, value.into());
        }
        self
    }

    pub fn children(mut self, children: impl Into<UiValue>) -> Self {
        self.children = Box::new(children.into());
        self
    }

    /// Rebuilds an element from parts; a `children` entry in `attributes`
    /// takes precedence over `children`.
    pub fn from_parts(tag: impl Into<String>, attributes: Props, children: UiValue) -> Self {
        let mut el = Self::new(tag).children(children);
        for (name, value) in attributes {
            el = el.attr(name, value);
        }
        el
    }

    pub fn into_parts(self) -> (String, Props, UiValue) {
        (self.tag, self.attributes, *self.children)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Props {
        &self.attributes
    }

    pub fn child_node(&self) -> &UiValue {
        &self.children
    }
}

/// Shorthand for `HostElement::new(tag)`.
pub fn el(tag: impl Into<String>) -> HostElement {
    HostElement::new(tag)
}

/// A user-defined composite: a component plus the props it is invoked with.
#[derive(Clone)]
pub struct ComponentElement {
    component: Arc<dyn Component>,
    props: Props,
}

impl ComponentElement {
    pub fn new(component: Arc<dyn Component>) -> Self {
        Self {
            component,
            props: Props::new(),
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<UiValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        self.component.name()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn into_parts(self) -> (Arc<dyn Component>, Props) {
        (self.component, self.props)
    }
}

impl fmt::Debug for ComponentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentElement")
            .field("component", &self.component.name())
            .field("props", &self.props)
            .finish()
    }
}

impl PartialEq for ComponentElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.component, &other.component) && self.props == other.props
    }
}
