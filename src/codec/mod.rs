//! Wire codec for resolved UI trees.
//!
//! Elements travel as JSON objects whose `$$typeof` member is the sentinel
//! string [`ELEMENT_SENTINEL`]:
//!
//! ```text
//! {"$$typeof": "$RE", "type": "a", "props": {"href": "/", "children": "Home"}}
//! ```
//!
//! Application strings starting with `$` get one extra `$` on the way out
//! and lose it on the way in, so no application string can ever be read as
//! the sentinel. An object without the sentinel decodes to an inert
//! [`UiValue::Record`], never to an element. A certified object carries
//! exactly `$$typeof`, `type` and `props`; any other member is rejected.

mod error;

use serde_json::{Map, Value};

pub use error::CodecError;

use crate::element::{HostElement, Primitive, Props, UiValue, CHILDREN};

/// Control token marking an object as a certified element.
pub const ELEMENT_SENTINEL: &str = "$RE";

const ESCAPE: char = '$';
const MARKER_KEY: &str = "$$typeof";
const TYPE_KEY: &str = "type";
const PROPS_KEY: &str = "props";

/// Encodes a component-free tree as pretty-printed JSON.
pub fn encode(node: &UiValue) -> Result<String, CodecError> {
    let wire = to_wire(node)?;
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Decodes wire text produced by [`encode`].
pub fn decode(text: &str) -> Result<UiValue, CodecError> {
    let wire: Value = serde_json::from_str(text)?;
    from_wire(wire)
}

fn escape_str(s: &str) -> String {
    if s.starts_with(ESCAPE) {
        format!("{ESCAPE}{s}")
    } else {
        s.to_string()
    }
}

fn unescape_str(s: String) -> Result<String, CodecError> {
    if s == ELEMENT_SENTINEL {
        return Err(CodecError::StraySentinel);
    }
    if s.starts_with("$$") {
        Ok(s[1..].to_string())
    } else {
        Ok(s)
    }
}

fn to_wire(node: &UiValue) -> Result<Value, CodecError> {
    match node {
        UiValue::Primitive(Primitive::Null) => Ok(Value::Null),
        UiValue::Primitive(Primitive::Bool(b)) => Ok(Value::Bool(*b)),
        UiValue::Primitive(Primitive::Number(n)) => Ok(Value::Number(n.clone())),
        UiValue::Primitive(Primitive::String(s)) => Ok(Value::String(escape_str(s))),
        UiValue::Sequence(items) => items
            .iter()
            .map(to_wire)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        UiValue::Record(entries) => Ok(Value::Object(props_to_wire(entries)?)),
        UiValue::Host(element) => {
            let mut props = props_to_wire(element.attributes())?;
            if !element.child_node().is_null() {
                props.insert(CHILDREN.to_string(), to_wire(element.child_node())?);
            }

            let mut object = Map::new();
            object.insert(
                MARKER_KEY.to_string(),
                Value::String(ELEMENT_SENTINEL.to_string()),
            );
            object.insert(TYPE_KEY.to_string(), Value::String(escape_str(element.tag())));
            object.insert(PROPS_KEY.to_string(), Value::Object(props));
            Ok(Value::Object(object))
        }
        UiValue::Component(element) => Err(CodecError::UnresolvedComponent {
            name: element.name().to_string(),
        }),
    }
}

fn props_to_wire(props: &Props) -> Result<Map<String, Value>, CodecError> {
    props
        .iter()
        .map(|(name, value)| Ok::<_, CodecError>((name.clone(), to_wire(value)?)))
        .collect()
}

fn from_wire(wire: Value) -> Result<UiValue, CodecError> {
    match wire {
        Value::Null => Ok(UiValue::null()),
        Value::Bool(b) => Ok(UiValue::bool(b)),
        Value::Number(n) => Ok(UiValue::number(n)),
        Value::String(s) => Ok(UiValue::text(unescape_str(s)?)),
        Value::Array(items) => items
            .into_iter()
            .map(from_wire)
            .collect::<Result<Vec<_>, _>>()
            .map(UiValue::Sequence),
        Value::Object(mut object) => {
            let certified = matches!(
                object.get(MARKER_KEY),
                Some(Value::String(marker)) if marker == ELEMENT_SENTINEL
            );
            if certified {
                object.remove(MARKER_KEY);
                element_from_wire(object)
            } else {
                Ok(UiValue::Record(props_from_wire(object)?))
            }
        }
    }
}

fn element_from_wire(mut object: Map<String, Value>) -> Result<UiValue, CodecError> {
    let tag = match object.remove(TYPE_KEY) {
        Some(Value::String(tag)) => unescape_str(tag)?,
        _ => {
            return Err(CodecError::InvalidElement {
                reason: "missing string `type`".to_string(),
            })
        }
    };
    let props = match object.remove(PROPS_KEY) {
        Some(Value::Object(props)) => props_from_wire(props)?,
        None | Some(Value::Null) => Props::new(),
        Some(_) => {
            return Err(CodecError::InvalidElement {
                reason: format!("`props` of <{tag}> is not an object"),
            })
        }
    };
    if let Some(member) = object.keys().next() {
        return Err(CodecError::InvalidElement {
            reason: format!("unexpected member `{member}` on <{tag}>"),
        });
    }
    Ok(HostElement::from_parts(tag, props, UiValue::null()).into())
}

fn props_from_wire(object: Map<String, Value>) -> Result<Props, CodecError> {
    object
        .into_iter()
        .map(|(name, value)| Ok::<_, CodecError>((name, from_wire(value)?)))
        .collect()
}
