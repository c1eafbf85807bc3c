//! Component tree and its text rendering.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// A content line. `value` is stored already encoded for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: String,
}

impl Property {
    /// A TEXT property; the value is escaped.
    pub fn text(name: &str, value: &str) -> Self {
        Self::raw(name, escape_text(value))
    }

    /// A property whose value is already in wire form (dates, offsets, URIs).
    pub fn raw(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.push(Parameter {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn push_child(&mut self, child: Component) {
        self.children.push(child);
    }
}

/// Renders a component and its children as CRLF-terminated, folded lines.
/// Properties and children keep their insertion order.
pub fn serialize_component(component: &Component) -> String {
    let mut out = fold_line(&format!("BEGIN:{}", component.name));
    for property in &component.properties {
        out.push_str(&serialize_property(property));
    }
    for child in &component.children {
        out.push_str(&serialize_component(child));
    }
    out.push_str(&fold_line(&format!("END:{}", component.name)));
    out
}

pub fn serialize_property(property: &Property) -> String {
    let mut line = property.name.clone();
    for param in &property.params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        line.push_str(&escape_param_value(&param.value));
    }
    line.push(':');
    line.push_str(&property.value);
    fold_line(&line)
}
