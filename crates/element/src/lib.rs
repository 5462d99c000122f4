//! Typed element tree shared by the Lumen extraction crates.
//!
//! A FHIR resource, once parsed, is exposed to the search subsystem as a tree
//! of [`ElementNode`]s: each node carries its runtime FHIR type name, an
//! optional primitive scalar, and its named children in document order. The
//! tree is immutable; extraction only ever reads it.
//!
//! The parsing layer that produces these trees lives elsewhere. This crate
//! deliberately has a minimal dependency footprint so that both sides can
//! depend on it.

use std::fmt;

use rust_decimal::Decimal;

/// Primitive payload of an element.
///
/// Date, time, and instant primitives keep their raw text as [`ScalarValue::String`]
/// so that partial precision ("1980", "1980-06") survives into extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// A string-valued primitive (string, code, id, uri, date, ...).
    String(String),
    /// A boolean primitive.
    Boolean(bool),
    /// A decimal primitive.
    Decimal(Decimal),
    /// An integer primitive (integer, positiveInt, unsignedInt).
    Integer(i64),
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<Decimal> for ScalarValue {
    fn from(d: Decimal) -> Self {
        ScalarValue::Decimal(d)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "{}", s),
            ScalarValue::Boolean(b) => write!(f, "{}", b),
            ScalarValue::Decimal(d) => write!(f, "{}", d),
            ScalarValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// An immutable node in a typed FHIR element tree.
///
/// A node is either a primitive (carries a [`ScalarValue`], no children) or a
/// composite (carries named children in document order, repeating names
/// allowed). The `location` is the structural path of the element within its
/// resource ("Patient.gender"); it is only consulted when resolving the
/// implicit coding system of untyped `code` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    type_name: String,
    value: Option<ScalarValue>,
    children: Vec<(String, ElementNode)>,
    location: String,
}

impl ElementNode {
    /// Creates a primitive node of the given runtime type.
    pub fn primitive(type_name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            type_name: type_name.into(),
            value: Some(value.into()),
            children: Vec::new(),
            location: String::new(),
        }
    }

    /// Creates a composite node of the given runtime type with no children yet.
    pub fn composite(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: None,
            children: Vec::new(),
            location: String::new(),
        }
    }

    /// Appends a named child, preserving document order.
    pub fn with_child(mut self, name: impl Into<String>, child: ElementNode) -> Self {
        self.children.push((name.into(), child));
        self
    }

    /// Sets the structural location of this element ("Patient.gender").
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// The runtime FHIR type name of this node.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The structural location of this element within its resource.
    ///
    /// Empty when the producer did not record one.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The primitive scalar, if this node is a primitive.
    pub fn scalar(&self) -> Option<&ScalarValue> {
        self.value.as_ref()
    }

    /// The first child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&ElementNode> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// All children with the given name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ElementNode> {
        self.children
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// The scalar as trimmed text, or `None` if absent or whitespace-only.
    ///
    /// String-valued primitives are considered absent when empty after
    /// trimming; every extractor inherits that rule through this accessor.
    pub fn as_str(&self) -> Option<&str> {
        match self.value.as_ref()? {
            ScalarValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() { None } else { Some(trimmed) }
            }
            _ => None,
        }
    }

    /// The scalar as a boolean, if this is a boolean primitive.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value.as_ref()? {
            ScalarValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The scalar as a decimal. Integer scalars widen losslessly.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self.value.as_ref()? {
            ScalarValue::Decimal(d) => Some(*d),
            ScalarValue::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// The scalar as an integer, if this is an integer primitive.
    pub fn as_integer(&self) -> Option<i64> {
        match self.value.as_ref()? {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}
