//! Typed, read-only view of one input node.
//!
//! Input nodes are plain JSON objects:
//!
//! ```text
//! Node := { "name"?: string, "loop"?: boolean, "children"?: [Node] | null }
//! ```

use std::fmt;

use serde_json::{Map, Value};

pub const NAME_KEY: &str = "name";
pub const LOOP_KEY: &str = "loop";
pub const CHILDREN_KEY: &str = "children";

/// Kind of a JSON value, as reported in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
            Value::String(_) => JsonKind::String,
            Value::Number(_) => JsonKind::Number,
            Value::Bool(true) => JsonKind::True,
            Value::Bool(false) => JsonKind::False,
            Value::Null => JsonKind::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Object => "OBJECT",
            JsonKind::Array => "ARRAY",
            JsonKind::String => "STRING",
            JsonKind::Number => "NUMBER",
            JsonKind::True => "TRUE",
            JsonKind::False => "FALSE",
            JsonKind::Null => "NULL",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `children` field of a node.
///
/// `Absent` and `Null` both mean "no children" but stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Children<'a> {
    Absent,
    Null,
    Array(&'a [Value]),
    /// Present with a kind other than array or null.
    Invalid(JsonKind),
}

impl<'a> Children<'a> {
    pub fn from_field(value: Option<&'a Value>) -> Self {
        match value {
            None => Children::Absent,
            Some(Value::Null) => Children::Null,
            Some(Value::Array(elements)) => Children::Array(elements.as_slice()),
            Some(other) => Children::Invalid(JsonKind::of(other)),
        }
    }
}

/// Fields of one input node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSpec<'a> {
    /// `None` when the key is missing or not a string.
    pub name: Option<&'a str>,
    /// `false` when the key is missing or not a boolean.
    pub is_loop: bool,
    pub children: Children<'a>,
}

impl<'a> NodeSpec<'a> {
    pub fn from_object(object: &'a Map<String, Value>) -> Self {
        Self {
            name: object.get(NAME_KEY).and_then(Value::as_str),
            is_loop: object
                .get(LOOP_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            children: Children::from_field(object.get(CHILDREN_KEY)),
        }
    }

    /// Read a node, or report the kind of a value that is not an object.
    pub fn from_value(value: &'a Value) -> Result<Self, JsonKind> {
        value
            .as_object()
            .map(Self::from_object)
            .ok_or_else(|| JsonKind::of(value))
    }
}
