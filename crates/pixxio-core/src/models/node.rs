//! Node input/output declarations and values
//!
//! A node declares its typed inputs (with defaults) and outputs through a
//! [`NodeInfo`]. At execution time the host hands over a [`NodeInputs`] map,
//! which the node resolves against its declaration before reading values.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{NodeError, NodeResult};
use crate::models::image::ImageTensor;

/// Kind of a declared input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputKind {
    Image,
    String,
    Int,
}

/// A value flowing into or out of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Image(ImageTensor),
    String(String),
    Int(i64),
}

impl NodeValue {
    pub fn kind(&self) -> InputKind {
        match self {
            NodeValue::Image(_) => InputKind::Image,
            NodeValue::String(_) => InputKind::String,
            NodeValue::Int(_) => InputKind::Int,
        }
    }
}

impl From<ImageTensor> for NodeValue {
    fn from(tensor: ImageTensor) -> Self {
        NodeValue::Image(tensor)
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::String(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.to_string())
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Int(value)
    }
}

/// Default value of a declared string or integer input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InputDefault {
    String(String),
    Int(i64),
}

impl From<InputDefault> for NodeValue {
    fn from(default: InputDefault) -> Self {
        match default {
            InputDefault::String(value) => NodeValue::String(value),
            InputDefault::Int(value) => NodeValue::Int(value),
        }
    }
}

/// Declaration of one node input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name: &'static str,
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<InputDefault>,
}

impl InputSpec {
    pub fn image(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Image,
            default: None,
        }
    }

    pub fn string(name: &'static str, default: &str) -> Self {
        Self {
            name,
            kind: InputKind::String,
            default: Some(InputDefault::String(default.to_string())),
        }
    }

    pub fn int(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: InputKind::Int,
            default: Some(InputDefault::Int(default)),
        }
    }

    fn mismatch(&self, message: String) -> NodeError {
        match self.kind {
            InputKind::Image => NodeError::Conversion(message),
            InputKind::String | InputKind::Int => NodeError::Argument(message),
        }
    }
}

/// Declaration of one node output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: &'static str,
    pub kind: InputKind,
}

/// Everything the host registry needs to wire a node into a pipeline
#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    /// Registry key
    pub name: String,
    /// Human-readable name shown in the pipeline editor
    pub display_name: String,
    /// Menu category (e.g. "uploaders", "loaders")
    pub category: String,
    pub description: String,
    pub inputs: Vec<InputSpec>,
    pub outputs: Vec<OutputSpec>,
}

/// Named input values for a single node invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: HashMap<String, NodeValue>,
}

impl NodeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<NodeValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the provided values against the declared inputs.
    ///
    /// Omitted inputs take their declared default. An omitted input without a
    /// default, or a value of the wrong kind, is rejected. Undeclared values
    /// are dropped. String and integer inputs are checked before image inputs.
    pub fn resolve(mut self, specs: &[InputSpec]) -> NodeResult<Self> {
        let mut resolved = HashMap::with_capacity(specs.len());

        let (images, scalars): (Vec<&InputSpec>, Vec<&InputSpec>) =
            specs.iter().partition(|spec| spec.kind == InputKind::Image);

        for spec in scalars.into_iter().chain(images) {
            let value = match self.values.remove(spec.name) {
                Some(value) => value,
                None => match &spec.default {
                    Some(default) => default.clone().into(),
                    None => {
                        return Err(spec.mismatch(format!("{} is required", spec.name)));
                    }
                },
            };

            if value.kind() != spec.kind {
                return Err(spec.mismatch(format!(
                    "{} must be of type {:?}, got {:?}",
                    spec.name,
                    spec.kind,
                    value.kind()
                )));
            }

            resolved.insert(spec.name.to_string(), value);
        }

        for name in self.values.keys() {
            tracing::debug!(input = %name, "Ignoring undeclared node input");
        }

        Ok(Self { values: resolved })
    }

    pub fn string(&self, name: &str) -> NodeResult<&str> {
        match self.values.get(name) {
            Some(NodeValue::String(value)) => Ok(value),
            Some(other) => Err(NodeError::argument(format!(
                "{} must be a string, got {:?}",
                name,
                other.kind()
            ))),
            None => Err(NodeError::argument(format!("{} is required", name))),
        }
    }

    pub fn int(&self, name: &str) -> NodeResult<i64> {
        match self.values.get(name) {
            Some(NodeValue::Int(value)) => Ok(*value),
            Some(other) => Err(NodeError::argument(format!(
                "{} must be an integer, got {:?}",
                name,
                other.kind()
            ))),
            None => Err(NodeError::argument(format!("{} is required", name))),
        }
    }

    /// Remove and return an image input.
    pub fn take_image(&mut self, name: &str) -> NodeResult<ImageTensor> {
        match self.values.remove(name) {
            Some(NodeValue::Image(tensor)) => Ok(tensor),
            Some(other) => Err(NodeError::conversion(format!(
                "Unsupported image format for {}: expected an image tensor, got {:?}",
                name,
                other.kind()
            ))),
            None => Err(NodeError::conversion(format!("{} is required", name))),
        }
    }
}

/// Values produced by a node, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutput {
    pub values: Vec<NodeValue>,
}

impl NodeOutput {
    pub fn image(tensor: ImageTensor) -> Self {
        Self {
            values: vec![NodeValue::Image(tensor)],
        }
    }

    /// First output as an image tensor, if it is one
    pub fn into_image(self) -> Option<ImageTensor> {
        match self.values.into_iter().next() {
            Some(NodeValue::Image(tensor)) => Some(tensor),
            _ => None,
        }
    }
}
