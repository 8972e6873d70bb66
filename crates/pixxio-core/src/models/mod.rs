//! Domain models shared by the nodes

pub mod image;
pub mod node;

pub use image::ImageTensor;
pub use node::{
    InputDefault, InputKind, InputSpec, NodeInfo, NodeInputs, NodeOutput, NodeValue, OutputSpec,
};
