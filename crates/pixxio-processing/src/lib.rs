//! pixx.io Image Processing Library
//!
//! Converts between the host's in-memory image tensors and the compressed byte
//! streams exchanged with pixx.io.

pub mod image;

// Re-export commonly used types
pub use crate::image::{
    classify_shape, decode_to_tensor, encode_jpeg, normalize_to_hwc, tensor_to_jpeg,
    to_rgb_image, TensorLayout, TensorShape,
};
