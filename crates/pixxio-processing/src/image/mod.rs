//! Image processing module
//!
//! - Tensor layout classification and normalization (normalize)
//! - JPEG encoding of normalized frames (encoder)
//! - Still-image decoding into host tensors (decoder)

pub mod decoder;
pub mod encoder;
pub mod normalize;

pub use decoder::decode_to_tensor;
pub use encoder::{encode_jpeg, tensor_to_jpeg, to_rgb_image};
pub use normalize::{classify_shape, normalize_to_hwc, TensorLayout, TensorShape};
