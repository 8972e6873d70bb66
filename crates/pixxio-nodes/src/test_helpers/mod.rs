//! Test helpers for node unit tests
//!
//! Small tensor builders so node tests don't depend on real image files.

use ndarray::{ArrayD, IxDyn};
use pixxio_core::ImageTensor;

/// Batched float RGB tensor `[1, height, width, 3]` with a simple gradient
pub fn rgb_tensor(height: usize, width: usize) -> ImageTensor {
    let array = ArrayD::from_shape_fn(IxDyn(&[1, height, width, 3]), |idx| {
        let (y, x, c) = (idx[1], idx[2], idx[3]);
        ((y + x + c) % 4) as f32 / 3.0
    });
    ImageTensor::Float(array)
}
