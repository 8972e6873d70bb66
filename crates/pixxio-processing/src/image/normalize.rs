//! Tensor layout classification and normalization
//!
//! Turns whatever the host hands over (batched or not, channel-first or
//! channel-last, float or byte) into a single height x width x channel `u8`
//! frame. The rules are applied in a fixed order:
//!
//! 1. a leading batch axis of size 1 is dropped
//! 2. a 3-D array whose first axis is 1, 3 or 4 is channel-first and is
//!    transposed to channel-last
//! 3. float elements are scaled by 255, rounded and clamped to `u8`
//! 4. a fourth (alpha) channel is truncated

use ndarray::{s, Array3, ArrayViewD, Axis, Ix3};
use pixxio_core::{ImageTensor, NodeError, NodeResult};

const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// Axis order of a single (unbatched) image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// (C, H, W)
    ChannelsFirst,
    /// (H, W, C)
    ChannelsLast,
}

/// Recognized shape of an image tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorShape {
    pub batched: bool,
    pub layout: TensorLayout,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

/// Classify a tensor shape, rejecting anything the encoder cannot handle.
pub fn classify_shape(shape: &[usize]) -> NodeResult<TensorShape> {
    if shape.contains(&0) {
        return Err(NodeError::conversion(format!(
            "Image tensor has an empty axis: {:?}",
            shape
        )));
    }

    let (batched, dims) = match shape {
        [1, rest @ ..] if shape.len() == 4 => (true, rest),
        [batch, ..] if shape.len() == 4 => {
            return Err(NodeError::conversion(format!(
                "Batch of {} images is not supported, expected a single image",
                batch
            )));
        }
        _ => (false, shape),
    };

    let &[first, second, third] = dims else {
        return Err(NodeError::conversion(format!(
            "Expected an image of shape (H, W, C) or (C, H, W), got {:?}",
            shape
        )));
    };

    if SUPPORTED_CHANNELS.contains(&first) {
        return Ok(TensorShape {
            batched,
            layout: TensorLayout::ChannelsFirst,
            height: second,
            width: third,
            channels: first,
        });
    }

    if !SUPPORTED_CHANNELS.contains(&third) {
        return Err(NodeError::conversion(format!(
            "Unsupported channel count {} in shape {:?}, expected 1, 3 or 4",
            third, shape
        )));
    }

    Ok(TensorShape {
        batched,
        layout: TensorLayout::ChannelsLast,
        height: first,
        width: second,
        channels: third,
    })
}

/// Normalize a host tensor to an (H, W, C) `u8` frame with C in {1, 3}.
pub fn normalize_to_hwc(tensor: &ImageTensor) -> NodeResult<Array3<u8>> {
    let shape = classify_shape(tensor.shape())?;

    let frame = match tensor {
        ImageTensor::Byte(array) => to_channels_last(array.view(), &shape)?,
        ImageTensor::Float(array) => to_channels_last(array.view(), &shape)?.mapv(float_to_u8),
    };

    let frame = if shape.channels == 4 {
        frame.slice(s![.., .., 0..3]).to_owned()
    } else {
        frame
    };

    tracing::debug!(
        input_shape = ?tensor.shape(),
        output_shape = ?frame.shape(),
        layout = ?shape.layout,
        "Normalized image tensor"
    );

    Ok(frame)
}

fn to_channels_last<T: Clone>(
    array: ArrayViewD<'_, T>,
    shape: &TensorShape,
) -> NodeResult<Array3<T>> {
    let array = if shape.batched {
        array.index_axis_move(Axis(0), 0)
    } else {
        array
    };

    let array = array
        .into_dimensionality::<Ix3>()
        .map_err(|e| NodeError::conversion(format!("Unexpected tensor rank: {}", e)))?;

    let array = match shape.layout {
        TensorLayout::ChannelsFirst => array.permuted_axes([1, 2, 0]),
        TensorLayout::ChannelsLast => array,
    };

    Ok(array.as_standard_layout().into_owned())
}

/// Map a nominally [0, 1] float to a byte. Out-of-range values clamp, NaN maps to 0.
fn float_to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
