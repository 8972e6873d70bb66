//! JPEG encoding of normalized frames

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use ndarray::Array3;
use pixxio_core::{ImageTensor, NodeError, NodeResult};

use super::normalize::normalize_to_hwc;

/// Build an RGB image from an (H, W, C) frame. A single channel is replicated.
pub fn to_rgb_image(frame: &Array3<u8>) -> NodeResult<RgbImage> {
    let (height, width, channels) = frame.dim();

    let raw: Vec<u8> = match channels {
        3 => frame.iter().copied().collect(),
        1 => frame.iter().flat_map(|&v| [v, v, v]).collect(),
        other => {
            return Err(NodeError::conversion(format!(
                "Cannot build an RGB image from {} channels",
                other
            )));
        }
    };

    let width = u32::try_from(width)
        .map_err(|_| NodeError::conversion(format!("Image width {} is too large", width)))?;
    let height = u32::try_from(height)
        .map_err(|_| NodeError::conversion(format!("Image height {} is too large", height)))?;

    RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| NodeError::conversion("Pixel buffer does not match image dimensions"))
}

/// Encode an RGB image as baseline JPEG
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> NodeResult<Bytes> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    image
        .write_with_encoder(encoder)
        .map_err(|e| NodeError::conversion(format!("Failed to encode JPEG: {}", e)))?;

    Ok(Bytes::from(buffer))
}

/// Normalize a host tensor and encode it as JPEG in one step
pub fn tensor_to_jpeg(tensor: &ImageTensor, quality: u8) -> NodeResult<Bytes> {
    let frame = normalize_to_hwc(tensor)?;
    let image = to_rgb_image(&frame)?;
    let jpeg = encode_jpeg(&image, quality)?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        quality = quality,
        size_bytes = jpeg.len(),
        "Encoded image tensor as JPEG"
    );

    Ok(jpeg)
}
