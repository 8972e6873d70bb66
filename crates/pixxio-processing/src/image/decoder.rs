//! Still-image decoding into host tensors
//!
//! Output tensors are `f32` in [0, 1] with shape (1, H, W, C), where C is 1 for
//! 8-bit grayscale sources and 3 for everything else.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageReader, Rgb, RgbImage, RgbaImage};
use ndarray::{ArrayD, IxDyn};
use pixxio_core::{ImageTensor, NodeError, NodeResult};

const DECODE_ERROR: &str = "Failed to process image";

enum DecodedPixels {
    Gray(GrayImage),
    Rgb(RgbImage),
}

/// Decode image bytes (any format the `image` crate recognizes) into a host tensor.
pub fn decode_to_tensor(data: &[u8]) -> NodeResult<ImageTensor> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| NodeError::decode(DECODE_ERROR, e))?
        .decode()
        .map_err(|e| NodeError::decode(DECODE_ERROR, e))?;

    let source_color = img.color();

    let (width, height, channels, raw) = match into_supported_mode(img) {
        DecodedPixels::Gray(gray) => (gray.width(), gray.height(), 1, gray.into_raw()),
        DecodedPixels::Rgb(rgb) => (rgb.width(), rgb.height(), 3, rgb.into_raw()),
    };

    let values: Vec<f32> = raw.into_iter().map(|v| f32::from(v) / 255.0).collect();
    let shape = [1, height as usize, width as usize, channels];

    let tensor = ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| NodeError::decode(DECODE_ERROR, e))?;

    tracing::debug!(
        source_color = ?source_color,
        shape = ?shape,
        "Decoded image into tensor"
    );

    Ok(ImageTensor::Float(tensor))
}

/// Keep 8-bit grayscale and RGB as-is; flatten anything with alpha onto black
/// and convert every other mode to 8-bit RGB.
fn into_supported_mode(img: DynamicImage) -> DecodedPixels {
    match img {
        DynamicImage::ImageLuma8(gray) => DecodedPixels::Gray(gray),
        DynamicImage::ImageRgb8(rgb) => DecodedPixels::Rgb(rgb),
        other if other.color().has_alpha() => DecodedPixels::Rgb(flatten_alpha(&other.to_rgba8())),
        other => DecodedPixels::Rgb(other.to_rgb8()),
    }
}

fn flatten_alpha(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            composite_on_black(r, a),
            composite_on_black(g, a),
            composite_on_black(b, a),
        ])
    })
}

fn composite_on_black(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}
