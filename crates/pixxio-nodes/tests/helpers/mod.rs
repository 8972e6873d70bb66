//! Shared fixtures for node integration tests.
//!
//! Run from workspace root: `cargo test -p pixxio-nodes`.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::{ArrayD, IxDyn};
use pixxio_nodes::{ImageTensor, NodeInputs, TransferConfig};

pub const API_KEY: &str = "integration-key";

/// Config with short timeouts so failing tests don't hang.
pub fn test_config() -> TransferConfig {
    TransferConfig {
        upload_timeout_secs: 5,
        resolve_timeout_secs: 5,
        fetch_timeout_secs: 5,
        ..TransferConfig::default()
    }
}

pub fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("PNG encoding should succeed");
    buffer.into_inner()
}

pub fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    encode_png(DynamicImage::ImageLuma8(GrayImage::from_pixel(
        width,
        height,
        Luma([value]),
    )))
}

pub fn rgb_png(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb(pixel),
    )))
}

pub fn rgba_png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba(pixel),
    )))
}

/// Float tensor of the given shape where every element is `value`
pub fn filled_tensor(shape: &[usize], value: f32) -> ImageTensor {
    ImageTensor::Float(ArrayD::from_elem(IxDyn(shape), value))
}

pub fn upload_inputs(server_url: &str, image: ImageTensor) -> NodeInputs {
    NodeInputs::new()
        .with("image", image)
        .with("api_key", API_KEY)
        .with("mediaspace_url", server_url)
        .with("collection_id", 42i64)
}

pub fn load_inputs(server_url: &str, file_id: &str) -> NodeInputs {
    NodeInputs::new()
        .with("file_id", file_id)
        .with("api_key", API_KEY)
        .with("mediaspace_url", server_url)
}
