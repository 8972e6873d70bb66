//! In-memory image tensor exchanged with the pipeline host

use ndarray::ArrayD;

/// A dense image array as the host hands it over.
///
/// The shape is not constrained here: it may carry a leading batch axis and
/// may be channel-first or channel-last. Layout checks happen when the tensor
/// is normalized for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageTensor {
    Float(ArrayD<f32>),
    Byte(ArrayD<u8>),
}

impl ImageTensor {
    pub fn shape(&self) -> &[usize] {
        match self {
            ImageTensor::Float(array) => array.shape(),
            ImageTensor::Byte(array) => array.shape(),
        }
    }

    pub fn as_float(&self) -> Option<&ArrayD<f32>> {
        match self {
            ImageTensor::Float(array) => Some(array),
            ImageTensor::Byte(_) => None,
        }
    }
}

impl From<ArrayD<f32>> for ImageTensor {
    fn from(array: ArrayD<f32>) -> Self {
        ImageTensor::Float(array)
    }
}

impl From<ArrayD<u8>> for ImageTensor {
    fn from(array: ArrayD<u8>) -> Self {
        ImageTensor::Byte(array)
    }
}
