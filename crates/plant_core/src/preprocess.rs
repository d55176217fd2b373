//! Image → normalized NHWC tensor for the model.

use crate::error::{ClassifierError, Result};
use image::{DynamicImage, imageops::FilterType};
use ndarray::Array4;
use std::path::Path;

/// Side length of the square model input.
pub const MODEL_INPUT_SIZE: u32 = 150;

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ClassifierError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes `path` and returns a `(1, size, size, 3)` array scaled to [0,1].
pub fn prepare_image(path: &Path, size: u32) -> Result<Array4<f32>> {
    let img = load_image(path)?;
    Ok(prepare_dynamic(&img, size))
}

/// Nearest-neighbour resize to `size`×`size`, RGB channels last, each value
/// divided by 255.
pub fn prepare_dynamic(img: &DynamicImage, size: u32) -> Array4<f32> {
    let rgb = img.resize_exact(size, size, FilterType::Nearest).to_rgb8();
    let side = size as usize;
    let mut array = Array4::<f32>::zeros((1, side, side, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        for (c, &value) in pixel.0.iter().enumerate() {
            array[[0, row, col, c]] = normalize_channel(value);
        }
    }
    array
}

fn normalize_channel(value: u8) -> f32 {
    value as f32 / 255.0
}
