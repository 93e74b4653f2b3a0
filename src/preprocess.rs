use crate::{config::ModelConfig, error::ClassifierError};
use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};
use ndarray::Array3;

/// Turns an arbitrary image into the fixed-shape, normalized CHW tensor the
/// model expects. The input image is never mutated; all work happens on an
/// RGB copy.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    resize_target: u32,
    crop_size: u32,
    mean: [f32; 3],
    std: [f32; 3],
}

impl Preprocessor {
    pub fn new(model_config: &ModelConfig) -> Result<Self, ClassifierError> {
        if model_config.crop_size > model_config.resize_target {
            return Err(ClassifierError::Preprocess(format!(
                "crop size {} exceeds resize target {}",
                model_config.crop_size, model_config.resize_target
            )));
        }
        if model_config.std.iter().any(|&s| s <= 0.0) {
            return Err(ClassifierError::Preprocess(
                "standard deviation must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            resize_target: model_config.resize_target,
            crop_size: model_config.crop_size,
            mean: model_config.mean,
            std: model_config.std,
        })
    }

    /// Resize (shorter side to target, aspect preserved, bilinear), center
    /// crop, scale to [0,1] and normalize per channel.
    pub fn process(&self, image: &DynamicImage) -> Array3<f32> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let (resized_width, resized_height) = resize_dims(width, height, self.resize_target);
        let resized = imageops::resize(&rgb, resized_width, resized_height, FilterType::Triangle);

        let (crop_x, crop_y) = crop_origin(resized_width, resized_height, self.crop_size);
        let cropped =
            imageops::crop_imm(&resized, crop_x, crop_y, self.crop_size, self.crop_size).to_image();

        self.to_normalized_tensor(&cropped)
    }

    fn to_normalized_tensor(&self, cropped: &RgbImage) -> Array3<f32> {
        let size = self.crop_size as usize;
        let mut tensor = Array3::zeros((3, size, size));
        for (x, y, pixel) in cropped.enumerate_pixels() {
            let x = x as usize;
            let y = y as usize;
            let [r, g, b] = pixel.0;
            tensor[[0, y, x]] = ((r as f32) / 255. - self.mean[0]) / self.std[0];
            tensor[[1, y, x]] = ((g as f32) / 255. - self.mean[1]) / self.std[1];
            tensor[[2, y, x]] = ((b as f32) / 255. - self.mean[2]) / self.std[2];
        }
        tensor
    }
}

fn resize_dims(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width <= height {
        let scaled = (height as f32 * target as f32 / width as f32).round() as u32;
        (target, scaled)
    } else {
        let scaled = (width as f32 * target as f32 / height as f32).round() as u32;
        (scaled, target)
    }
}

fn crop_origin(width: u32, height: u32, crop_size: u32) -> (u32, u32) {
    ((width - crop_size) / 2, (height - crop_size) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::path::PathBuf;

    fn test_config(resize_target: u32) -> ModelConfig {
        ModelConfig {
            model_dir: PathBuf::from("models"),
            onnx_file: "test.onnx".to_string(),
            num_instances: 1,
            resize_target,
            crop_size: 224,
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    #[test]
    fn test_process_produces_chw_tensor() {
        let preprocessor = Preprocessor::new(&test_config(256)).unwrap();
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(100, 150, Rgb([255, 0, 0]));
        let image = DynamicImage::ImageRgb8(img);

        let tensor = preprocessor.process(&image);

        assert_eq!(tensor.shape(), &[3, 224, 224]);
        // Constant red image: every pixel normalizes to the same values.
        let red = (1.0 - 0.485) / 0.229;
        let green = (0.0 - 0.456) / 0.224;
        let blue = (0.0 - 0.406) / 0.225;
        assert!((tensor[[0, 0, 0]] - red).abs() < 1e-5);
        assert!((tensor[[1, 112, 57]] - green).abs() < 1e-5);
        assert!((tensor[[2, 223, 223]] - blue).abs() < 1e-5);
    }

    #[test]
    fn test_resize_targets_shorter_side() {
        assert_eq!(resize_dims(640, 480, 256), (341, 256));
        assert_eq!(resize_dims(480, 640, 256), (256, 341));
        assert_eq!(resize_dims(224, 224, 224), (224, 224));
    }

    #[test]
    fn test_crop_origin_is_centered() {
        assert_eq!(crop_origin(256, 256, 224), (16, 16));
        assert_eq!(crop_origin(341, 256, 224), (58, 16));
        assert_eq!(crop_origin(224, 224, 224), (0, 0));
    }

    #[test]
    fn test_grayscale_input_is_expanded_to_rgb() {
        let preprocessor = Preprocessor::new(&test_config(224)).unwrap();
        let img = ImageBuffer::<image::Luma<u8>, Vec<u8>>::from_pixel(300, 300, image::Luma([128]));
        let image = DynamicImage::ImageLuma8(img);

        let tensor = preprocessor.process(&image);

        assert_eq!(tensor.shape(), &[3, 224, 224]);
        let expected = (128.0 / 255.0 - 0.485) / 0.229;
        assert!((tensor[[0, 10, 10]] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_normalization_round_trip() {
        let preprocessor = Preprocessor::new(&test_config(256)).unwrap();
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_fn(320, 280, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let image = DynamicImage::ImageRgb8(img.clone());

        let tensor = preprocessor.process(&image);

        // Recompute the resized and cropped pixels independently and check
        // that inverting the normalization recovers the [0,1] values.
        let (rw, rh) = resize_dims(320, 280, 256);
        let resized = imageops::resize(&img, rw, rh, FilterType::Triangle);
        let (cx, cy) = crop_origin(rw, rh, 224);
        let cropped = imageops::crop_imm(&resized, cx, cy, 224, 224).to_image();

        let mean = [0.485, 0.456, 0.406];
        let std = [0.229, 0.224, 0.225];
        for (x, y, pixel) in cropped.enumerate_pixels() {
            for c in 0..3 {
                let expected = pixel.0[c] as f32 / 255.;
                let recovered = tensor[[c, y as usize, x as usize]] * std[c] + mean[c];
                assert!(
                    (recovered - expected).abs() < 1e-5,
                    "channel {} at ({}, {}): {} vs {}",
                    c,
                    x,
                    y,
                    recovered,
                    expected
                );
            }
        }
    }
}
