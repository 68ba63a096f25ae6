use harris_core::{HarrisConfig, Image, KeypointSet};
use crate::error::{HarrisError, HarrisResult};
use crate::types::ResponseMap;
use crate::response::CornerResponse;
use crate::suppression::KeypointSuppressor;

/// Harris corner detector with greedy overlap suppression
#[derive(Debug, Clone)]
pub struct HarrisDetector {
    cfg: HarrisConfig,
    w: usize,
    h: usize,
}

impl HarrisDetector {
    /// Smallest image with response pixels outside the border margin
    pub const MIN_IMAGE_SIZE: usize = 5;

    /// Creates a new Harris detector with validation
    pub fn new(cfg: HarrisConfig, width: usize, height: usize) -> HarrisResult<Self> {
        if width == 0 || height == 0 {
            return Err(HarrisError::InvalidImageSize { width, height });
        }

        if width < Self::MIN_IMAGE_SIZE || height < Self::MIN_IMAGE_SIZE {
            return Err(HarrisError::ImageTooSmall {
                width,
                height,
                min_size: Self::MIN_IMAGE_SIZE,
            });
        }

        if cfg.block_size == 0 {
            return Err(HarrisError::InvalidBlockSize(cfg.block_size));
        }

        // Gradients are fixed to the 3x3 Sobel kernel
        if cfg.aperture_size != 3 {
            return Err(HarrisError::InvalidApertureSize(cfg.aperture_size));
        }

        if !cfg.k.is_finite() || cfg.k <= 0.0 || cfg.k >= 0.25 {
            return Err(HarrisError::InvalidHarrisK(cfg.k));
        }

        if !cfg.min_response.is_finite() || cfg.min_response < 0.0 {
            return Err(HarrisError::InvalidMinResponse(cfg.min_response));
        }

        if !cfg.max_overlap.is_finite() || cfg.max_overlap < 0.0 || cfg.max_overlap >= 1.0 {
            return Err(HarrisError::InvalidOverlapThreshold(cfg.max_overlap));
        }

        Ok(Self { cfg, w: width, h: height })
    }

    /// Validates image data before processing
    fn validate_image(&self, img: &Image) -> HarrisResult<()> {
        let expected_len = self.w * self.h;
        if img.len() != expected_len {
            return Err(HarrisError::InvalidImageData {
                expected_len,
                actual_len: img.len(),
            });
        }
        Ok(())
    }

    /// Detect keypoints: response map computation followed by suppression
    pub fn detect_keypoints(&self, img: &Image) -> HarrisResult<KeypointSet> {
        let map = self.compute_response_map(img)?;
        KeypointSuppressor::suppress(
            &map,
            self.cfg.min_response,
            self.cfg.max_overlap,
            self.neighborhood(),
        )
    }

    /// Compute the normalized corner response map without suppression
    pub fn compute_response_map(&self, img: &Image) -> HarrisResult<ResponseMap> {
        self.validate_image(img)?;
        CornerResponse::compute(img, self.w, self.h, &self.cfg, cfg!(feature = "parallel"))
    }

    /// Keypoint neighborhood diameter derived from the Sobel aperture
    pub fn neighborhood(&self) -> f32 {
        (2 * self.cfg.aperture_size) as f32
    }

    /// Get detector configuration
    pub fn config(&self) -> &HarrisConfig {
        &self.cfg
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }
}
