use harris_core::{HarrisConfig, Image};
use crate::error::{HarrisError, HarrisResult};
use crate::types::ResponseMap;
use rayon::prelude::*;

/// Harris corner response computation over the full image
pub struct CornerResponse;

impl CornerResponse {
    /// Compute the normalized corner response map for an image
    pub fn compute(
        img: &Image,
        width: usize,
        height: usize,
        cfg: &HarrisConfig,
        use_parallel: bool,
    ) -> HarrisResult<ResponseMap> {
        let expected_len = width * height;
        if img.len() != expected_len {
            return Err(HarrisError::InvalidImageData {
                expected_len,
                actual_len: img.len(),
            });
        }

        let raw = if use_parallel {
            Self::compute_raw_parallel(img, width, height, cfg)
        } else {
            Self::compute_raw_sequential(img, width, height, cfg)
        };

        ResponseMap::from_values(Self::normalize(raw), width, height)
    }

    /// Row-parallel raw response computation
    fn compute_raw_parallel(img: &Image, width: usize, height: usize, cfg: &HarrisConfig) -> Vec<f64> {
        let rows: Vec<Vec<f64>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| Self::response_at(img, width, height, x, y, cfg))
                    .collect()
            })
            .collect();

        rows.into_iter().flatten().collect()
    }

    fn compute_raw_sequential(img: &Image, width: usize, height: usize, cfg: &HarrisConfig) -> Vec<f64> {
        let mut raw = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                raw.push(Self::response_at(img, width, height, x, y, cfg));
            }
        }
        raw
    }

    /// Raw Harris response at a pixel, zero within the border margin
    fn response_at(img: &Image, width: usize, height: usize, x: usize, y: usize, cfg: &HarrisConfig) -> f64 {
        let margin = Self::border_margin(cfg);
        if x < margin || y < margin || x + margin >= width || y + margin >= height {
            return 0.0;
        }

        let radius = (cfg.block_size / 2).max(1) as i32;

        let mut ixx = 0.0f64;
        let mut ixy = 0.0f64;
        let mut iyy = 0.0f64;

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let nx = (x as i32 + dx) as usize;
                let ny = (y as i32 + dy) as usize;
                let (gx, gy) = Self::gradients(img, width, height, nx, ny);

                ixx += (gx * gx) as f64;
                ixy += (gx * gy) as f64;
                iyy += (gy * gy) as f64;
            }
        }

        // Harris corner response: det(M) - k * trace(M)^2
        let det = ixx * iyy - ixy * ixy;
        let trace = ixx + iyy;
        let response = det - cfg.k * trace * trace;

        // Edges and flat regions read zero; only corner-like responses are kept
        if response > 0.0 {
            response
        } else {
            0.0
        }
    }

    /// Structure tensor window radius plus the Sobel ring
    fn border_margin(cfg: &HarrisConfig) -> usize {
        (cfg.block_size / 2).max(1) + 1
    }

    /// Image gradients using the 3x3 Sobel operator, zero on the outermost ring
    fn gradients(img: &Image, width: usize, height: usize, x: usize, y: usize) -> (f32, f32) {
        if x == 0 || y == 0 || x >= width - 1 || y >= height - 1 {
            return (0.0, 0.0);
        }

        // Sobel X kernel: [-1, 0, 1; -2, 0, 2; -1, 0, 1]
        let gx = (img[(y - 1) * width + (x + 1)] as f32) * 1.0
            + (img[y * width + (x + 1)] as f32) * 2.0
            + (img[(y + 1) * width + (x + 1)] as f32) * 1.0
            - (img[(y - 1) * width + (x - 1)] as f32) * 1.0
            - (img[y * width + (x - 1)] as f32) * 2.0
            - (img[(y + 1) * width + (x - 1)] as f32) * 1.0;

        // Sobel Y kernel: [-1, -2, -1; 0, 0, 0; 1, 2, 1]
        let gy = (img[(y + 1) * width + (x - 1)] as f32) * 1.0
            + (img[(y + 1) * width + x] as f32) * 2.0
            + (img[(y + 1) * width + (x + 1)] as f32) * 1.0
            - (img[(y - 1) * width + (x - 1)] as f32) * 1.0
            - (img[(y - 1) * width + x] as f32) * 2.0
            - (img[(y - 1) * width + (x + 1)] as f32) * 1.0;

        (gx / 8.0, gy / 8.0)
    }

    /// Min-max normalization to 0-255; raw responses are already clamped at
    /// zero, so only the maximum matters
    fn normalize(raw: Vec<f64>) -> Vec<f32> {
        let max = raw.iter().cloned().fold(0.0f64, f64::max);
        if max <= 0.0 {
            return vec![0.0; raw.len()];
        }

        let scale = 255.0 / max;
        raw.into_iter().map(|r| (r * scale) as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> HarrisConfig {
        HarrisConfig {
            n_threads: 1,
            ..HarrisConfig::default()
        }
    }

    /// Dark background with a bright square spanning the central quarters
    fn create_corner_image(width: usize, height: usize) -> Image {
        let mut img = vec![30u8; width * height];
        for y in height / 4..3 * height / 4 {
            for x in width / 4..3 * width / 4 {
                img[y * width + x] = 220;
            }
        }
        img
    }

    #[test]
    fn test_flat_image_has_zero_response() {
        let cfg = create_test_config();
        let img = vec![128u8; 32 * 32];
        let map = CornerResponse::compute(&img, 32, 32, &cfg, false).unwrap();
        assert!(map.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_corner_image_peaks_near_square_corner() {
        let cfg = create_test_config();
        let img = create_corner_image(32, 32);
        let map = CornerResponse::compute(&img, 32, 32, &cfg, false).unwrap();

        let mut best = (0usize, 0usize, 0.0f32);
        for y in 0..32 {
            for x in 0..32 {
                if map.get(x, y) > best.2 {
                    best = (x, y, map.get(x, y));
                }
            }
        }
        assert!(best.2 > 0.0);

        let corners: [(i32, i32); 4] = [(8, 8), (23, 8), (8, 23), (23, 23)];
        let near_corner = corners.iter().any(|&(cx, cy)| {
            (best.0 as i32 - cx).abs() <= 2 && (best.1 as i32 - cy).abs() <= 2
        });
        assert!(near_corner, "peak at ({}, {}) is not near a square corner", best.0, best.1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cfg = create_test_config();
        let img = create_corner_image(48, 36);
        let parallel = CornerResponse::compute(&img, 48, 36, &cfg, true).unwrap();
        let sequential = CornerResponse::compute(&img, 48, 36, &cfg, false).unwrap();
        assert_eq!(parallel.values(), sequential.values());
    }

    #[test]
    fn test_normalized_range_tops_out_at_255() {
        let cfg = create_test_config();
        let img = create_corner_image(32, 32);
        let map = CornerResponse::compute(&img, 32, 32, &cfg, false).unwrap();

        let max = map.values().iter().cloned().fold(0.0f32, f32::max);
        assert!((max - 255.0).abs() < 1e-3);
        assert!(map.values().iter().all(|&v| (0.0..=255.01).contains(&v)));
    }

    #[test]
    fn test_border_margin_reads_zero() {
        let cfg = create_test_config();
        let img = create_corner_image(32, 32);
        let map = CornerResponse::compute(&img, 32, 32, &cfg, false).unwrap();

        for i in 0..32 {
            assert_eq!(map.get(i, 0), 0.0);
            assert_eq!(map.get(i, 1), 0.0);
            assert_eq!(map.get(i, 30), 0.0);
            assert_eq!(map.get(i, 31), 0.0);
            assert_eq!(map.get(0, i), 0.0);
            assert_eq!(map.get(1, i), 0.0);
            assert_eq!(map.get(30, i), 0.0);
            assert_eq!(map.get(31, i), 0.0);
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let cfg = create_test_config();
        let img = vec![0u8; 100];
        let result = CornerResponse::compute(&img, 32, 32, &cfg, false);
        assert!(matches!(result, Err(HarrisError::InvalidImageData { .. })));
    }
}
