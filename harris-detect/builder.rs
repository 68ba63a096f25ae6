use harris_core::HarrisConfig;
use crate::error::HarrisResult;
use crate::detector::HarrisDetector;
use crate::config::DetectorConfig;
use crate::configured_detector::ConfiguredDetector;

/// Builder for creating a `ConfiguredDetector`
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: HarrisConfig,
    width: usize,
    height: usize,
    max_keypoints: Option<usize>,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            config: HarrisConfig::default(),
            width,
            height,
            max_keypoints: None,
        }
    }

    /// Set the structure tensor block size
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Set the Sobel aperture size
    pub fn aperture_size(mut self, aperture_size: usize) -> Self {
        self.config.aperture_size = aperture_size;
        self
    }

    /// Set the Harris free parameter k
    pub fn harris_k(mut self, k: f64) -> Self {
        self.config.k = k;
        self
    }

    /// Set the minimum corner response for candidate keypoints
    pub fn min_response(mut self, min_response: f32) -> Self {
        self.config.min_response = min_response;
        self
    }

    /// Set the maximum tolerated neighborhood overlap
    pub fn max_overlap(mut self, max_overlap: f32) -> Self {
        self.config.max_overlap = max_overlap;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Keep only the strongest keypoints after suppression
    pub fn retain_best(mut self, max_keypoints: usize) -> Self {
        self.max_keypoints = Some(max_keypoints);
        self
    }

    /// Apply the dense preset (permissive thresholds, more keypoints)
    pub fn preset_dense(mut self) -> Self {
        let preset = DetectorConfig::dense_preset(self.width, self.height);
        self.config = preset.core;
        self.max_keypoints = preset.max_keypoints;
        self
    }

    /// Apply the sparse preset (strict thresholds, capped keypoint count)
    pub fn preset_sparse(mut self) -> Self {
        let preset = DetectorConfig::sparse_preset(self.width, self.height);
        self.config = preset.core;
        self.max_keypoints = preset.max_keypoints;
        self
    }

    /// Build the `ConfiguredDetector`
    pub fn build(self) -> HarrisResult<ConfiguredDetector> {
        let detector = HarrisDetector::new(self.config.clone(), self.width, self.height)?;
        Ok(ConfiguredDetector {
            detector,
            config: self,
        })
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.clone().to_config().summary()
    }

    /// Create a builder from an existing `DetectorConfig`
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.core,
            width: config.width,
            height: config.height,
            max_keypoints: config.max_keypoints,
        }
    }

    /// Convert the builder into a `DetectorConfig`
    pub fn to_config(self) -> DetectorConfig {
        DetectorConfig {
            width: self.width,
            height: self.height,
            max_keypoints: self.max_keypoints,
            name: None,
            description: None,
            version: None,
            core: self.config,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_keypoints(&self) -> Option<usize> {
        self.max_keypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_build() {
        let configured = DetectorBuilder::new(64, 48).build().unwrap();
        assert_eq!(configured.dimensions(), (64, 48));
        assert_eq!(configured.detector().config().min_response, 100.0);
    }

    #[test]
    fn test_builder_setters_apply() {
        let configured = DetectorBuilder::new(64, 48)
            .min_response(120.0)
            .max_overlap(0.3)
            .harris_k(0.06)
            .threads(2)
            .retain_best(25)
            .build()
            .unwrap();

        let cfg = configured.detector().config();
        assert_eq!(cfg.min_response, 120.0);
        assert_eq!(cfg.max_overlap, 0.3);
        assert_eq!(cfg.k, 0.06);
        assert_eq!(cfg.n_threads, 2);
    }

    #[test]
    fn test_builder_rejects_invalid_settings() {
        let result = DetectorBuilder::new(64, 48).max_overlap(1.0).build();
        assert!(result.is_err());

        let result = DetectorBuilder::new(64, 48).aperture_size(7).build();
        assert!(result.is_err());

        let result = DetectorBuilder::new(2, 2).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_sparse_caps_keypoints() {
        let builder = DetectorBuilder::new(64, 48).preset_sparse();
        assert_eq!(builder.max_keypoints(), Some(50));
    }

    #[test]
    fn test_config_round_trip() {
        let config = DetectorBuilder::new(64, 48)
            .min_response(75.0)
            .retain_best(10)
            .to_config();

        let builder = DetectorBuilder::from_config(config);
        assert_eq!(builder.width(), 64);
        assert_eq!(builder.height(), 48);
        assert_eq!(builder.max_keypoints(), Some(10));

        let rebuilt = builder.to_config();
        assert_eq!(rebuilt.core.min_response, 75.0);
    }

    #[test]
    fn test_summary_reflects_settings() {
        let summary = DetectorBuilder::new(64, 48).min_response(42.0).summary();
        assert!(summary.contains("64x48"));
        assert!(summary.contains("min_response=42.0"));
    }
}
