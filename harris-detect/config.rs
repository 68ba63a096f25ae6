use harris_core::HarrisConfig;
use crate::error::{HarrisError, HarrisResult};
use crate::builder::DetectorBuilder;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// Complete detector configuration with all settings.
///
/// Scalar fields come before the nested `core` table so the TOML
/// serializer emits values ahead of tables.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Image dimensions
    pub width: usize,
    pub height: usize,
    /// Optional cap on the keypoints kept after suppression
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max_keypoints: Option<usize>,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
    /// Core Harris configuration
    pub core: HarrisConfig,
}

impl DetectorConfig {
    /// Create new configuration with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_keypoints: None,
            name: None,
            description: None,
            version: None,
            core: HarrisConfig {
                block_size: 2,
                aperture_size: 3,
                k: 0.04,
                min_response: 100.0,
                max_overlap: 0.0,
                n_threads: 1,
            },
        }
    }

    /// Dense preset with permissive thresholds for maximum coverage
    pub fn dense_preset(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_keypoints: None,
            name: Some("Dense".to_string()),
            description: Some("Permissive thresholds for maximum keypoint coverage".to_string()),
            version: Some("1.0".to_string()),
            core: HarrisConfig {
                block_size: 2,
                aperture_size: 3,
                k: 0.04,
                min_response: 50.0,
                max_overlap: 0.4,
                n_threads: num_cpus::get(),
            },
        }
    }

    /// Sparse preset with strict thresholds and a capped keypoint count
    pub fn sparse_preset(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_keypoints: Some(50),
            name: Some("Sparse".to_string()),
            description: Some("Strict thresholds with a capped keypoint count".to_string()),
            version: Some("1.0".to_string()),
            core: HarrisConfig {
                block_size: 2,
                aperture_size: 3,
                k: 0.04,
                min_response: 150.0,
                max_overlap: 0.0,
                n_threads: num_cpus::get(),
            },
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self.version = Some("1.0".to_string());
        self
    }

    /// Convert to DetectorBuilder for further customization
    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: {}x{}, block={}, aperture={}, k={:.3}, min_response={:.1}, max_overlap={:.2}, threads={}, max_keypoints={}",
            self.width,
            self.height,
            self.core.block_size,
            self.core.aperture_size,
            self.core.k,
            self.core.min_response,
            self.core.max_overlap,
            self.core.n_threads,
            self.max_keypoints
                .map_or("none".to_string(), |n| n.to_string()),
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> HarrisResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HarrisError::InvalidImageSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.core.block_size == 0 {
            return Err(HarrisError::InvalidBlockSize(self.core.block_size));
        }
        if self.core.aperture_size != 3 {
            return Err(HarrisError::InvalidApertureSize(self.core.aperture_size));
        }
        if !self.core.k.is_finite() || self.core.k <= 0.0 || self.core.k >= 0.25 {
            return Err(HarrisError::InvalidHarrisK(self.core.k));
        }
        if !self.core.min_response.is_finite() || self.core.min_response < 0.0 {
            return Err(HarrisError::InvalidMinResponse(self.core.min_response));
        }
        if !self.core.max_overlap.is_finite()
            || self.core.max_overlap < 0.0
            || self.core.max_overlap >= 1.0
        {
            return Err(HarrisError::InvalidOverlapThreshold(self.core.max_overlap));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_is_valid() {
        let config = DetectorConfig::new(640, 480);
        assert!(config.validate().is_ok());
        assert_eq!(config.core.min_response, 100.0);
        assert_eq!(config.core.max_overlap, 0.0);
        assert!(config.max_keypoints.is_none());
    }

    #[test]
    fn test_presets_are_valid() {
        let dense = DetectorConfig::dense_preset(640, 480);
        assert!(dense.validate().is_ok());
        assert_eq!(dense.name.as_deref(), Some("Dense"));
        assert!(dense.core.min_response < 100.0);

        let sparse = DetectorConfig::sparse_preset(640, 480);
        assert!(sparse.validate().is_ok());
        assert_eq!(sparse.max_keypoints, Some(50));
        assert!(sparse.core.min_response > 100.0);
    }

    #[test]
    fn test_with_metadata() {
        let config = DetectorConfig::new(64, 48).with_metadata("Custom", "Test profile");
        assert_eq!(config.name.as_deref(), Some("Custom"));
        assert_eq!(config.description.as_deref(), Some("Test profile"));
        assert_eq!(config.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_summary_mentions_dimensions_and_thresholds() {
        let summary = DetectorConfig::new(640, 480).summary();
        assert!(summary.contains("640x480"));
        assert!(summary.contains("min_response=100.0"));
        assert!(summary.contains("max_keypoints=none"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DetectorConfig::new(0, 480);
        assert!(matches!(config.validate(), Err(HarrisError::InvalidImageSize { .. })));

        config = DetectorConfig::new(640, 480);
        config.core.max_overlap = 1.0;
        assert!(matches!(config.validate(), Err(HarrisError::InvalidOverlapThreshold(_))));

        config = DetectorConfig::new(640, 480);
        config.core.k = 0.25;
        assert!(matches!(config.validate(), Err(HarrisError::InvalidHarrisK(_))));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_json_round_trip() {
        let config = DetectorConfig::sparse_preset(640, 480);
        let json = config.to_json().unwrap();
        let restored = DetectorConfig::from_json(&json).unwrap();

        assert_eq!(restored.width, config.width);
        assert_eq!(restored.height, config.height);
        assert_eq!(restored.max_keypoints, config.max_keypoints);
        assert_eq!(restored.name, config.name);
        assert_eq!(restored.core.min_response, config.core.min_response);
        assert_eq!(restored.core.max_overlap, config.core.max_overlap);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_toml_round_trip() {
        let config = DetectorConfig::dense_preset(640, 480);
        let toml_str = config.to_toml().unwrap();
        let restored = DetectorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(restored.width, config.width);
        assert_eq!(restored.core.block_size, config.core.block_size);
        assert_eq!(restored.core.min_response, config.core.min_response);
        assert_eq!(restored.name, config.name);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_invalid_config_fails_to_load() {
        let mut config = DetectorConfig::new(640, 480);
        config.core.max_overlap = 0.5;
        let mut json = config.to_json().unwrap();
        json = json.replace("0.5", "1.5");
        assert!(DetectorConfig::from_json(&json).is_err());
    }
}
