use harris_core::{Image, KeypointSet};
use crate::error::HarrisResult;
use crate::types::ResponseMap;
use crate::detector::HarrisDetector;
use crate::builder::DetectorBuilder;
use crate::filter::KeypointFilter;

/// A Harris detector paired with the builder it was configured from.
///
/// Runs the detector and applies the post-suppression keypoint cap when
/// one was requested.
#[derive(Debug, Clone)]
pub struct ConfiguredDetector {
    pub(crate) detector: HarrisDetector,
    pub(crate) config: DetectorBuilder,
}

impl ConfiguredDetector {
    /// Detect keypoints and apply the configured keypoint cap
    pub fn detect_keypoints(&self, img: &Image) -> HarrisResult<KeypointSet> {
        let mut keypoints = self.detector.detect_keypoints(img)?;
        if let Some(max_keypoints) = self.config.max_keypoints() {
            KeypointFilter::retain_best(&mut keypoints, max_keypoints);
        }
        Ok(keypoints)
    }

    /// Compute the normalized response map without suppression
    pub fn compute_response_map(&self, img: &Image) -> HarrisResult<ResponseMap> {
        self.detector.compute_response_map(img)
    }

    /// Get a reference to the underlying `HarrisDetector`
    pub fn detector(&self) -> &HarrisDetector {
        &self.detector
    }

    /// Get a summary of the detector's configuration
    pub fn config_summary(&self) -> String {
        self.config.summary()
    }

    /// Get the image dimensions the detector is configured for
    pub fn dimensions(&self) -> (usize, usize) {
        self.detector.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_keypoint_cap_is_applied() {
        let img = create_corner_image(32, 32);

        let uncapped = DetectorBuilder::new(32, 32)
            .threads(1)
            .build()
            .unwrap()
            .detect_keypoints(&img)
            .unwrap();
        assert!(uncapped.len() > 1);

        let capped = DetectorBuilder::new(32, 32)
            .threads(1)
            .retain_best(1)
            .build()
            .unwrap()
            .detect_keypoints(&img)
            .unwrap();
        assert_eq!(capped.len(), 1);

        let strongest = uncapped
            .iter()
            .map(|kp| kp.response)
            .fold(0.0f32, f32::max);
        assert_eq!(capped[0].response, strongest);
    }

    #[test]
    fn test_uncapped_detection_matches_plain_detector() {
        let img = create_corner_image(32, 32);
        let configured = DetectorBuilder::new(32, 32).threads(1).build().unwrap();
        let plain = configured.detector().detect_keypoints(&img).unwrap();
        let through_wrapper = configured.detect_keypoints(&img).unwrap();
        assert_eq!(plain, through_wrapper);
    }

    #[test]
    fn test_response_map_passthrough() {
        let img = create_corner_image(32, 32);
        let configured = DetectorBuilder::new(32, 32).threads(1).build().unwrap();
        let map = configured.compute_response_map(&img).unwrap();
        assert_eq!(map.width(), 32);
        assert_eq!(map.height(), 32);
    }

    #[test]
    fn test_config_summary_mentions_dimensions() {
        let configured = DetectorBuilder::new(32, 32).build().unwrap();
        assert!(configured.config_summary().contains("32x32"));
    }
}
