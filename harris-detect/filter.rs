use harris_core::KeypointSet;

/// Post-suppression keypoint filtering
pub struct KeypointFilter;

impl KeypointFilter {
    /// Keep the `max_keypoints` strongest keypoints and drop the rest.
    /// Equal responses keep their discovery order.
    pub fn retain_best(keypoints: &mut KeypointSet, max_keypoints: usize) {
        if keypoints.len() <= max_keypoints {
            return;
        }

        keypoints.sort_by(|a, b| {
            b.response
                .partial_cmp(&a.response)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        keypoints.truncate(max_keypoints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harris_core::Keypoint;

    fn keypoint(x: f32, response: f32) -> Keypoint {
        Keypoint { x, y: 0.0, response, size: 6.0 }
    }

    #[test]
    fn test_retain_best_keeps_strongest() {
        let mut kps = vec![
            keypoint(0.0, 120.0),
            keypoint(1.0, 240.0),
            keypoint(2.0, 180.0),
            keypoint(3.0, 150.0),
        ];
        KeypointFilter::retain_best(&mut kps, 2);

        assert_eq!(kps.len(), 2);
        assert_eq!(kps[0].response, 240.0);
        assert_eq!(kps[1].response, 180.0);
    }

    #[test]
    fn test_retain_best_is_noop_when_under_limit() {
        let mut kps = vec![keypoint(0.0, 120.0), keypoint(1.0, 240.0)];
        KeypointFilter::retain_best(&mut kps, 10);

        assert_eq!(kps.len(), 2);
        assert_eq!(kps[0].response, 120.0);
    }

    #[test]
    fn test_retain_best_ties_keep_discovery_order() {
        let mut kps = vec![
            keypoint(0.0, 150.0),
            keypoint(1.0, 150.0),
            keypoint(2.0, 150.0),
        ];
        KeypointFilter::retain_best(&mut kps, 2);

        assert_eq!(kps.len(), 2);
        assert_eq!(kps[0].x, 0.0);
        assert_eq!(kps[1].x, 1.0);
    }

    #[test]
    fn test_retain_best_zero_clears_the_set() {
        let mut kps = vec![keypoint(0.0, 120.0)];
        KeypointFilter::retain_best(&mut kps, 0);
        assert!(kps.is_empty());
    }
}
