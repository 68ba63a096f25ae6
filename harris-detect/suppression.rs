use harris_core::{Keypoint, KeypointSet};
use crate::error::{HarrisError, HarrisResult};
use crate::types::ResponseMap;

/// Greedy overlap-based suppression of a corner response map
pub struct KeypointSuppressor;

impl KeypointSuppressor {
    /// Scan the response map in row-major order and build the keypoint set.
    ///
    /// Pixels with response strictly above `min_response` become candidates
    /// with a fixed `neighborhood` diameter. Each candidate is compared
    /// against the existing set in order; the first keypoint whose overlap
    /// exceeds `max_overlap` settles the candidate (overwritten in place if
    /// the candidate is strictly stronger, dropped otherwise). Candidates
    /// without a conflict are appended, so set order is discovery order.
    pub fn suppress(
        map: &ResponseMap,
        min_response: f32,
        max_overlap: f32,
        neighborhood: f32,
    ) -> HarrisResult<KeypointSet> {
        if !min_response.is_finite() || min_response < 0.0 {
            return Err(HarrisError::InvalidMinResponse(min_response));
        }
        if !max_overlap.is_finite() || max_overlap < 0.0 || max_overlap >= 1.0 {
            return Err(HarrisError::InvalidOverlapThreshold(max_overlap));
        }
        if !neighborhood.is_finite() || neighborhood <= 0.0 {
            return Err(HarrisError::InvalidNeighborhood(neighborhood));
        }

        if map.is_empty() {
            return Ok(KeypointSet::new());
        }

        let mut keypoints = KeypointSet::new();

        for y in 0..map.height() {
            for x in 0..map.width() {
                let response = map.get(x, y);
                if response <= min_response {
                    continue;
                }

                let candidate = Keypoint {
                    x: x as f32,
                    y: y as f32,
                    response,
                    size: neighborhood,
                };

                let mut conflict = false;
                for existing in keypoints.iter_mut() {
                    if Self::overlap(&candidate, existing) > max_overlap {
                        conflict = true;
                        // First conflict settles the candidate; later set
                        // entries are never examined
                        if candidate.response > existing.response {
                            *existing = candidate;
                        }
                        break;
                    }
                }

                if !conflict {
                    keypoints.push(candidate);
                }
            }
        }

        Ok(keypoints)
    }

    /// Intersection-over-union of two keypoint neighborhoods, treated as
    /// circles of diameter `size`: 0 for disjoint circles, 1 for identical
    /// ones, area ratio when one circle contains the other.
    pub fn overlap(a: &Keypoint, b: &Keypoint) -> f32 {
        let ra = (a.size * 0.5) as f64;
        let rb = (b.size * 0.5) as f64;
        if ra <= 0.0 || rb <= 0.0 {
            return 0.0;
        }

        let dx = (a.x - b.x) as f64;
        let dy = (a.y - b.y) as f64;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist >= ra + rb {
            return 0.0;
        }

        let ra_sq = ra * ra;
        let rb_sq = rb * rb;

        // One neighborhood contained in the other: no intersection points
        if dist + ra.min(rb) <= ra.max(rb) {
            return (ra_sq.min(rb_sq) / ra_sq.max(rb_sq)) as f32;
        }

        // Lens area from the two circular segments
        let cos_a = ((ra_sq + dist * dist - rb_sq) / (2.0 * ra * dist)).clamp(-1.0, 1.0);
        let cos_b = ((rb_sq + dist * dist - ra_sq) / (2.0 * rb * dist)).clamp(-1.0, 1.0);
        let alpha = cos_a.acos();
        let beta = cos_b.acos();

        let seg_a = ra_sq * (alpha - alpha.sin() * cos_a);
        let seg_b = rb_sq * (beta - beta.sin() * cos_b);
        let intersection = seg_a + seg_b;
        let union = std::f64::consts::PI * (ra_sq + rb_sq) - intersection;

        (intersection / union) as f32
    }
}
