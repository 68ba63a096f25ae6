/// Row-major 8-bit grayscale image
pub type Image = Vec<u8>;

/// Keypoint ≙ Harris corner with response score and neighborhood diameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,        // Column coordinate
    pub y: f32,        // Row coordinate
    pub response: f32, // Corner response on the normalized 0-255 scale
    pub size: f32,     // Neighborhood diameter in pixels
}

/// Keypoints in discovery order
pub type KeypointSet = Vec<Keypoint>;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarrisConfig {
    pub block_size: usize,
    pub aperture_size: usize,
    pub k: f64,
    pub min_response: f32,
    pub max_overlap: f32,
    pub n_threads: usize,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            block_size: 2,
            aperture_size: 3,
            k: 0.04,
            min_response: 100.0,
            max_overlap: 0.0,
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
