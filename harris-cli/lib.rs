use harris_core::{HarrisConfig, Image, Keypoint};
use harris_detect::{HarrisDetector, HarrisError, ResponseMap};

pub use harris_core::{self, init_thread_pool, Image as HarrisImage, Keypoint as HarrisKeypoint, HarrisConfig as Config};

#[derive(Debug)]
pub enum PipelineError {
    Harris(HarrisError),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Harris(e) => write!(f, "Harris error: {}", e),
            PipelineError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<HarrisError> for PipelineError {
    fn from(err: HarrisError) -> Self {
        PipelineError::Harris(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for PipelineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        PipelineError::ThreadPool(err)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// High-level Harris corner detector wired to a shared rayon thread pool
pub struct HarrisPipeline {
    detector: HarrisDetector,
}

impl HarrisPipeline {
    /// Create a new pipeline with the given configuration and image dimensions
    pub fn new(cfg: HarrisConfig, width: usize, height: usize) -> PipelineResult<Self> {
        // Initialize thread pool
        init_thread_pool(cfg.n_threads)?;

        Self::with_existing_pool(cfg, width, height)
    }

    /// Create a pipeline without touching the global thread pool. The pool
    /// must already be initialized (or rayon's default is used).
    pub fn with_existing_pool(cfg: HarrisConfig, width: usize, height: usize) -> PipelineResult<Self> {
        let detector = HarrisDetector::new(cfg, width, height)?;

        Ok(Self { detector })
    }

    /// Detect corner keypoints in a grayscale image
    pub fn detect_keypoints(&self, img: &Image) -> PipelineResult<Vec<Keypoint>> {
        Ok(self.detector.detect_keypoints(img)?)
    }

    /// Compute the normalized corner response map without suppression
    pub fn response_map(&self, img: &Image) -> PipelineResult<ResponseMap> {
        Ok(self.detector.compute_response_map(img)?)
    }

    /// Get detector configuration
    pub fn config(&self) -> &HarrisConfig {
        self.detector.config()
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        self.detector.dimensions()
    }
}
