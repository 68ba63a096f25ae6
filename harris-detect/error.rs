#[derive(Debug, Clone)]
pub enum HarrisError {
    InvalidImageSize { width: usize, height: usize },
    InvalidImageData { expected_len: usize, actual_len: usize },
    ImageTooSmall { width: usize, height: usize, min_size: usize },
    InvalidBlockSize(usize),
    InvalidApertureSize(usize),
    InvalidHarrisK(f64),
    InvalidMinResponse(f32),
    InvalidOverlapThreshold(f32),
    InvalidNeighborhood(f32),
}

impl std::fmt::Display for HarrisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarrisError::InvalidImageSize { width, height } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", width, height)
            }
            HarrisError::InvalidImageData { expected_len, actual_len } => {
                write!(f, "Image data length mismatch: expected {}, got {}", expected_len, actual_len)
            }
            HarrisError::ImageTooSmall { width, height, min_size } => {
                write!(f, "Image {}x{} too small (minimum {}x{})", width, height, min_size, min_size)
            }
            HarrisError::InvalidBlockSize(b) => {
                write!(f, "Invalid block size: {} (must be > 0)", b)
            }
            HarrisError::InvalidApertureSize(a) => {
                write!(f, "Invalid aperture size: {} (only the 3x3 Sobel kernel is supported)", a)
            }
            HarrisError::InvalidHarrisK(k) => {
                write!(f, "Invalid Harris k: {} (must be within (0, 0.25))", k)
            }
            HarrisError::InvalidMinResponse(r) => {
                write!(f, "Invalid minimum response: {} (must be finite and >= 0)", r)
            }
            HarrisError::InvalidOverlapThreshold(t) => {
                write!(f, "Invalid overlap threshold: {} (must be within [0, 1))", t)
            }
            HarrisError::InvalidNeighborhood(n) => {
                write!(f, "Invalid neighborhood diameter: {} (must be > 0)", n)
            }
        }
    }
}

impl std::error::Error for HarrisError {}

pub type HarrisResult<T> = Result<T, HarrisError>;
