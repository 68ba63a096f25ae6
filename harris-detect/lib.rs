pub mod error;
pub mod types;
pub mod response;
pub mod suppression;
pub mod filter;
pub mod detector;
pub mod config;
pub mod builder;
pub mod configured_detector;

pub use error::{HarrisError, HarrisResult};
pub use types::ResponseMap;
pub use response::CornerResponse;
pub use suppression::KeypointSuppressor;
pub use filter::KeypointFilter;
pub use detector::HarrisDetector;
pub use config::DetectorConfig;
pub use builder::DetectorBuilder;
pub use configured_detector::ConfiguredDetector;
