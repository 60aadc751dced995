use tandem_foundation::RegionKind;
use thiserror::Error;

/// Configuration mistakes, reported when a region or config is installed
/// rather than on first scroll.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatorError {
    #[error("{region:?} region scrolls horizontally; only vertical regions can be coordinated")]
    UnsupportedOrientation { region: RegionKind },

    #[error("the same region cannot be installed as both top and bottom")]
    DuplicateRegion,

    #[error("invalid scroll configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
