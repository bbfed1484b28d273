use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised before a population is built.
///
/// Ticking never fails; everything that can go wrong is caught once by
/// [`crate::config::SimConfig::validate`].
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid numeric or naming parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Every group ratio is zero, so no share can be computed.
    #[error("group ratios must sum to a positive value")]
    ZeroRatioSum,
}
