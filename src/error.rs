use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Caller handed an object that cannot play the requested role, such as an
    /// axis from another figure or an intensity scale with unusable limits.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
