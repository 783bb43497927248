//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Buffer construction or access failed.
    #[error(transparent)]
    Core(#[from] gallery_core::Error),

    /// Kernel has an even or zero side length, or the wrong number of weights.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffers that must share dimensions do not.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::PixelBuffer;

    fn blank(width: u32, height: u32) -> OpsResult<PixelBuffer> {
        Ok(PixelBuffer::new(width, height)?)
    }

    #[test]
    fn test_core_errors_convert() {
        let err = blank(0, 4).unwrap_err();
        assert!(matches!(err, OpsError::Core(gallery_core::Error::InvalidDimensions { .. })));
        // Transparent: the message is the core error's.
        let core = gallery_core::Error::out_of_bounds(9, 1, 4, 4);
        assert_eq!(OpsError::from(core.clone()).to_string(), core.to_string());
    }

    #[test]
    fn test_messages() {
        let err = OpsError::InvalidKernel("side length must be odd and positive, got 4".into());
        assert_eq!(err.to_string(), "invalid kernel: side length must be odd and positive, got 4");
    }
}
