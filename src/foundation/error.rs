/// Convenience result type used across fourcut.
pub type FourcutResult<T> = Result<T, FourcutError>;

/// Top-level error taxonomy used by compositing and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum FourcutError {
    /// Invalid user-provided configuration or image data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Slot index outside `0..=3`.
    #[error("invalid slot index {0} (expected 0..=3)")]
    InvalidSlotIndex(usize),

    /// `render` was invoked before all four base images were present.
    #[error("premature render: {provided} of 4 base images provided")]
    PrematureRender {
        /// Number of base images the caller supplied.
        provided: usize,
    },

    /// The output drawing surface could not be allocated.
    #[error("render surface allocation failed: {0}")]
    SurfaceAllocation(String),

    /// An image source adapter failed to decode an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// No usable font could be resolved for the caption.
    #[error("font error: {0}")]
    Font(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FourcutError {
    /// Build a [`FourcutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FourcutError::SurfaceAllocation`] value.
    pub fn surface_allocation(msg: impl Into<String>) -> Self {
        Self::SurfaceAllocation(msg.into())
    }

    /// Build a [`FourcutError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FourcutError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
