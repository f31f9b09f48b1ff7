/// Convenience result type used across the crate.
pub type GardenResult<T> = Result<T, GardenError>;

/// Top-level error taxonomy used by the extraction and capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum GardenError {
    /// Malformed or unreadable input image.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Invalid user-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The runtime cannot provide snapshot or stream-encoding capability.
    #[error("capture unsupported: {0}")]
    CaptureUnsupported(String),

    /// A capture session is already in flight.
    #[error("capture busy: {0}")]
    CaptureBusy(String),

    /// Mid-capture fault (snapshot, compositing or encoder failure).
    #[error("encoding fault: {0}")]
    EncodingFault(String),

    /// The finished recording is implausibly small.
    #[error("encoding too small: artifact is {bytes} bytes, expected at least {floor}")]
    EncodingTooSmall {
        /// Size of the produced artifact.
        bytes: usize,
        /// Minimum accepted size.
        floor: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse error classification reported to capture observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorKind {
    /// See [`GardenError::ImageDecode`].
    ImageDecode,
    /// See [`GardenError::Validation`].
    Validation,
    /// See [`GardenError::CaptureUnsupported`].
    CaptureUnsupported,
    /// See [`GardenError::CaptureBusy`].
    CaptureBusy,
    /// See [`GardenError::EncodingFault`].
    EncodingFault,
    /// See [`GardenError::EncodingTooSmall`].
    EncodingTooSmall,
    /// Anything else.
    Other,
}

impl GardenError {
    /// Build a [`GardenError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`GardenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GardenError::CaptureUnsupported`] value.
    pub fn capture_unsupported(msg: impl Into<String>) -> Self {
        Self::CaptureUnsupported(msg.into())
    }

    /// Build a [`GardenError::CaptureBusy`] value.
    pub fn capture_busy(msg: impl Into<String>) -> Self {
        Self::CaptureBusy(msg.into())
    }

    /// Build a [`GardenError::EncodingFault`] value.
    pub fn encoding_fault(msg: impl Into<String>) -> Self {
        Self::EncodingFault(msg.into())
    }

    /// Classify this error for observers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ImageDecode(_) => ErrorKind::ImageDecode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::CaptureUnsupported(_) => ErrorKind::CaptureUnsupported,
            Self::CaptureBusy(_) => ErrorKind::CaptureBusy,
            Self::EncodingFault(_) => ErrorKind::EncodingFault,
            Self::EncodingTooSmall { .. } => ErrorKind::EncodingTooSmall,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
