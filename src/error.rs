//! Errors surfaced by the session.
//!
//! Only round setup can fail: a deck is never built over an image the asset
//! source could not resolve. Everything else in the engine is a silent no-op
//! (invalid clicks) or logged and swallowed (audio).

use crate::core::ImageId;

/// Why a round could not start.
///
/// The session stays in `Phase::NotStarted` when `start` errs; the only
/// recovery path is another start/restart after the host fixes the assets.
#[derive(Debug)]
pub enum StartError {
    /// An image asset could not be fetched or decoded.
    Asset {
        /// The image that failed.
        image: ImageId,
        /// Underlying platform error from the `AssetSource`.
        source: anyhow::Error,
    },
}

impl std::fmt::Display for StartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartError::Asset { image, .. } => {
                write!(f, "could not start round: asset '{image}' failed to load")
            }
        }
    }
}

impl std::error::Error for StartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartError::Asset { source, .. } => Some(&**source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failing_image() {
        let err = StartError::Asset {
            image: ImageId::new("cat.png"),
            source: anyhow::anyhow!("404"),
        };
        let text = err.to_string();
        assert!(text.contains("cat.png"));
        assert!(text.contains("could not start"));
    }
}
