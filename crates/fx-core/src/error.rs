use crate::lifecycle::SurfaceState;

/// Failures a surface can report through the logging channel.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error("failed to fetch image {url}: {reason}")]
    AssetFetch { url: String, reason: String },
    #[error("failed to decode image {url}: {source}")]
    AssetDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image is {width}x{height}, larger than the {max}px texture limit")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("graphics initialization failed: {0}")]
    Gpu(String),
    #[error("invalid effect configuration: {0}")]
    Config(String),
}

impl FxError {
    /// Asset failures leave the surface mounted but inert.
    pub fn is_asset_failure(&self) -> bool {
        matches!(
            self,
            FxError::AssetFetch { .. }
                | FxError::AssetDecode { .. }
                | FxError::TextureTooLarge { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("surface is already active ({0:?})")]
    AlreadyActive(SurfaceState),
}
