//! Error types for scene setup, rendering and output.

use thiserror::Error;

/// Errors that can occur while building, tracing or saving a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A texture key was referenced that the texture store does not hold.
    #[error("missing texture asset: {0}")]
    MissingAsset(String),

    /// A texture file could not be decoded.
    #[error("failed to load texture '{key}': {source}")]
    TextureLoad {
        /// Key the texture was registered under.
        key: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Encoding the output image failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Writing an OpenEXR file failed.
    #[error("exr encoding failed: {0}")]
    Exr(String),

    /// Filesystem error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Output path has an extension no writer handles.
    #[error("unsupported output format '{0}' (expected .png or .exr)")]
    UnsupportedOutput(String),
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;
