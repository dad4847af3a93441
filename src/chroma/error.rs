use thiserror::Error;

/// Errors from probing, decoding or keying media
#[derive(Debug, Error)]
pub enum ChromaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("probe failed: {0}")]
    Probe(String),
}
