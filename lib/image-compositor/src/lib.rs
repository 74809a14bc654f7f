pub mod codec;
pub mod compositor;
pub mod geometry;

pub use codec::{decode_image, encode_png, rasterize_svg};
pub use compositor::Compositor;
pub use geometry::{Anchor, Rectangle, SourceCrop, compute_crop};

pub type CompositorResult<T> = Result<T, CompositorError>;

#[derive(thiserror::Error, Debug)]
pub enum CompositorError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("SVG error: {0}")]
    Svg(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
