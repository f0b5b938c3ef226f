//! Image preparation, pure Rust, in-memory buffers end to end.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode / validity** | `image::load_from_memory` |
//! | **Orientation fix** | `kamadak-exif` tag read + baked rotation |
//! | **Resize** | Lanczos3, width-capped (thumbnails: exact width) |
//! | **Watermark** | `font8x8` text raster / alpha-composited logo |
//! | **Encode JPEG** | `image` JPEG encoder, RGB conversion first |
//! | **Encode WebP** | libwebp via the `webp` crate (lossy) |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension and placement math
//! - **Params**: option types, validated at construction
//! - **Orientation / Watermark / Codec**: the individual pipeline steps
//! - **Operations**: high-level functions composing the steps

mod calculations;
pub mod codec;
pub mod operations;
pub mod orientation;
mod params;
pub mod watermark;

pub use codec::{CodecError, is_valid_image};
pub use operations::{EncodedImage, PipelineError, encode, prepare, prepare_image, thumbnail};
pub use params::{
    MAX_FONT_SIZE, OptionsError, OutputFormat, Position, PrepareOptions, Quality, WatermarkSpec,
};
