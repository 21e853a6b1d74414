//! Batch RAW photo converter.
//!
//! Decodes camera RAW files, converts them to the sRGB color space, and
//! writes 16-bit LZW-compressed TIFFs with an embedded sRGB ICC profile.
//! The `convert_img` and `convert_imgs` binaries wrap the [`cli`] module;
//! the conversion machinery itself lives in [`image_pipeline`] and can be
//! embedded directly.

pub mod batch;
pub mod cli;
pub mod image_pipeline;
pub mod logger;

pub use batch::{BatchSummary, ConversionJob};
pub use image_pipeline::{ConversionConfig, ConversionError, RawToTiffPipeline};
