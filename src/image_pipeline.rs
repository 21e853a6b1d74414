//! Image processing pipeline module
//!
//! This module provides a structured approach to RAW to TIFF conversion,
//! with separate modules for RAW reading, demosaicing, color management,
//! TIFF writing, and conversion orchestration.

pub mod color;
pub mod common;
pub mod config;
pub mod conversions;
pub mod demosaic;
pub mod raw;
pub mod tiff;

pub use common::{ConversionError, Result};

pub use config::{BitDepth, ColorSpace, ConversionConfig, ConversionConfigBuilder};

pub use raw::{RawImageData, RawImageReader, RawLoaderReader};

pub use demosaic::{CpuDemosaic, SrgbImageData};

pub use color::{ProfileConverter, RenderingIntent};

pub use tiff::{StandardTiffWriter, TiffCompression, TiffWriter};

pub use conversions::RawToTiffPipeline;
