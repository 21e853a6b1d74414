//! RAW image reader implementation using the rawloader library.
//!
//! Supports any RAW format rawloader can decode (CR2, ARW, NEF, DNG, RAF,
//! and others). Handles decoding the sensor data and extracting the color
//! metadata the demosaic stage needs.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::RawImageData;

pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

const U16_BITS: u32 = 16;

impl RawImageReader for RawLoaderReader {
    /// Decodes RAW image bytes into [`RawImageData`].
    ///
    /// Integer sensor data is carried through as-is; float data (normalized
    /// 0.0-1.0) is scaled to the u16 range. The effective bits per sample is
    /// derived from the sensor's white level metadata, so a 14-bit sensor
    /// reports 14 regardless of the container format.
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        let cpp = decoded.cpp;

        debug!("Decoded image: {}x{}, {} component(s) per pixel", width, height, cpp);

        let pixels: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(ref values) => values.iter().map(|&v| v as u16).collect(),
            RawloaderImageData::Float(ref values) => values
                .iter()
                .map(|&v| (v * u16::MAX as f32) as u16)
                .collect(),
        };

        // The white level is the largest value the sensor can produce, so the
        // position of its highest set bit is the effective sensor bit depth
        // (4095 -> 12 bits, 16383 -> 14 bits).
        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = if max_white_level == 0 {
            DEFAULT_BITS_PER_SAMPLE
        } else {
            U16_BITS - max_white_level.leading_zeros()
        };

        debug!(
            "Calculated bits_per_sample: {} (max white level: {})",
            bits_per_sample, max_white_level
        );

        let cam_to_xyz = decoded.cam_to_xyz_normalized();

        Ok(RawImageData {
            width,
            height,
            cpp,
            data: pixels,
            bits_per_sample,
            cfa_pattern: decoded.cfa.name.clone(),
            black_levels: decoded.blacklevels,
            white_levels: decoded.whitelevels,
            wb_coeffs: decoded.wb_coeffs,
            cam_to_xyz,
        })
    }
}
