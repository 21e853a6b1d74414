use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::{BitDepth, ConversionConfig};
use crate::image_pipeline::conversions::RawToTiffPipeline;
use crate::image_pipeline::demosaic::SrgbImageData;
use crate::image_pipeline::raw::{RawImageData, RawImageReader};
use crate::image_pipeline::tiff::{TiffCompression, TiffWriter};

fn mock_raw(width: usize, height: usize) -> RawImageData {
    RawImageData {
        width,
        height,
        cpp: 1,
        data: vec![2048u16; width * height],
        bits_per_sample: 14,
        cfa_pattern: "RGGB".to_string(),
        black_levels: [0; 4],
        white_levels: [16383; 4],
        wb_coeffs: [2.0, 1.0, 1.5, f32::NAN],
        cam_to_xyz: [
            [0.4124564, 0.3575761, 0.1804375, 0.0],
            [0.2126729, 0.7151522, 0.0721750, 0.0],
            [0.0193339, 0.1191920, 0.9503041, 0.0],
        ],
    }
}

struct MockReader {
    should_fail: bool,
    mock_data: Option<RawImageData>,
}

impl RawImageReader for MockReader {
    fn read_raw(&self, _data: &[u8]) -> Result<RawImageData> {
        if self.should_fail {
            return Err(ConversionError::DecodeError("mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| mock_raw(64, 64)))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<SrgbImageData>>>,
}

impl TiffWriter for MockWriter {
    fn write_tiff(
        &self,
        image: &SrgbImageData,
        _output: &mut dyn Write,
        _config: &ConversionConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

#[test]
fn test_config_builder() {
    let config = ConversionConfig::builder()
        .compression(TiffCompression::DeflateBalanced)
        .bit_depth(BitDepth::Eight)
        .embed_profile(false)
        .dither(false)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .build();

    assert_eq!(config.compression, TiffCompression::DeflateBalanced);
    assert_eq!(config.bit_depth, BitDepth::Eight);
    assert!(!config.embed_profile);
    assert!(!config.dither);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
}

#[test]
fn test_default_config_matches_output_contract() {
    let config = ConversionConfig::default();
    assert_eq!(config.bit_depth, BitDepth::Sixteen);
    assert_eq!(config.compression, TiffCompression::Lzw);
    assert!(config.embed_profile);
    assert!(config.black_point_compensation);
    assert!(config.dither);
}

#[test]
fn test_successful_conversion() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: false,
        mock_data: None,
    };
    let writer = MockWriter {
        should_fail: false,
        written_data: written.clone(),
    };

    let pipeline =
        RawToTiffPipeline::with_custom(reader, writer, ConversionConfig::default()).unwrap();

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(result.is_ok());
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].width, 64);
    assert_eq!(written[0].data.len(), 64 * 64 * 3);
}

#[test]
fn test_reader_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: true,
        mock_data: None,
    };
    let writer = MockWriter {
        should_fail: false,
        written_data: written.clone(),
    };

    let pipeline =
        RawToTiffPipeline::with_custom(reader, writer, ConversionConfig::default()).unwrap();

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: false,
        mock_data: None,
    };
    let writer = MockWriter {
        should_fail: true,
        written_data: written,
    };

    let pipeline =
        RawToTiffPipeline::with_custom(reader, writer, ConversionConfig::default()).unwrap();

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let oversized = RawImageData {
        width: 10000,
        height: 10000,
        data: vec![0u16; 100],
        ..mock_raw(64, 64)
    };
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(oversized),
    };
    let writer = MockWriter {
        should_fail: false,
        written_data: written,
    };

    let config = ConversionConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(5000))
        .build();

    let pipeline = RawToTiffPipeline::with_custom(reader, writer, config).unwrap();

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::InvalidDimensions(_, _)
    ));
}

#[test]
fn test_dimension_validation_disabled() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_raw(64, 64)),
    };
    let writer = MockWriter {
        should_fail: false,
        written_data: written,
    };

    let config = ConversionConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(16))
        .build();

    let pipeline = RawToTiffPipeline::with_custom(reader, writer, config).unwrap();

    let mut output = Cursor::new(Vec::new());
    assert!(pipeline.convert(b"fake raw data", &mut output).is_ok());
}
