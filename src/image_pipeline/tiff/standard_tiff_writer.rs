use std::io::Write;

use tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use tiff::tags::{Predictor, Tag};
use tracing::debug;

use crate::image_pipeline::color::profile;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::{BitDepth, ConversionConfig};
use crate::image_pipeline::demosaic::types::SrgbImageData;
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::TiffWriter;

/// ICC profile TIFF tag (TIFF/EP 34675).
const TAG_ICC_PROFILE: u16 = 34675;

/// Ordered dither thresholds for the 8-bit quantization path.
const DITHER_4X4: [[u32; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        image: &SrgbImageData,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let icc = if config.embed_profile {
            Some(profile::srgb_icc_bytes()?)
        } else {
            None
        };

        match config.bit_depth {
            BitDepth::Sixteen => {
                let mut tiff_image = encoder
                    .new_image::<colortype::RGB16>(image.width as u32, image.height as u32)
                    .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
                if let Some(icc) = &icc {
                    tiff_image
                        .encoder()
                        .write_tag(Tag::Unknown(TAG_ICC_PROFILE), &icc[..])
                        .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
                }
                tiff_image
                    .write_data(&image.data)
                    .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
            }
            BitDepth::Eight => {
                let quantized = quantize_to_8bit(image, config.dither);
                let mut tiff_image = encoder
                    .new_image::<colortype::RGB8>(image.width as u32, image.height as u32)
                    .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
                if let Some(icc) = &icc {
                    tiff_image
                        .encoder()
                        .write_tag(Tag::Unknown(TAG_ICC_PROFILE), &icc[..])
                        .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
                }
                tiff_image
                    .write_data(&quantized)
                    .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
            }
        }

        output
            .write_all(&buffer)
            .map_err(|e| ConversionError::WriteError(e.to_string()))?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

/// Reduce 16-bit samples to 8 bits, optionally spreading the quantization
/// error with an ordered dither pattern.
fn quantize_to_8bit(image: &SrgbImageData, dither: bool) -> Vec<u8> {
    image
        .data
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let scaled = v as u32 * 255;
            let quotient = scaled / 65535;
            let remainder = scaled % 65535;

            let threshold = if dither {
                let pixel = i / 3;
                let x = pixel % image.width;
                let y = pixel / image.width;
                (DITHER_4X4[y % 4][x % 4] * 2 + 1) * (65535 / 32)
            } else {
                65535 / 2
            };

            if remainder > threshold {
                (quotient + 1) as u8
            } else {
                quotient as u8
            }
        })
        .collect()
}
