use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::demosaic::types::SrgbImageData;
use crate::image_pipeline::raw::types::RawImageData;

/// Standard XYZ to sRGB matrix, D65 illuminant
const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// CPU demosaicer producing linear sRGB from Bayer mosaic sensor data.
///
/// Runs bilinear interpolation over the mosaic, then black-level
/// subtraction, white balance, and the camera-to-sRGB matrix. Inputs that
/// already carry three components per pixel skip the interpolation and are
/// only normalized to the sensor range.
pub struct CpuDemosaic;

impl CpuDemosaic {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, raw_image: &RawImageData) -> Result<SrgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;

        if raw_image.cpp == 3 {
            debug!("Input is already RGB, skipping demosaic");
            return Ok(normalize_rgb(raw_image));
        }

        let cfa = match raw_image.cfa_pattern.as_str() {
            "RGGB" => CFA::RGGB,
            "BGGR" => CFA::BGGR,
            "GBRG" => CFA::GBRG,
            "GRBG" => CFA::GRBG,
            other => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "CFA pattern {other:?}"
                )));
            }
        };

        debug!(
            "Demosaicing {}x{} mosaic, CFA={}, algo=Linear",
            width, height, raw_image.cfa_pattern
        );

        let mosaic_bytes: Vec<u8> = raw_image
            .data
            .iter()
            .flat_map(|&v| v.to_le_bytes())
            .collect();

        let mut rgb_bytes = vec![0u8; width * height * 3 * 2];
        let mut raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut rgb_bytes);

        bayer::run_demosaic(
            &mut Cursor::new(&mosaic_bytes[..]),
            BayerDepth::Depth16LE,
            cfa,
            Demosaic::Linear,
            &mut raster,
        )
        .map_err(|e| ConversionError::DecodeError(format!("demosaic failed: {e:?}")))?;

        // Levels and white balance. Balance coefficients are normalized to
        // green; missing coefficients come through as NaN.
        let black_level = raw_image.black_levels[0] as f32;
        let white_level = raw_image.white_levels[0] as f32;
        let range = (white_level - black_level).max(1.0);

        let wb_r = wb_ratio(raw_image.wb_coeffs[0], raw_image.wb_coeffs[1]);
        let wb_g = 1.0;
        let wb_b = wb_ratio(raw_image.wb_coeffs[2], raw_image.wb_coeffs[1]);

        // Combined matrix: camera RGB -> XYZ -> linear sRGB. The fourth
        // matrix column belongs to a fourth sensor channel which no longer
        // exists after interpolation to three channels.
        let mut cam_to_srgb = [[0.0f32; 3]; 3];
        for (r, row) in cam_to_srgb.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3)
                    .map(|k| XYZ_TO_SRGB[r][k] * raw_image.cam_to_xyz[k][c])
                    .sum();
            }
        }

        let data: Vec<u16> = rgb_bytes
            .chunks_exact(6)
            .flat_map(|px| {
                let r_raw = u16::from_le_bytes([px[0], px[1]]) as f32;
                let g_raw = u16::from_le_bytes([px[2], px[3]]) as f32;
                let b_raw = u16::from_le_bytes([px[4], px[5]]) as f32;

                let r_lin = ((r_raw - black_level).max(0.0) / range) * wb_r;
                let g_lin = ((g_raw - black_level).max(0.0) / range) * wb_g;
                let b_lin = ((b_raw - black_level).max(0.0) / range) * wb_b;

                let r_out =
                    cam_to_srgb[0][0] * r_lin + cam_to_srgb[0][1] * g_lin + cam_to_srgb[0][2] * b_lin;
                let g_out =
                    cam_to_srgb[1][0] * r_lin + cam_to_srgb[1][1] * g_lin + cam_to_srgb[1][2] * b_lin;
                let b_out =
                    cam_to_srgb[2][0] * r_lin + cam_to_srgb[2][1] * g_lin + cam_to_srgb[2][2] * b_lin;

                [
                    (r_out * 65535.0).clamp(0.0, 65535.0) as u16,
                    (g_out * 65535.0).clamp(0.0, 65535.0) as u16,
                    (b_out * 65535.0).clamp(0.0, 65535.0) as u16,
                ]
            })
            .collect();

        Ok(SrgbImageData {
            width,
            height,
            data,
        })
    }
}

impl Default for CpuDemosaic {
    fn default() -> Self {
        Self::new()
    }
}

fn wb_ratio(channel: f32, green: f32) -> f32 {
    let ratio = channel / green;
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn normalize_rgb(raw_image: &RawImageData) -> SrgbImageData {
    let black_level = raw_image.black_levels[0] as f32;
    let white_level = raw_image.white_levels[0] as f32;
    let range = (white_level - black_level).max(1.0);

    let data = raw_image
        .data
        .iter()
        .map(|&v| {
            let norm = ((v as f32 - black_level).max(0.0) / range).min(1.0);
            (norm * 65535.0) as u16
        })
        .collect();

    SrgbImageData {
        width: raw_image.width,
        height: raw_image.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mosaic_image(width: usize, height: usize, value: u16) -> RawImageData {
        RawImageData {
            width,
            height,
            cpp: 1,
            data: vec![value; width * height],
            bits_per_sample: 14,
            cfa_pattern: "RGGB".to_string(),
            black_levels: [0; 4],
            white_levels: [16383; 4],
            wb_coeffs: [1.0, 1.0, 1.0, f32::NAN],
            cam_to_xyz: [
                [0.4124564, 0.3575761, 0.1804375, 0.0],
                [0.2126729, 0.7151522, 0.0721750, 0.0],
                [0.0193339, 0.1191920, 0.9503041, 0.0],
            ],
        }
    }

    #[test]
    fn flat_mosaic_stays_neutral() {
        // A uniform mosaic with identity-balance coefficients and an
        // sRGB-to-XYZ camera matrix must come out as a uniform gray.
        let image = mosaic_image(16, 16, 16383);
        let rgb = CpuDemosaic::new().process(&image).unwrap();

        assert_eq!(rgb.width, 16);
        assert_eq!(rgb.height, 16);
        assert_eq!(rgb.data.len(), 16 * 16 * 3);
        for &v in &rgb.data {
            assert!(v > 64000, "expected near-white output, got {v}");
        }
    }

    #[test]
    fn unknown_cfa_pattern_is_rejected() {
        let mut image = mosaic_image(8, 8, 1000);
        image.cfa_pattern = "XTRANS".to_string();

        let err = CpuDemosaic::new().process(&image).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat(_)));
    }

    #[test]
    fn rgb_input_skips_demosaic() {
        let image = RawImageData {
            width: 2,
            height: 2,
            cpp: 3,
            data: vec![8191; 2 * 2 * 3],
            bits_per_sample: 14,
            cfa_pattern: String::new(),
            black_levels: [0; 4],
            white_levels: [16383; 4],
            wb_coeffs: [1.0, 1.0, 1.0, f32::NAN],
            cam_to_xyz: [[0.0; 4]; 3],
        };

        let rgb = CpuDemosaic::new().process(&image).unwrap();
        assert_eq!(rgb.data.len(), 12);
        // 8191/16383 of full scale, scaled to u16
        for &v in &rgb.data {
            assert!((32000..34000).contains(&v), "got {v}");
        }
    }
}
