use lcms2::{Flags, PixelFormat, Transform};
use tracing::debug;

use crate::image_pipeline::color::profile;
use crate::image_pipeline::color::types::RenderingIntent;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::demosaic::types::SrgbImageData;

/// Converts linear sRGB image data to the sRGB IEC61966-2.1 profile.
///
/// The transform is built once and reused across jobs; lcms2 transforms are
/// cheap to apply but not to construct.
pub struct ProfileConverter {
    transform: Transform<[u16; 3], [u16; 3]>,
}

impl ProfileConverter {
    pub fn new(intent: RenderingIntent, black_point_compensation: bool) -> Result<Self> {
        let source = profile::linear_srgb_profile()?;
        let destination = profile::srgb_profile();

        let flags = if black_point_compensation {
            Flags::BLACKPOINT_COMPENSATION
        } else {
            Flags::default()
        };

        let transform = Transform::new_flags(
            &source,
            PixelFormat::RGB_16,
            &destination,
            PixelFormat::RGB_16,
            intent.into(),
            flags,
        )
        .map_err(|e| ConversionError::ColorConversionError(e.to_string()))?;

        Ok(Self { transform })
    }

    /// Rewrites the samples in place with the destination profile applied.
    pub fn convert(&self, image: &mut SrgbImageData) -> Result<()> {
        let expected = image.width * image.height * 3;
        if image.data.len() != expected {
            return Err(ConversionError::ColorConversionError(format!(
                "pixel buffer holds {} samples, expected {}",
                image.data.len(),
                expected
            )));
        }

        debug!(
            "Applying profile conversion to {}x{} image",
            image.width, image.height
        );

        // Interleaved RGB u16 viewed as pixel triples for lcms2.
        let pixels = unsafe {
            std::slice::from_raw_parts_mut(
                image.data.as_mut_ptr() as *mut [u16; 3],
                image.data.len() / 3,
            )
        };
        self.transform.transform_in_place(pixels);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel(r: u16, g: u16, b: u16) -> SrgbImageData {
        SrgbImageData {
            width: 1,
            height: 1,
            data: vec![r, g, b],
        }
    }

    fn converted(value: u16) -> u16 {
        let converter =
            ProfileConverter::new(RenderingIntent::RelativeColorimetric, true).unwrap();
        let mut image = single_pixel(value, value, value);
        converter.convert(&mut image).unwrap();
        image.data[0]
    }

    #[test]
    fn linear_midgray_gets_srgb_encoded() {
        // sRGB encoding of linear 0.5 is ~0.7354.
        let out = converted(32768);
        let expected = (0.7354f64 * 65535.0) as i64;
        assert!(
            (out as i64 - expected).abs() < 500,
            "expected ~{expected}, got {out}"
        );
    }

    #[test]
    fn endpoints_are_preserved() {
        assert!(converted(0) < 300);
        assert!(converted(65535) > 65235);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let converter =
            ProfileConverter::new(RenderingIntent::RelativeColorimetric, true).unwrap();
        let mut image = SrgbImageData {
            width: 2,
            height: 2,
            data: vec![0; 3],
        };
        let err = converter.convert(&mut image).unwrap_err();
        assert!(matches!(err, ConversionError::ColorConversionError(_)));
    }
}
