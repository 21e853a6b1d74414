//! Conversion configuration types

use crate::image_pipeline::color::RenderingIntent;
use crate::image_pipeline::tiff::TiffCompression;

/// Target color space. Only sRGB output is supported; the enum exists so
/// the configuration surface states the target explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorSpace {
    #[default]
    Srgb,
}

/// Output bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitDepth {
    Eight,
    #[default]
    Sixteen,
}

/// Configuration for RAW to TIFF conversion.
///
/// The defaults reproduce the production proofing setup: 16-bit sRGB with
/// LZW compression, embedded profile, relative colorimetric intent with
/// black-point compensation and dithering.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Target color space
    pub color_space: ColorSpace,
    /// Output bits per channel
    pub bit_depth: BitDepth,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to embed the sRGB ICC profile in the output
    pub embed_profile: bool,
    /// Rendering intent for the profile conversion
    pub rendering_intent: RenderingIntent,
    /// Black-point compensation during the profile conversion
    pub black_point_compensation: bool,
    /// Dither when quantizing to 8-bit output; inert at 16-bit
    pub dither: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Reject images wider or taller than this, when set
    pub max_dimension: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Srgb,
            bit_depth: BitDepth::Sixteen,
            compression: TiffCompression::Lzw,
            predictor: None,
            embed_profile: true,
            rendering_intent: RenderingIntent::RelativeColorimetric,
            black_point_compensation: true,
            dither: true,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    bit_depth: Option<BitDepth>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    embed_profile: Option<bool>,
    rendering_intent: Option<RenderingIntent>,
    black_point_compensation: Option<bool>,
    dither: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ConversionConfigBuilder {
    pub fn bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn embed_profile(mut self, embed: bool) -> Self {
        self.embed_profile = Some(embed);
        self
    }

    pub fn rendering_intent(mut self, intent: RenderingIntent) -> Self {
        self.rendering_intent = Some(intent);
        self
    }

    pub fn black_point_compensation(mut self, enable: bool) -> Self {
        self.black_point_compensation = Some(enable);
        self
    }

    pub fn dither(mut self, enable: bool) -> Self {
        self.dither = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            color_space: default.color_space,
            bit_depth: self.bit_depth.unwrap_or(default.bit_depth),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            embed_profile: self.embed_profile.unwrap_or(default.embed_profile),
            rendering_intent: self.rendering_intent.unwrap_or(default.rendering_intent),
            black_point_compensation: self
                .black_point_compensation
                .unwrap_or(default.black_point_compensation),
            dither: self.dither.unwrap_or(default.dither),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
