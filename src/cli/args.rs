use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::image_pipeline::{
    BitDepth, ConversionConfig, RenderingIntent, TiffCompression,
};

#[derive(Parser, Debug)]
#[command(name = "convert_img")]
#[command(version, about = "Convert one RAW photo to a 16-bit sRGB TIFF")]
pub struct ConvertImgArgs {
    /// RAW file to convert
    pub input: PathBuf,

    /// Destination TIFF path (overwritten if it exists)
    pub output: PathBuf,

    #[command(flatten)]
    pub options: ConvertOptions,
}

#[derive(Parser, Debug)]
#[command(name = "convert_imgs")]
#[command(
    version,
    about = "Convert every file in a directory to 16-bit sRGB TIFFs under <directory>/TIFF"
)]
pub struct ConvertImgsArgs {
    /// Directory containing RAW files
    pub directory: PathBuf,

    /// Stop at the first failed file instead of continuing
    #[arg(long)]
    pub fail_fast: bool,

    /// Only convert files with these extensions, e.g. --ext cr2,arw.
    /// Without this, every regular file is attempted.
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    #[command(flatten)]
    pub options: ConvertOptions,
}

/// Conversion options shared by both binaries.
#[derive(Args, Debug)]
pub struct ConvertOptions {
    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::Lzw)]
    pub compression: CompressionArg,

    /// Output bits per channel
    #[arg(long, value_enum, default_value_t = BitDepthArg::Sixteen)]
    pub bit_depth: BitDepthArg,

    /// Rendering intent for the profile conversion
    #[arg(long, value_enum, default_value_t = IntentArg::Relative)]
    pub intent: IntentArg,

    /// Do not embed the sRGB ICC profile in the output
    #[arg(long)]
    pub no_embed_profile: bool,

    /// Disable black-point compensation in the profile conversion
    #[arg(long)]
    pub no_black_point_compensation: bool,

    /// Disable dithering when quantizing to 8-bit output
    #[arg(long)]
    pub no_dither: bool,

    /// Skip re-reading each output file to verify it decodes
    #[arg(long)]
    pub no_verify: bool,
}

impl ConvertOptions {
    pub fn to_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .compression(self.compression.into())
            .bit_depth(self.bit_depth.into())
            .rendering_intent(self.intent.into())
            .embed_profile(!self.no_embed_profile)
            .black_point_compensation(!self.no_black_point_compensation)
            .dither(!self.no_dither)
            .build()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            compression: CompressionArg::Lzw,
            bit_depth: BitDepthArg::Sixteen,
            intent: IntentArg::Relative,
            no_embed_profile: false,
            no_black_point_compensation: false,
            no_dither: false,
            no_verify: false,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    Deflate,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::Deflate => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BitDepthArg {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

impl From<BitDepthArg> for BitDepth {
    fn from(arg: BitDepthArg) -> Self {
        match arg {
            BitDepthArg::Eight => BitDepth::Eight,
            BitDepthArg::Sixteen => BitDepth::Sixteen,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum IntentArg {
    Perceptual,
    Relative,
    Saturation,
    Absolute,
}

impl From<IntentArg> for RenderingIntent {
    fn from(arg: IntentArg) -> Self {
        match arg {
            IntentArg::Perceptual => RenderingIntent::Perceptual,
            IntentArg::Relative => RenderingIntent::RelativeColorimetric,
            IntentArg::Saturation => RenderingIntent::Saturation,
            IntentArg::Absolute => RenderingIntent::AbsoluteColorimetric,
        }
    }
}
