use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read input file: {0}")]
    InputReadError(String),

    #[error("failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("failed to convert color profile: {0}")]
    ColorConversionError(String),

    #[error("failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("failed to write output file: {0}")]
    WriteError(String),

    #[error("failed to create output directory: {0}")]
    OutputDirCreateError(String),

    #[error("invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Short, stable name for summary reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "InputNotFound",
            Self::InputReadError(_) => "InputReadError",
            Self::DecodeError(_) => "DecodeError",
            Self::ColorConversionError(_) => "ColorConversionError",
            Self::EncodeError(_) => "EncodeError",
            Self::WriteError(_) => "WriteError",
            Self::OutputDirCreateError(_) => "OutputDirCreateError",
            Self::InvalidDimensions(_, _) => "InvalidDimensions",
            Self::UnsupportedFormat(_) => "UnsupportedFormat",
            Self::IoError(_) => "IoError",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
