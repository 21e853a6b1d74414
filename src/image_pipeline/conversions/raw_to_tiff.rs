use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    color::ProfileConverter,
    common::error::{ConversionError, Result},
    config::ConversionConfig,
    demosaic::CpuDemosaic,
    raw::{RawImageReader, RawLoaderReader},
    tiff::{StandardTiffWriter, TiffWriter},
};

/// Per-file conversion pipeline: decode, demosaic, profile conversion,
/// TIFF encode. Built once and reused across jobs; each call owns its
/// buffers and releases them on return, success or not.
pub struct RawToTiffPipeline<R: RawImageReader, W: TiffWriter> {
    reader: R,
    demosaicer: CpuDemosaic,
    converter: ProfileConverter,
    writer: W,
    config: ConversionConfig,
}

impl RawToTiffPipeline<RawLoaderReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        Self::with_custom(RawLoaderReader, StandardTiffWriter, config)
    }
}

impl<R: RawImageReader, W: TiffWriter> RawToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Result<Self> {
        let converter =
            ProfileConverter::new(config.rendering_intent, config.black_point_compensation)?;
        Ok(Self {
            reader,
            demosaicer: CpuDemosaic::new(),
            converter,
            writer,
            config,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting RAW to TIFF conversion");

        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            )
            .entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        let mut rgb_image = {
            let _span = tracing::info_span!("demosaic").entered();
            self.demosaicer.process(&raw_image)?
        };

        {
            let _span = tracing::info_span!("convert_profile").entered();
            self.converter.convert(&mut rgb_image)?;
        }

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(&rgb_image, output, &self.config)?;
        }

        info!(
            width = rgb_image.width,
            height = rgb_image.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Converts `input_path` into `output_path`, replacing any existing
    /// file at the destination.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::WriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
