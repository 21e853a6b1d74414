use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::demosaic::types::SrgbImageData;

pub trait TiffWriter {
    fn write_tiff(
        &self,
        image: &SrgbImageData,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
