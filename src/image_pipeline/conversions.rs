//! Pipeline conversions module
//!
//! This module contains orchestration logic for the RAW to TIFF conversion.

mod raw_to_tiff;

#[cfg(test)]
mod tests;

pub use raw_to_tiff::RawToTiffPipeline;
