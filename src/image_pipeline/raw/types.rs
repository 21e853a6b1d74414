//! RAW image data types

/// Decoded sensor data plus the metadata the later stages need to turn it
/// into a display-referred image.
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Components per pixel: 1 for Bayer mosaic data, 3 for pre-interpolated RGB
    pub cpp: usize,
    /// Pixel data; single channel mosaic or interleaved RGB depending on `cpp`
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
    /// Color filter array layout name, e.g. "RGGB"
    pub cfa_pattern: String,
    /// Per-channel black levels
    pub black_levels: [u16; 4],
    /// Per-channel white levels
    pub white_levels: [u16; 4],
    /// As-shot white balance coefficients (RGBE order, may contain NaN)
    pub wb_coeffs: [f32; 4],
    /// Camera space to CIE XYZ matrix, normalized for the white balance
    pub cam_to_xyz: [[f32; 4]; 3],
}
