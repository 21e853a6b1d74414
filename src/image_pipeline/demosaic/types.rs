//! Types for demosaicing operations

/// RGB image in sRGB primaries.
///
/// Produced by the demosaic stage with linear values; the profile
/// conversion stage rewrites the samples in place with the sRGB tone curve
/// applied.
#[derive(Debug, Clone)]
pub struct SrgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u16>,
}
