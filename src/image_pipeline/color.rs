//! Color management module
//!
//! Converts demosaiced linear image data to the sRGB (IEC61966-2.1) color
//! space through lcms2, and provides the profile bytes embedded in output
//! files.

pub mod profile;
mod transform;
pub mod types;

pub use profile::{is_srgb, linear_srgb_profile, srgb_icc_bytes, srgb_profile};
pub use transform::ProfileConverter;
pub use types::RenderingIntent;
