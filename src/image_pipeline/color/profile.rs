//! ICC profile construction helpers

use lcms2::{CIExyY, CIExyYTRIPLE, InfoType, Locale, Profile, ToneCurve};

use crate::image_pipeline::common::error::{ConversionError, Result};

const D65: CIExyY = CIExyY {
    x: 0.3127,
    y: 0.3290,
    Y: 1.0,
};

const SRGB_PRIMARIES: CIExyYTRIPLE = CIExyYTRIPLE {
    Red: CIExyY {
        x: 0.6400,
        y: 0.3300,
        Y: 1.0,
    },
    Green: CIExyY {
        x: 0.3000,
        y: 0.6000,
        Y: 1.0,
    },
    Blue: CIExyY {
        x: 0.1500,
        y: 0.0600,
        Y: 1.0,
    },
};

/// The sRGB IEC61966-2.1 destination profile.
pub fn srgb_profile() -> Profile {
    Profile::new_srgb()
}

/// Source profile for demosaiced sensor data: sRGB primaries and white
/// point with a linear tone curve.
pub fn linear_srgb_profile() -> Result<Profile> {
    let linear = ToneCurve::new(1.0);
    Profile::new_rgb(&D65, &SRGB_PRIMARIES, &[&linear, &linear, &linear])
        .map_err(|e| ConversionError::ColorConversionError(e.to_string()))
}

/// Serialized sRGB profile for embedding into output files.
pub fn srgb_icc_bytes() -> Result<Vec<u8>> {
    srgb_profile()
        .icc()
        .map_err(|e| ConversionError::ColorConversionError(e.to_string()))
}

/// Loose check that a profile describes sRGB, based on its description
/// text. Good enough to recognize the profiles this crate embeds.
pub fn is_srgb(profile: &Profile) -> bool {
    match profile
        .info(InfoType::Description, Locale::none())
        .as_deref()
    {
        Some(desc) => desc.to_ascii_lowercase().contains("srgb"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_bytes_round_trip() {
        let bytes = srgb_icc_bytes().unwrap();
        let profile = Profile::new_icc(&bytes).unwrap();
        assert!(is_srgb(&profile));
    }

    #[test]
    fn linear_profile_is_not_srgb_tagged() {
        let profile = linear_srgb_profile().unwrap();
        // Freshly built profiles carry no description text.
        assert!(!is_srgb(&profile));
    }
}
