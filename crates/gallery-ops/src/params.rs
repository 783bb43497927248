//! Tunable filter parameters.
//!
//! The empirical constants the gallery was tuned with (threshold cutoffs,
//! corner response thresholds, marker geometry) live here as defaults rather
//! than literals in the filters, so tests and callers can adjust them.
//!
//! With the `serde` feature every struct is (de)serializable and missing
//! fields fall back to their defaults:
//!
//! ```rust,ignore
//! let params: FilterParams = serde_yaml::from_str("corners:\n  harris_threshold: 1.0e6\n")?;
//! assert_eq!(params.threshold.cutoff, 127);
//! ```

use gallery_core::{Channel, Rgb};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::border::BorderPolicy;
use crate::{OpsError, OpsResult};

/// Parameters for [`crate::pointwise::threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThresholdParams {
    /// Greyscale values at or above this become white.
    pub cutoff: Channel,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self { cutoff: 127 }
    }
}

/// Parameters for [`crate::pointwise::contrast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContrastParams {
    /// Channel averages strictly above this are brightened, others darkened.
    pub pivot: Channel,
    /// Amount added to or removed from every channel.
    pub step: Channel,
}

impl Default for ContrastParams {
    fn default() -> Self {
        Self { pivot: 127, step: 50 }
    }
}

/// Corner response formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CornerKind {
    /// `det - k * trace^2`.
    #[default]
    Harris,
    /// Smaller eigenvalue of the structure tensor.
    ShiTomasi,
}

impl CornerKind {
    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CornerKind::Harris => "harris",
            CornerKind::ShiTomasi => "shi_tomasi",
        }
    }
}

/// Parameters for [`crate::corner::CornerDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CornerParams {
    /// Which response formula to score with.
    pub kind: CornerKind,
    /// Harris sensitivity `k`.
    pub harris_k: f64,
    /// Harris responses strictly above this mark a corner.
    pub harris_threshold: f64,
    /// Shi-Tomasi responses strictly above this mark a corner.
    pub shi_tomasi_threshold: f64,
    /// Pixels closer than this to any edge are never scored. At least 1, so
    /// the 3x3 tensor window stays inside the buffer.
    pub margin: u32,
    /// Half-width of the square painted on each corner.
    pub marker_radius: u32,
    /// Colour of the corner square.
    pub marker: Rgb,
    /// What the unscored margin shows.
    pub border: BorderPolicy,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            kind: CornerKind::Harris,
            harris_k: 0.15,
            harris_threshold: 20_000_000.0,
            shi_tomasi_threshold: 10_000.0,
            margin: 3,
            marker_radius: 3,
            marker: Rgb::GREEN,
            border: BorderPolicy::LeaveUninitialized,
        }
    }
}

impl CornerParams {
    /// Default parameters with the given response formula.
    pub fn with_kind(kind: CornerKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Threshold in effect for the configured [`CornerKind`].
    pub fn threshold(&self) -> f64 {
        match self.kind {
            CornerKind::Harris => self.harris_threshold,
            CornerKind::ShiTomasi => self.shi_tomasi_threshold,
        }
    }

    /// Checks that thresholds and `k` are finite and the margin is at least 1.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, v) in [
            ("harris_k", self.harris_k),
            ("harris_threshold", self.harris_threshold),
            ("shi_tomasi_threshold", self.shi_tomasi_threshold),
        ] {
            if !v.is_finite() {
                return Err(OpsError::InvalidParameter(format!("{name} must be finite, got {v}")));
            }
        }
        if self.margin == 0 {
            return Err(OpsError::InvalidParameter("corner margin must be at least 1".into()));
        }
        Ok(())
    }
}

/// Every tunable parameter of a filter session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterParams {
    /// Binarize settings.
    pub threshold: ThresholdParams,
    /// Contrast enhancement settings.
    pub contrast: ContrastParams,
    /// Corner detector settings. `kind` is overridden by the chosen filter.
    pub corners: CornerParams,
    /// Border policy of box blur, Gaussian blur and sharpen.
    pub blur_border: BorderPolicy,
    /// Border policy of pixelation.
    pub pixelate_border: PixelateBorder,
}

/// Border policy wrapper whose default is [`BorderPolicy::LeaveUninitialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PixelateBorder(pub BorderPolicy);

impl Default for PixelateBorder {
    fn default() -> Self {
        Self(BorderPolicy::LeaveUninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning() {
        let p = FilterParams::default();
        assert_eq!(p.threshold.cutoff, 127);
        assert_eq!(p.contrast, ContrastParams { pivot: 127, step: 50 });
        assert_eq!(p.corners.harris_threshold, 20_000_000.0);
        assert_eq!(p.corners.shi_tomasi_threshold, 10_000.0);
        assert_eq!(p.corners.margin, 3);
        assert_eq!(p.blur_border, BorderPolicy::ZeroPad);
        assert_eq!(p.pixelate_border.0, BorderPolicy::LeaveUninitialized);
        assert_eq!(p.corners.border, BorderPolicy::LeaveUninitialized);
    }

    #[test]
    fn test_threshold_follows_kind() {
        assert_eq!(CornerParams::with_kind(CornerKind::Harris).threshold(), 20_000_000.0);
        assert_eq!(CornerParams::with_kind(CornerKind::ShiTomasi).threshold(), 10_000.0);
    }

    #[test]
    fn test_validate() {
        assert!(CornerParams::default().validate().is_ok());
        let bad = CornerParams {
            harris_threshold: f64::NAN,
            ..CornerParams::default()
        };
        assert!(matches!(bad.validate(), Err(OpsError::InvalidParameter(_))));
        let bad = CornerParams {
            margin: 0,
            ..CornerParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
