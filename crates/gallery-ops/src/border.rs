//! Border handling policies.
//!
//! Each neighbourhood operation decides what happens where its footprint
//! leaves the buffer. Rather than hard-coding that per filter, the choice is a
//! [`BorderPolicy`] parameter:
//!
//! | Operation      | `ZeroPad`                     | `SkipAndRenormalize`                  | `LeaveUninitialized`          |
//! |----------------|-------------------------------|---------------------------------------|-------------------------------|
//! | convolution    | missing taps contribute 0     | divide by the in-bounds weight share  | clipped pixels stay black     |
//! | pixelate       | far-edge strip stays black    | trailing partial tiles are filled too | far-edge strip stays black    |
//! | corner margin  | original colour copied        | original colour copied                | margin stays black            |
//!
//! Defaults reproduce the gallery's historical output: `ZeroPad` for
//! convolution, `LeaveUninitialized` for pixelation and corner margins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a neighbourhood operation does where its footprint leaves the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BorderPolicy {
    /// Out-of-bounds taps contribute nothing; the divisor is unchanged.
    #[default]
    ZeroPad,
    /// Out-of-bounds taps are skipped and the result is rescaled by the
    /// weight that actually landed inside the buffer.
    SkipAndRenormalize,
    /// Output pixels whose footprint leaves the buffer are not written and
    /// keep the fresh buffer's black.
    LeaveUninitialized,
}

impl BorderPolicy {
    /// All policies, in declaration order.
    pub const ALL: [BorderPolicy; 3] = [
        BorderPolicy::ZeroPad,
        BorderPolicy::SkipAndRenormalize,
        BorderPolicy::LeaveUninitialized,
    ];

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            BorderPolicy::ZeroPad => "zero_pad",
            BorderPolicy::SkipAndRenormalize => "skip_and_renormalize",
            BorderPolicy::LeaveUninitialized => "leave_uninitialized",
        }
    }
}

impl std::fmt::Display for BorderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
