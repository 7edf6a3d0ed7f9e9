use std::fmt;
use std::str::FromStr;

use crate::errors::FirmwareError;

/// Dotted `major.minor.patch` marker identifying the deployed firmware
/// image. Each accepted upload bumps the patch component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FirmwareVersion {
    /// Marker assumed when no firmware has ever been uploaded.
    pub const INITIAL: FirmwareVersion = FirmwareVersion {
        major: 1,
        minor: 0,
        patch: 0,
    };

    pub fn bump_patch(self) -> Self {
        Self {
            patch: self.patch + 1,
            ..self
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FirmwareVersion {
    type Err = FirmwareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');

        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(FirmwareError::InvalidMarker(s.to_string()));
        };

        let component = |raw: &str| {
            raw.parse::<u32>()
                .map_err(|_| FirmwareError::InvalidMarker(s.to_string()))
        };

        Ok(Self {
            major: component(major)?,
            minor: component(minor)?,
            patch: component(patch)?,
        })
    }
}
