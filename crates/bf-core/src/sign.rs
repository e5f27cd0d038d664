//! Current sign convention shared by the electrical and SOC models.

use crate::{BfError, Real};
use std::fmt;
use std::str::FromStr;

/// How the sign of the battery current is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SignConvention {
    /// Positive current flows into the battery (charging).
    Passive,
    /// Positive current flows out of the battery (discharging).
    #[default]
    Active,
}

impl SignConvention {
    /// Multiplier turning a current in this convention into a charging current.
    #[inline]
    pub fn charge_sign(self) -> Real {
        match self {
            SignConvention::Passive => 1.0,
            SignConvention::Active => -1.0,
        }
    }
}

impl FromStr for SignConvention {
    type Err = BfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passive" => Ok(SignConvention::Passive),
            "active" => Ok(SignConvention::Active),
            other => Err(BfError::UnknownSignConvention {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SignConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignConvention::Passive => write!(f, "passive"),
            SignConvention::Active => write!(f, "active"),
        }
    }
}
