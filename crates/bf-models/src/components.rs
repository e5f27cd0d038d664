//! Sub-model components: scalar parameters and (temperature, SOC) lookup tables.

use crate::error::{ModelError, ModelResult};
use bf_core::{Real, ensure_finite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bilinear lookup table over temperature (°C) and SOC.
///
/// `values[t][s]` is the value at `temperatures[t]` and `socs[s]`. Queries
/// outside the grid are clamped to its edges. An axis with a single point
/// makes the table constant along that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub temperatures: Vec<Real>,
    pub socs: Vec<Real>,
    pub values: Vec<Vec<Real>>,
}

impl LookupTable {
    /// Check grid shape and ordering.
    pub fn validate(&self, name: &str) -> ModelResult<()> {
        let invalid = |reason| ModelError::InvalidTable {
            name: name.to_string(),
            reason,
        };

        if self.temperatures.is_empty() {
            return Err(invalid("temperature axis is empty"));
        }
        if self.socs.is_empty() {
            return Err(invalid("soc axis is empty"));
        }
        if !self.temperatures.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("temperature axis must be strictly increasing"));
        }
        if !self.socs.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("soc axis must be strictly increasing"));
        }
        if self.values.len() != self.temperatures.len() {
            return Err(invalid("row count must match temperature axis"));
        }
        if self.values.iter().any(|row| row.len() != self.socs.len()) {
            return Err(invalid("column count must match soc axis"));
        }
        let all_finite = self
            .temperatures
            .iter()
            .chain(self.socs.iter())
            .chain(self.values.iter().flatten())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid("table contains non-finite entries"));
        }
        Ok(())
    }

    /// Bilinear interpolation, clamped to the grid.
    pub fn interpolate(&self, temp: Real, soc: Real) -> Real {
        let (t_l, t_u, t_w) = bracket(&self.temperatures, temp);
        let (s_l, s_u, s_w) = bracket(&self.socs, soc);

        // interpolate along soc first, then temperature
        let c0 = self.values[t_l][s_l] * (1.0 - s_w) + self.values[t_l][s_u] * s_w;
        let c1 = self.values[t_u][s_l] * (1.0 - s_w) + self.values[t_u][s_u] * s_w;
        c0 * (1.0 - t_w) + c1 * t_w
    }
}

/// Lower index, upper index and weight of `x` on a validated axis.
fn bracket(axis: &[Real], x: Real) -> (usize, usize, Real) {
    let last = axis.len() - 1;
    if last == 0 {
        return (0, 0, 0.0);
    }
    let x = x.max(axis[0]).min(axis[last]);
    let upper = axis.partition_point(|&a| a < x).clamp(1, last);
    let lower = upper - 1;
    let w = (x - axis[lower]) / (axis[upper] - axis[lower]);
    (lower, upper, w)
}

/// A model parameter: either a constant or a function of temperature and SOC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Scalar(Real),
    Table(LookupTable),
}

impl Parameter {
    pub fn validate(&self, name: &str) -> ModelResult<()> {
        match self {
            Parameter::Scalar(v) => {
                ensure_finite(*v, "scalar component")?;
                Ok(())
            }
            Parameter::Table(table) => table.validate(name),
        }
    }

    /// Evaluate at the given temperature (°C) and SOC.
    #[inline]
    pub fn eval(&self, temp: Real, soc: Real) -> Real {
        match self {
            Parameter::Scalar(v) => *v,
            Parameter::Table(table) => table.interpolate(temp, soc),
        }
    }
}

impl From<Real> for Parameter {
    fn from(v: Real) -> Self {
        Parameter::Scalar(v)
    }
}

/// Named components of one sub-model, as found in its configuration entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Components(pub BTreeMap<String, Parameter>);

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and programmatic setups.
    pub fn with(mut self, name: &str, value: impl Into<Parameter>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Required component, validated.
    pub fn parameter(&self, name: &str) -> ModelResult<Parameter> {
        self.optional(name)?
            .ok_or_else(|| ModelError::MissingComponent {
                name: name.to_string(),
            })
    }

    /// Optional component, validated when present.
    pub fn optional(&self, name: &str) -> ModelResult<Option<Parameter>> {
        match self.0.get(name) {
            Some(p) => {
                p.validate(name)?;
                Ok(Some(p.clone()))
            }
            None => Ok(None),
        }
    }

    /// Required component that must be a plain number.
    pub fn scalar(&self, name: &str) -> ModelResult<Real> {
        match self.parameter(name)? {
            Parameter::Scalar(v) => Ok(v),
            Parameter::Table(_) => Err(ModelError::ExpectedScalar {
                name: name.to_string(),
            }),
        }
    }
}
