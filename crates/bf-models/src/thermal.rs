//! Lumped two-resistor, two-capacitor thermal network.

use crate::components::{Components, Parameter};
use crate::error::{ModelError, ModelResult};
use bf_core::{Real, SignConvention, celsius_to_kelvin};
use nalgebra::{Matrix2, Vector2};
use std::sync::Arc;

/// Network parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct R2CParams {
    /// Heat capacity of the cell core (J/K)
    pub c_core: Real,
    /// Heat capacity of the cell surface (J/K)
    pub c_surface: Real,
    /// Conduction resistance core to surface (K/W)
    pub r_cond: Real,
    /// Convection resistance surface to ambient (K/W)
    pub r_conv: Real,
    /// Entropic coefficient dU/dT (V/K)
    pub dv_dt: Parameter,
}

impl R2CParams {
    pub fn from_components(components: &Components) -> ModelResult<Self> {
        let params = Self {
            c_core: components.scalar("c_core")?,
            c_surface: components.scalar("c_surface")?,
            r_cond: components.scalar("r_cond")?,
            r_conv: components.scalar("r_conv")?,
            dv_dt: components
                .optional("dv_dt")?
                .unwrap_or(Parameter::Scalar(0.0)),
        };
        if params.c_core <= 0.0 || params.c_surface <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "thermal capacities must be positive",
            });
        }
        if params.r_cond <= 0.0 || params.r_conv <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "thermal resistances must be positive",
            });
        }
        Ok(params)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermalState {
    pub params: Arc<R2CParams>,
    pub sign_convention: SignConvention,
    /// Core temperature (°C)
    pub temp: Real,
    /// Surface temperature (°C)
    pub temp_surface: Real,
    /// Total heat input of the last step (W)
    pub heat: Real,
}

/// Stateless R2C thermal model.
///
/// ```text
/// C_c dTc/dt = Q - (Tc - Ts) / R_cond
/// C_s dTs/dt = (Tc - Ts) / R_cond - (Ts - T_amb) / R_conv
/// ```
///
/// integrated with one backward Euler step. `Q` is the Joule heat plus the
/// reversible term `i_dis * T * dU/dT`, where `i_dis` is the current
/// expressed as positive on discharge whatever the sign convention.
pub struct R2CThermalModel;

impl R2CThermalModel {
    pub fn get_init_state(
        components: &Components,
        temp: Real,
        sign_convention: SignConvention,
    ) -> ModelResult<ThermalState> {
        let params = R2CParams::from_components(components)?;
        Ok(ThermalState {
            params: Arc::new(params),
            sign_convention,
            temp,
            temp_surface: temp,
            heat: 0.0,
        })
    }

    /// Advance temperatures by `dt`.
    ///
    /// Degenerate inputs (e.g. `dt == 0`) yield non-finite temperatures rather than
    /// an error.
    pub fn compute_temp(
        state: &ThermalState,
        q: Real,
        i: Real,
        t_amb: Real,
        soc: Real,
        dt: Real,
    ) -> (ThermalState, Real) {
        let p = &state.params;
        let i_dis = -state.sign_convention.charge_sign() * i;
        let reversible = i_dis * celsius_to_kelvin(state.temp) * p.dv_dt.eval(state.temp, soc);
        let heat = q + reversible;

        let g_cond = 1.0 / p.r_cond;
        let g_conv = 1.0 / p.r_conv;
        let k_core = p.c_core / dt;
        let k_surf = p.c_surface / dt;

        let a = Matrix2::new(
            k_core + g_cond,
            -g_cond,
            -g_cond,
            k_surf + g_cond + g_conv,
        );
        let b = Vector2::new(
            k_core * state.temp + heat,
            k_surf * state.temp_surface + g_conv * t_amb,
        );
        let x = a.lu().solve(&b).unwrap_or_else(|| Vector2::repeat(Real::NAN));

        let next = ThermalState {
            params: Arc::clone(&state.params),
            sign_convention: state.sign_convention,
            temp: x[0],
            temp_surface: x[1],
            heat,
        };
        (next, x[0])
    }
}
