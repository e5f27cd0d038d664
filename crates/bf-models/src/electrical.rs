//! First-order Thevenin equivalent circuit.

use crate::components::{Components, Parameter};
use crate::error::{ModelError, ModelResult};
use bf_core::{Real, SignConvention};
use std::sync::Arc;

/// Circuit components, each a function of temperature and SOC.
#[derive(Debug, Clone, PartialEq)]
pub struct TheveninParams {
    /// Series resistance (Ω)
    pub r0: Parameter,
    /// RC branch resistance (Ω)
    pub r1: Parameter,
    /// RC branch capacitance (F)
    pub c: Parameter,
    /// Open circuit voltage (V)
    pub v_ocv: Parameter,
}

impl TheveninParams {
    pub fn from_components(components: &Components) -> ModelResult<Self> {
        Ok(Self {
            r0: components.parameter("r0")?,
            r1: components.parameter("r1")?,
            c: components.parameter("c")?,
            v_ocv: components.parameter("v_ocv")?,
        })
    }
}

/// Initial conditions for the circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalInit {
    /// Initial SOC, used to evaluate the components
    pub soc: Real,
    /// Initial battery temperature (°C)
    pub temperature: Real,
    /// Initial terminal voltage; defaults to the open circuit voltage
    pub voltage: Option<Real>,
    /// Initial current through the RC resistor (A)
    pub i_r1: Real,
}

/// Circuit state after the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricalState {
    pub params: Arc<TheveninParams>,
    pub sign_convention: SignConvention,
    /// Component values evaluated at the last step
    pub r0: Real,
    pub r1: Real,
    pub c: Real,
    pub v_ocv: Real,
    /// Terminal current (A)
    pub i: Real,
    /// Current through the RC resistor (A)
    pub i_r1: Real,
    /// Drop over r0 (V)
    pub v_r0: Real,
    /// Drop over the RC branch (V)
    pub v_rc: Real,
    /// Terminal voltage (V)
    pub v: Real,
    /// Terminal power (W)
    pub p: Real,
    /// Joule heat generated in the last step (W)
    pub q: Real,
}

/// Read access shared by the plain and fading circuits.
pub trait ElectricalReadout {
    /// The underlying Thevenin state.
    fn thevenin(&self) -> &ElectricalState;

    /// Terminal voltage after the last step.
    fn v(&self) -> Real {
        self.thevenin().v
    }
}

impl ElectricalReadout for ElectricalState {
    fn thevenin(&self) -> &ElectricalState {
        self
    }
}

/// Stateless Thevenin model.
///
/// ```text
/// i_r1' = a * i_r1 + (1 - a) * i,   a = exp(-dt / (r1 * c))
/// v     = v_ocv + s * (r0 * i + r1 * i_r1')
/// ```
///
/// where `s` is +1 when positive current charges the battery and -1 otherwise.
pub struct TheveninModel;

impl TheveninModel {
    pub fn get_init_state(
        components: &Components,
        inits: &ElectricalInit,
        sign_convention: SignConvention,
    ) -> ModelResult<ElectricalState> {
        let params = TheveninParams::from_components(components)?;

        let r0 = params.r0.eval(inits.temperature, inits.soc);
        let r1 = params.r1.eval(inits.temperature, inits.soc);
        let c = params.c.eval(inits.temperature, inits.soc);
        let v_ocv = params.v_ocv.eval(inits.temperature, inits.soc);
        if r0 < 0.0 || r1 <= 0.0 || c <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "thevenin r0 must be non-negative, r1 and c positive",
            });
        }

        let v_rc = r1 * inits.i_r1;
        let v = inits
            .voltage
            .unwrap_or(v_ocv + sign_convention.charge_sign() * v_rc);

        Ok(ElectricalState {
            params: Arc::new(params),
            sign_convention,
            r0,
            r1,
            c,
            v_ocv,
            i: 0.0,
            i_r1: inits.i_r1,
            v_r0: 0.0,
            v_rc,
            v,
            p: 0.0,
            q: 0.0,
        })
    }

    /// Advance the circuit under an imposed current.
    ///
    /// Returns the new state, the terminal voltage and the current.
    pub fn step_current_driven(
        state: &ElectricalState,
        i: Real,
        dt: Real,
        temp: Real,
        soc: Real,
    ) -> (ElectricalState, Real, Real) {
        Self::step_scaled(state, i, dt, temp, soc, 1.0)
    }

    /// Same as [`Self::step_current_driven`] with `r0` multiplied by `r0_scale`.
    pub(crate) fn step_scaled(
        state: &ElectricalState,
        i: Real,
        dt: Real,
        temp: Real,
        soc: Real,
        r0_scale: Real,
    ) -> (ElectricalState, Real, Real) {
        let params = &state.params;
        let r0 = params.r0.eval(temp, soc) * r0_scale;
        let r1 = params.r1.eval(temp, soc);
        let c = params.c.eval(temp, soc);
        let v_ocv = params.v_ocv.eval(temp, soc);

        let decay = (-dt / (r1 * c)).exp();
        let i_r1 = decay * state.i_r1 + (1.0 - decay) * i;

        let v_r0 = r0 * i;
        let v_rc = r1 * i_r1;
        let v = v_ocv + state.sign_convention.charge_sign() * (v_r0 + v_rc);

        let next = ElectricalState {
            params: Arc::clone(params),
            sign_convention: state.sign_convention,
            r0,
            r1,
            c,
            v_ocv,
            i,
            i_r1,
            v_r0,
            v_rc,
            v,
            p: v * i,
            q: r0 * i * i + r1 * i_r1 * i_r1,
        };
        (next, v, i)
    }

    /// Joule heat (W) dissipated by both resistors.
    pub fn compute_generated_heat(state: &ElectricalState) -> Real {
        state.r0 * state.i * state.i + state.r1 * state.i_r1 * state.i_r1
    }
}
