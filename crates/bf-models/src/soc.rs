//! Coulomb-counting state of charge model.

use bf_core::{Real, SignConvention, ah_to_coulombs};

/// State of charge plus the bounds the battery is allowed to operate in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SocState {
    /// Present state of charge (fraction of capacity)
    pub soc: Real,
    /// Lower operating bound
    pub soc_min: Real,
    /// Upper operating bound
    pub soc_max: Real,
    /// Interpretation of the current sign
    pub sign_convention: SignConvention,
}

/// Stateless SOC model.
///
/// ```text
/// soc' = soc + s * i * dt / (3600 * c_max)
/// ```
///
/// with `s = +1` when positive current charges (passive convention) and
/// `s = -1` when it discharges (active convention). `c_max` is in Ah.
pub struct SocModel;

impl SocModel {
    pub fn get_init_state(
        soc: Real,
        soc_min: Real,
        soc_max: Real,
        sign_convention: SignConvention,
    ) -> SocState {
        SocState {
            soc,
            soc_min,
            soc_max,
            sign_convention,
        }
    }

    /// Integrate current `i` (A) over `dt` (s) against capacity `c_max` (Ah).
    pub fn compute_soc(state: &SocState, i: Real, dt: Real, c_max: Real) -> (SocState, Real) {
        let s = state.sign_convention.charge_sign();
        let soc = state.soc + s * i * dt / ah_to_coulombs(c_max);
        (SocState { soc, ..*state }, soc)
    }

    /// Currents that take `soc` exactly to the upper and lower bound in `dt`.
    ///
    /// Returns `(i_max, i_min)` in the configured sign convention, with
    /// `i_max >= i_min` for positive `dt` and capacity.
    pub fn get_feasible_current(state: &SocState, soc: Real, c_max: Real, dt: Real) -> (Real, Real) {
        let s = state.sign_convention.charge_sign();
        let charge = ah_to_coulombs(c_max);
        let to_upper = s * (state.soc_max - soc) * charge / dt;
        let to_lower = s * (state.soc_min - soc) * charge / dt;
        (to_upper.max(to_lower), to_upper.min(to_lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(conv: SignConvention) -> SocState {
        SocModel::get_init_state(0.5, 0.1, 0.9, conv)
    }

    #[test]
    fn passive_positive_current_charges() {
        let (next, soc) = SocModel::compute_soc(&state(SignConvention::Passive), 1.0, 3600.0, 10.0);
        assert!((soc - 0.6).abs() < 1e-12);
        assert_eq!(next.soc, soc);
        assert_eq!(next.soc_min, 0.1);
    }

    #[test]
    fn active_positive_current_discharges() {
        let (_, soc) = SocModel::compute_soc(&state(SignConvention::Active), 1.0, 3600.0, 10.0);
        assert!((soc - 0.4).abs() < 1e-12);
    }

    #[test]
    fn zero_current_keeps_soc() {
        let s0 = state(SignConvention::Active);
        let (s1, _) = SocModel::compute_soc(&s0, 0.0, 60.0, 3.0);
        assert_eq!(s1, s0);
    }

    #[test]
    fn feasible_current_hits_bounds() {
        for conv in [SignConvention::Passive, SignConvention::Active] {
            let s0 = state(conv);
            let (i_max, i_min) = SocModel::get_feasible_current(&s0, 0.5, 3.0, 60.0);
            assert!(i_max >= i_min);

            let (_, soc_a) = SocModel::compute_soc(&s0, i_max, 60.0, 3.0);
            let (_, soc_b) = SocModel::compute_soc(&s0, i_min, 60.0, 3.0);
            let (lo, hi) = if soc_a < soc_b { (soc_a, soc_b) } else { (soc_b, soc_a) };
            assert!((lo - 0.1).abs() < 1e-12);
            assert!((hi - 0.9).abs() < 1e-12);
        }
    }

    #[test]
    fn feasible_current_passive_sign() {
        let (i_max, i_min) =
            SocModel::get_feasible_current(&state(SignConvention::Passive), 0.5, 1.0, 3600.0);
        assert!((i_max - 0.4).abs() < 1e-12);
        assert!((i_min + 0.4).abs() < 1e-12);
    }

    #[test]
    fn feasible_current_does_not_touch_state() {
        let s0 = state(SignConvention::Active);
        let copy = s0;
        let _ = SocModel::get_feasible_current(&s0, 0.2, 3.0, 1.0);
        assert_eq!(s0, copy);
    }
}
