//! Bolun stress-factor aging model driven by dropflow cycle counting.
//!
//! Capacity fade follows Xu et al., "Modeling of lithium-ion battery
//! degradation for cell life assessment" (2016):
//!
//! ```text
//! f_d = sum_cycles n * S_dod(d) * S_soc(soc) * S_temp(T)      (cycle aging)
//!     + S_time(t) * S_soc(avg soc) * S_temp(avg T)           (calendar aging)
//! soh = alpha_sei * exp(-beta_sei * f_d) + (1 - alpha_sei) * exp(-f_d)
//! ```

use crate::components::Components;
use crate::error::{ModelError, ModelResult};
use crate::rainflow::{Cycle, DropflowCounter, Reversal};
use bf_core::{Real, celsius_to_kelvin};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Depth-of-discharge stress `1 / (k1 * d^k2 + k3)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DodStress {
    pub k_delta1: Real,
    pub k_delta2: Real,
    pub k_delta3: Real,
}

impl Default for DodStress {
    fn default() -> Self {
        Self {
            k_delta1: 1.40e5,
            k_delta2: -5.01e-1,
            k_delta3: -1.23e5,
        }
    }
}

impl DodStress {
    /// Zero depth evaluates to zero stress.
    pub fn eval(&self, depth: Real) -> Real {
        if depth == 0.0 {
            return 0.0;
        }
        1.0 / (self.k_delta1 * depth.powf(self.k_delta2) + self.k_delta3)
    }
}

/// SOC stress `exp(k_sigma * (soc - sigma_ref))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocStress {
    pub k_sigma: Real,
    pub sigma_ref: Real,
}

impl Default for SocStress {
    fn default() -> Self {
        Self {
            k_sigma: 1.04,
            sigma_ref: 0.5,
        }
    }
}

impl SocStress {
    pub fn eval(&self, soc: Real) -> Real {
        (self.k_sigma * (soc - self.sigma_ref)).exp()
    }
}

/// Temperature stress `exp(k_temp * (T - T_ref) * T_ref / T)`, kelvin inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureStress {
    pub k_temp: Real,
}

impl Default for TemperatureStress {
    fn default() -> Self {
        Self { k_temp: 6.93e-2 }
    }
}

impl TemperatureStress {
    /// Both temperatures in °C.
    pub fn eval(&self, temp: Real, temp_ref: Real) -> Real {
        let t = celsius_to_kelvin(temp);
        let t_ref = celsius_to_kelvin(temp_ref);
        (self.k_temp * (t - t_ref) * t_ref / t).exp()
    }
}

/// Calendar stress `k_time * t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeStress {
    /// Per second
    pub k_time: Real,
}

impl Default for TimeStress {
    fn default() -> Self {
        Self { k_time: 4.14e-10 }
    }
}

impl TimeStress {
    pub fn eval(&self, elapsed: Real) -> Real {
        self.k_time * elapsed
    }
}

/// Coefficients of every stress factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressModels {
    pub dod: DodStress,
    pub soc: SocStress,
    pub temperature: TemperatureStress,
    pub time: TimeStress,
}

impl StressModels {
    /// Damage contributed by one counted cycle.
    pub fn cycle_damage(&self, cycle: &Cycle, temp_ref: Real) -> Real {
        cycle.count
            * self.dod.eval(cycle.depth)
            * self.soc.eval(cycle.mean_soc)
            * self.temperature.eval(cycle.mean_temp, temp_ref)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BolunParams {
    /// Share of capacity lost to SEI formation
    pub alpha_sei: Real,
    /// SEI formation rate
    pub beta_sei: Real,
    pub stress: StressModels,
}

impl BolunParams {
    pub fn soh_from_damage(&self, f_d: Real) -> Real {
        self.alpha_sei * (-self.beta_sei * f_d).exp() + (1.0 - self.alpha_sei) * (-f_d).exp()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BolunDropflowState {
    pub params: Arc<BolunParams>,
    pub counter: DropflowCounter,
    /// Damage from cycles already closed by the counter
    pub f_cyc: Real,
    pub soc_sum: Real,
    pub temp_sum: Real,
    pub n_samples: Real,
    /// Total damage at the last recomputation
    pub f_d: Real,
    /// State of health at the last recomputation
    pub soh: Real,
    /// How many times SOH has been recomputed
    pub recomputations: u64,
}

/// Stateless Bolun model.
pub struct BolunDropflowModel;

impl BolunDropflowModel {
    pub fn get_init_state(
        components: &Components,
        stress_models: StressModels,
    ) -> ModelResult<BolunDropflowState> {
        let alpha_sei = components.scalar("alpha_sei")?;
        let beta_sei = components.scalar("beta_sei")?;
        if !(0.0..=1.0).contains(&alpha_sei) {
            return Err(ModelError::InvalidArg {
                what: "alpha_sei must lie in [0, 1]",
            });
        }
        if beta_sei <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "beta_sei must be positive",
            });
        }

        Ok(BolunDropflowState {
            params: Arc::new(BolunParams {
                alpha_sei,
                beta_sei,
                stress: stress_models,
            }),
            counter: DropflowCounter::new(),
            f_cyc: 0.0,
            soc_sum: 0.0,
            temp_sum: 0.0,
            n_samples: 0.0,
            f_d: 0.0,
            soh: 1.0,
            recomputations: 0,
        })
    }

    /// Ingest one sample and, when `recompute` is set, refresh the SOH.
    ///
    /// Without `recompute` the stress history still advances and the SOH of
    /// the last recomputation is returned.
    pub fn compute_soh(
        state: &BolunDropflowState,
        temp: Real,
        temp_ref: Real,
        soc: Real,
        elapsed_time: Real,
        recompute: bool,
    ) -> (BolunDropflowState, Real) {
        let params = Arc::clone(&state.params);
        let stress = &params.stress;
        let mut next = state.clone();

        let mut damage = 0.0;
        next.counter.push(Reversal { soc, temp }, |cycle| {
            damage += stress.cycle_damage(&cycle, temp_ref);
        });
        next.f_cyc += damage;
        next.soc_sum += soc;
        next.temp_sum += temp;
        next.n_samples += 1.0;

        if recompute {
            let residual: Real = next
                .counter
                .residual()
                .map(|cycle| stress.cycle_damage(&cycle, temp_ref))
                .sum();
            let avg_soc = next.soc_sum / next.n_samples;
            let avg_temp = next.temp_sum / next.n_samples;
            let f_cal = stress.time.eval(elapsed_time)
                * stress.soc.eval(avg_soc)
                * stress.temperature.eval(avg_temp, temp_ref);

            next.f_d = next.f_cyc + residual + f_cal;
            next.soh = params.soh_from_damage(next.f_d);
            next.recomputations += 1;
        }

        let soh = next.soh;
        (next, soh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() -> BolunDropflowState {
        let comps = Components::new()
            .with("alpha_sei", 5.75e-2)
            .with("beta_sei", 121.0);
        BolunDropflowModel::get_init_state(&comps, StressModels::default()).unwrap()
    }

    #[test]
    fn fresh_cell_is_healthy() {
        let s = init();
        assert_eq!(s.soh, 1.0);
        assert!((s.params.soh_from_damage(0.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn stress_reference_points() {
        let stress = StressModels::default();
        assert_eq!(stress.dod.eval(0.0), 0.0);
        assert!((stress.soc.eval(0.5) - 1.0).abs() < 1e-15);
        assert!((stress.temperature.eval(25.0, 25.0) - 1.0).abs() < 1e-15);
        assert!(stress.temperature.eval(45.0, 25.0) > 1.0);
        assert!(stress.dod.eval(1.0) > stress.dod.eval(0.1));
    }

    #[test]
    fn zero_depth_is_stress_free_for_any_exponent() {
        let dod = DodStress {
            k_delta1: 1.0,
            k_delta2: 2.0,
            k_delta3: 4.0,
        };
        assert_eq!(dod.eval(0.0), 0.0);
        assert_eq!(dod.eval(1.0), 0.2);
    }

    #[test]
    fn cycling_degrades() {
        let mut s = init();
        let mut t = 0.0;
        for k in 0..400 {
            let soc = if k % 2 == 0 { 0.1 } else { 0.9 };
            s = BolunDropflowModel::compute_soh(&s, 25.0, 25.0, soc, t, true).0;
            t += 3600.0;
        }
        assert!(s.soh < 1.0);
        assert!(s.soh > 0.0);
        assert!(s.f_cyc > 0.0);
    }

    #[test]
    fn skipped_recompute_carries_soh_forward() {
        let s0 = init();
        let (s1, soh1) = BolunDropflowModel::compute_soh(&s0, 25.0, 25.0, 0.2, 1e6, true);
        let (s2, soh2) = BolunDropflowModel::compute_soh(&s1, 25.0, 25.0, 0.8, 2e6, false);
        assert_eq!(soh1, soh2);
        assert_eq!(s2.recomputations, 1);
        // history still advanced
        assert_eq!(s2.n_samples, 2.0);
        assert_eq!(s2.counter.reversals().len(), 2);
    }

    #[test]
    fn calendar_aging_grows_with_time() {
        let s0 = init();
        let (_, early) = BolunDropflowModel::compute_soh(&s0, 25.0, 25.0, 0.5, 3600.0, true);
        let (_, late) = BolunDropflowModel::compute_soh(&s0, 25.0, 25.0, 0.5, 3.6e7, true);
        assert!(late < early);
        assert!(early <= 1.0);
    }

    #[test]
    fn invalid_alpha_rejected() {
        let comps = Components::new().with("alpha_sei", 1.5).with("beta_sei", 121.0);
        assert!(BolunDropflowModel::get_init_state(&comps, StressModels::default()).is_err());
    }
}
