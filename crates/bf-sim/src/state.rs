//! Battery snapshots.

use crate::bess::BessVariant;
use bf_core::Real;
use bf_models::{ElectricalReadout, SocState, ThermalState};

/// Complete state of one battery at one instant.
///
/// A step never mutates a snapshot; it returns the next one. Sub-model
/// parameters sit behind `Arc`, so keeping a history of snapshots is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct BessState<V: BessVariant> {
    /// Ah
    pub nominal_capacity: Real,
    pub nominal_cost: Real,
    /// V
    pub nominal_voltage: Real,
    pub nominal_dod: Real,
    /// Cycles
    pub nominal_lifetime: Real,
    /// Present maximum capacity (Ah)
    pub c_max: Real,
    /// Reference ambient temperature (°C), fixed at init
    pub temp_ambient: Real,
    pub v_max: Real,
    pub v_min: Real,
    /// Seconds since init
    pub elapsed_time: Real,
    /// State of health, 1 for a fresh cell
    pub soh: Real,
    pub electrical_state: V::Electrical,
    pub thermal_state: ThermalState,
    pub soc_state: SocState,
    /// Variant-specific part
    pub variant_state: V::Extra,
}

/// Fields a step replaces; everything else carries over unchanged.
pub(crate) struct StepUpdate<V: BessVariant> {
    pub dt: Real,
    pub c_max: Real,
    pub soh: Real,
    pub electrical_state: V::Electrical,
    pub thermal_state: ThermalState,
    pub soc_state: SocState,
    pub variant_state: V::Extra,
}

impl<V: BessVariant> BessState<V> {
    pub(crate) fn advance(&self, update: StepUpdate<V>) -> Self {
        Self {
            nominal_capacity: self.nominal_capacity,
            nominal_cost: self.nominal_cost,
            nominal_voltage: self.nominal_voltage,
            nominal_dod: self.nominal_dod,
            nominal_lifetime: self.nominal_lifetime,
            c_max: update.c_max,
            temp_ambient: self.temp_ambient,
            v_max: self.v_max,
            v_min: self.v_min,
            elapsed_time: self.elapsed_time + update.dt,
            soh: update.soh,
            electrical_state: update.electrical_state,
            thermal_state: update.thermal_state,
            soc_state: update.soc_state,
            variant_state: update.variant_state,
        }
    }

    pub fn soc(&self) -> Real {
        self.soc_state.soc
    }

    /// Core temperature (°C).
    pub fn temp(&self) -> Real {
        self.thermal_state.temp
    }

    /// Terminal voltage (V).
    pub fn v(&self) -> Real {
        self.electrical_state.v()
    }

    pub fn readout(&self) -> Readout {
        Readout {
            time: self.elapsed_time,
            soc: self.soc(),
            temp: self.temp(),
            soh: self.soh,
            c_max: self.c_max,
            v: self.v(),
        }
    }
}

/// Scalar summary of a snapshot, one row of a run log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub time: Real,
    pub soc: Real,
    pub temp: Real,
    pub soh: Real,
    pub c_max: Real,
    pub v: Real,
}

impl Readout {
    pub const CSV_HEADER: &'static str = "time,soc,temp,soh,c_max,v";

    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.time, self.soc, self.temp, self.soh, self.c_max, self.v
        )
    }
}
