// bf-core/src/units.rs

use uom::si::f64::{
    ElectricCharge as UomElectricCharge, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Charge = UomElectricCharge;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn ah(v: f64) -> Charge {
    use uom::si::electric_charge::ampere_hour;
    Charge::new::<ampere_hour>(v)
}

/// Celsius reading to kelvin.
#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    degc(t_c).get::<kelvin>()
}

/// Capacity in ampere-hours to coulombs (ampere-seconds).
#[inline]
pub fn ah_to_coulombs(c_ah: f64) -> f64 {
    use uom::si::electric_charge::coulomb;
    ah(c_ah).get::<coulomb>()
}

/// Seconds to hours.
#[inline]
pub fn seconds_to_hours(t_s: f64) -> f64 {
    use uom::si::time::hour;
    s(t_s).get::<hour>()
}
