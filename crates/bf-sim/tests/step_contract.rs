mod common;

use bf_core::{SignConvention, Tolerances, nearly_equal};
use bf_sim::{Bess, BessVariant, DropflowBess, FadingBess};
use common::*;

fn dropflow(sign_convention: SignConvention, check_soh_every: u64) -> bf_sim::BessState<bf_sim::Dropflow> {
    DropflowBess::get_init_state_every(
        &dropflow_models(),
        &options(sign_convention),
        "current",
        check_soh_every,
    )
    .unwrap()
}

fn fading(sign_convention: SignConvention) -> bf_sim::BessState<bf_sim::Fading> {
    FadingBess::get_init_state(&fading_models(), &options(sign_convention), "current").unwrap()
}

#[test]
fn one_second_discharge_active() {
    let s0 = dropflow(SignConvention::Active, 1);
    let s1 = DropflowBess::step(&s0, 1.0, 1.0, 25.0);
    assert_eq!(s1.elapsed_time, 1.0);
    assert_eq!(s1.iter(), 1);
    assert!(s1.soc() < 0.5);
    assert!(nearly_equal(s1.soc(), 0.5 - 1.0 / 10800.0, Tolerances::default()));
}

#[test]
fn one_second_charge_passive() {
    let s0 = dropflow(SignConvention::Passive, 1);
    let s1 = DropflowBess::step(&s0, 1.0, 1.0, 25.0);
    assert_eq!(s1.elapsed_time, 1.0);
    assert_eq!(s1.iter(), 1);
    assert!(s1.soc() > 0.5);
}

#[test]
fn elapsed_time_advances_by_dt() {
    let mut d = dropflow(SignConvention::Active, 1);
    let mut f = fading(SignConvention::Active);
    for dt in [0.5, 1.0, 7.25, 60.0] {
        let d1 = DropflowBess::step(&d, 2.0, dt, 25.0);
        let f1 = FadingBess::step(&f, 2.0, dt, 25.0);
        assert_eq!(d1.elapsed_time, d.elapsed_time + dt);
        assert_eq!(f1.elapsed_time, f.elapsed_time + dt);
        d = d1;
        f = f1;
    }
}

#[test]
fn dropflow_capacity_follows_soh() {
    let mut s = dropflow(SignConvention::Active, 1);
    for k in 0..200 {
        let i = if (k / 20) % 2 == 0 { 3.0 } else { -3.0 };
        s = DropflowBess::step(&s, i, 60.0, 25.0);
        assert_eq!(s.c_max, s.soh * s.nominal_capacity);
        assert!(s.soh > 0.0 && s.soh <= 1.0);
    }
    assert!(s.soh < 1.0);
}

#[test]
fn fading_soh_follows_capacity() {
    let mut s = fading(SignConvention::Active);
    let mut c_prev = s.c_max;
    for _ in 0..50 {
        s = FadingBess::step(&s, 3.0, 60.0, 25.0);
        assert_eq!(s.soh, s.c_max / s.nominal_capacity);
        assert!(s.c_max <= c_prev);
        c_prev = s.c_max;
    }
    assert!(s.soh < 1.0);
    assert!(s.electrical_state.r0_growth > 1.0);
}

#[test]
fn fading_soc_uses_faded_capacity() {
    let s0 = fading(SignConvention::Active);
    let s1 = FadingBess::step(&s0, 3.0, 60.0, 25.0);
    assert!(s1.c_max < s0.c_max);
    let expected = 0.5 - 3.0 * 60.0 / (3600.0 * s1.c_max);
    assert!(nearly_equal(s1.soc(), expected, Tolerances::default()));
}

#[test]
fn recompute_happens_on_cadence_only() {
    let cadence = 3;
    let mut s = dropflow(SignConvention::Active, cadence);
    for k in 0..10 {
        let next = DropflowBess::step(&s, 2.0 - k as f64 * 0.5, 30.0, 25.0);
        let before = s.aging_state().recomputations;
        let after = next.aging_state().recomputations;
        if s.iter() % cadence == 0 {
            assert_eq!(after, before + 1);
        } else {
            assert_eq!(after, before);
            assert_eq!(next.soh, s.soh);
        }
        assert_eq!(next.iter(), s.iter() + 1);
        s = next;
    }
    // iters 0, 3, 6 and 9
    assert_eq!(s.aging_state().recomputations, 4);
}

#[test]
fn skipped_steps_still_feed_the_history() {
    let s0 = dropflow(SignConvention::Active, 100);
    let s1 = DropflowBess::step(&s0, 1.0, 1.0, 25.0);
    let s2 = DropflowBess::step(&s1, 1.0, 1.0, 25.0);
    assert_eq!(s2.aging_state().recomputations, 1);
    assert_eq!(s2.aging_state().n_samples, 2.0);
}

#[test]
fn zero_current_keeps_soc() {
    let mut d = dropflow(SignConvention::Active, 1);
    let mut f = fading(SignConvention::Passive);
    let soc0 = d.soc();
    // ambient above the initial 25 °C so the cell drifts warmer
    for _ in 0..500 {
        d = DropflowBess::step(&d, 0.0, 10.0, 40.0);
        f = FadingBess::step(&f, 0.0, 10.0, 40.0);
        assert_eq!(d.soc(), soc0);
        assert_eq!(f.soc(), soc0);
    }
    assert!(d.temp() > 30.0);
    assert!(f.temp() > 30.0);
}

#[test]
fn same_physical_current_heats_alike_under_both_conventions() {
    let models = vec![thevenin(), r2c_entropic(), bolun()];
    let init = |conv| {
        DropflowBess::get_init_state(&models, &options(conv), "current").unwrap()
    };
    let mut a = init(SignConvention::Active);
    let mut p = init(SignConvention::Passive);
    // 5 A discharge, then 5 A charge
    for (i_active, steps) in [(5.0, 30), (-5.0, 30)] {
        for _ in 0..steps {
            a = DropflowBess::step(&a, i_active, 10.0, 25.0);
            p = DropflowBess::step(&p, -i_active, 10.0, 25.0);
            assert!(nearly_equal(a.soc(), p.soc(), Tolerances::default()));
            assert!(nearly_equal(a.v(), p.v(), Tolerances::default()));
            assert!(nearly_equal(a.temp(), p.temp(), Tolerances::default()));
            assert!(nearly_equal(
                a.thermal_state.heat,
                p.thermal_state.heat,
                Tolerances::default()
            ));
        }
    }
}

#[test]
fn step_leaves_previous_snapshot_untouched() {
    let s0 = dropflow(SignConvention::Active, 1);
    let copy = s0.clone();
    let s1 = DropflowBess::step(&s0, 5.0, 10.0, 35.0);
    assert_eq!(s0, copy);
    assert_ne!(s1, s0);

    let f0 = fading(SignConvention::Active);
    let copy = f0.clone();
    let _ = FadingBess::step(&f0, 5.0, 10.0, 35.0);
    assert_eq!(f0, copy);
}

fn feasible_currents_reach_bounds<V: BessVariant>(state: &bf_sim::BessState<V>) {
    let dt = 10.0;
    let (i_max, i_min) = Bess::<V>::get_feasible_current(state, state.soc(), dt);
    assert!(i_max >= i_min);
    for i in [i_max, i_min] {
        let soc = Bess::<V>::step(state, i, dt, 25.0).soc();
        let at_low = (soc - 0.1).abs() < 1e-12;
        let at_high = (soc - 0.9).abs() < 1e-12;
        assert!(at_low || at_high, "soc {soc} after current {i}");
    }
}

#[test]
fn feasible_current_hits_soc_bounds() {
    for conv in [SignConvention::Active, SignConvention::Passive] {
        feasible_currents_reach_bounds(&dropflow(conv, 1));
    }
}

#[test]
fn feasible_current_at_upper_bound() {
    let s = dropflow(SignConvention::Active, 1);
    let (i_max, i_min) = DropflowBess::get_feasible_current(&s, 0.9, 1.0);
    assert!((i_max - 0.8 * 10800.0).abs() < 1e-9);
    assert_eq!(i_min, 0.0);
}

#[test]
fn feasible_power_is_current_times_voltage() {
    let s0 = fading(SignConvention::Passive);
    let s = FadingBess::step(&s0, 2.0, 10.0, 25.0);
    let (i_max, i_min) = FadingBess::get_feasible_current(&s, 0.4, 5.0);
    let (p_max, p_min) = FadingBess::get_feasible_power(&s, 0.4, 5.0);
    assert_eq!(p_max, i_max * s.v());
    assert_eq!(p_min, i_min * s.v());
}

#[test]
fn charging_heats_the_cell() {
    let s0 = dropflow(SignConvention::Passive, 1);
    let mut s = s0.clone();
    for _ in 0..30 {
        s = DropflowBess::step(&s, 10.0, 10.0, 25.0);
    }
    assert!(s.temp() > s0.temp());
    assert!(s.v() > s0.v());
}
