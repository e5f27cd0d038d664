mod common;

use bf_core::SignConvention;
use bf_sim::{DropflowBess, FadingBess};
use common::*;
use proptest::prelude::*;

fn profile() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-5.0f64..5.0, 0.1f64..10.0), 1..60)
}

proptest! {
    #[test]
    fn dropflow_step_invariants(steps in profile(), cadence in 1u64..8, passive in any::<bool>()) {
        let conv = if passive { SignConvention::Passive } else { SignConvention::Active };
        let mut s = DropflowBess::get_init_state_every(&dropflow_models(), &options(conv), "current", cadence).unwrap();
        for (i, dt) in steps {
            let next = DropflowBess::step(&s, i, dt, 25.0);
            prop_assert_eq!(next.elapsed_time, s.elapsed_time + dt);
            prop_assert_eq!(next.iter(), s.iter() + 1);
            prop_assert_eq!(next.c_max, next.soh * next.nominal_capacity);
            prop_assert!(next.soh > 0.0 && next.soh <= 1.0);

            let recomputed = next.aging_state().recomputations - s.aging_state().recomputations;
            prop_assert_eq!(recomputed, u64::from(s.iter() % cadence == 0));
            s = next;
        }
    }

    #[test]
    fn fading_step_invariants(steps in profile(), passive in any::<bool>()) {
        let conv = if passive { SignConvention::Passive } else { SignConvention::Active };
        let mut s = FadingBess::get_init_state(&fading_models(), &options(conv), "current").unwrap();
        for (i, dt) in steps {
            let next = FadingBess::step(&s, i, dt, 25.0);
            prop_assert_eq!(next.elapsed_time, s.elapsed_time + dt);
            prop_assert_eq!(next.soh, next.c_max / next.nominal_capacity);
            prop_assert!(next.c_max <= s.c_max);
            prop_assert!(next.soh > 0.0 && next.soh <= 1.0);
            s = next;
        }
    }

    #[test]
    fn feasible_bounds_are_ordered(soc in 0.0f64..1.0, dt in 0.1f64..100.0, passive in any::<bool>()) {
        let conv = if passive { SignConvention::Passive } else { SignConvention::Active };
        let s = DropflowBess::get_init_state(&dropflow_models(), &options(conv), "current").unwrap();
        let (i_max, i_min) = DropflowBess::get_feasible_current(&s, soc, dt);
        prop_assert!(i_max >= i_min);
        let (p_max, p_min) = DropflowBess::get_feasible_power(&s, soc, dt);
        prop_assert_eq!(p_max, i_max * s.v());
        prop_assert_eq!(p_min, i_min * s.v());
    }
}
