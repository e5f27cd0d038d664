#![allow(dead_code)]

use bf_core::SignConvention;
use bf_models::{Components, StressModels};
use bf_project::{
    BatteryOptions, BatteryParams, BoundsDef, InitDef, ModelConfig, ModelType, RangeDef,
};

fn entry(kind: ModelType, class_name: &str, components: Components) -> ModelConfig {
    ModelConfig {
        kind,
        class_name: class_name.to_string(),
        use_fading: None,
        alpha_fading: None,
        beta_fading: None,
        components,
        stress_models: None,
    }
}

fn circuit() -> Components {
    Components::new()
        .with("r0", 0.01)
        .with("r1", 0.005)
        .with("c", 10000.0)
        .with("v_ocv", 3.6)
}

pub fn thevenin() -> ModelConfig {
    ModelConfig {
        use_fading: Some(false),
        ..entry(ModelType::Electrical, "TheveninModel", circuit())
    }
}

pub fn thevenin_fading() -> ModelConfig {
    ModelConfig {
        use_fading: Some(true),
        alpha_fading: Some(1e-3),
        beta_fading: Some(1e-3),
        ..entry(ModelType::Electrical, "TheveninFadingModel", circuit())
    }
}

pub fn r2c() -> ModelConfig {
    entry(
        ModelType::Thermal,
        "R2CThermal",
        Components::new()
            .with("c_core", 500.0)
            .with("c_surface", 50.0)
            .with("r_cond", 1.0)
            .with("r_conv", 5.0),
    )
}

/// `r2c` with a non-zero entropic coefficient.
pub fn r2c_entropic() -> ModelConfig {
    ModelConfig {
        components: r2c().components.with("dv_dt", 1e-3),
        ..r2c()
    }
}

pub fn bolun() -> ModelConfig {
    ModelConfig {
        stress_models: Some(StressModels::default()),
        ..entry(
            ModelType::Aging,
            "BolunDropflowModel",
            Components::new()
                .with("alpha_sei", 5.75e-2)
                .with("beta_sei", 121.0),
        )
    }
}

pub fn dropflow_models() -> Vec<ModelConfig> {
    vec![thevenin(), r2c(), bolun()]
}

pub fn fading_models() -> Vec<ModelConfig> {
    vec![thevenin_fading(), r2c()]
}

/// 3 Ah cell at half charge, SOC bounds [0.1, 0.9], 25 °C.
pub fn options(sign_convention: SignConvention) -> BatteryOptions {
    BatteryOptions {
        params: BatteryParams {
            nominal_capacity: 3.0,
            nominal_cost: 100.0,
            nominal_voltage: 3.6,
            nominal_dod: 0.8,
            nominal_lifetime: 3000.0,
            v_max: 4.2,
            v_min: 2.5,
        },
        init: InitDef {
            soc: 0.5,
            temperature: 25.0,
            temp_ambient: 25.0,
            voltage: None,
            i_r1: 0.0,
        },
        bounds: BoundsDef {
            soc: RangeDef {
                low: 0.1,
                high: 0.9,
            },
        },
        sign_convention,
    }
}
