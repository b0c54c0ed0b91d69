//! View-level entry points: one call per dashboard tab.

use crate::system::{parse_component, to_js, BifurcationPayload, TrajectoryPayload};
use gumowski_core::dashboard::{AttractorSettings, BifurcationView, DashboardConfig};
use gumowski_core::ParameterTriple;
use wasm_bindgen::prelude::*;

/// Menu, sliders, defaults and video paths.
#[wasm_bindgen]
pub fn dashboard_config() -> Result<JsValue, JsValue> {
    to_js(&DashboardConfig::default())
}

pub(crate) fn attractor_view(
    a: f64,
    b: f64,
    mu: f64,
    n_steps: u32,
) -> Result<TrajectoryPayload, String> {
    let settings = AttractorSettings {
        params: ParameterTriple::new(a, b, mu),
        n_steps: n_steps as usize,
        ..AttractorSettings::default()
    };
    let states = settings.compute().map_err(|err| err.to_string())?;
    Ok(TrajectoryPayload::from(states.as_slice()))
}

pub(crate) fn bifurcation_view(
    a: f64,
    b: f64,
    mu_min: f64,
    mu_max: f64,
    component: &str,
) -> Result<BifurcationPayload, String> {
    let component = parse_component(component)?;
    let view = BifurcationView {
        a,
        b,
        mu_min,
        mu_max,
    };
    let diagram = view.compute().map_err(|err| err.to_string())?;
    Ok(BifurcationPayload::new(&diagram, component))
}

/// Attractors tab: orbit from the default seed.
/// `n_steps = 0` selects the default length.
#[wasm_bindgen]
pub fn compute_attractor_view(a: f64, b: f64, mu: f64, n_steps: u32) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let n_steps = if n_steps == 0 {
        AttractorSettings::default().n_steps as u32
    } else {
        n_steps
    };
    let payload = attractor_view(a, b, mu, n_steps).map_err(|err| JsValue::from_str(&err))?;
    to_js(&payload)
}

/// Bifurcation tab: μ sweep over `[mu_min, mu_max]` with the default resolution.
#[wasm_bindgen]
pub fn compute_bifurcation_view(
    a: f64,
    b: f64,
    mu_min: f64,
    mu_max: f64,
    component: &str,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let payload = bifurcation_view(a, b, mu_min, mu_max, component)
        .map_err(|err| JsValue::from_str(&err))?;
    to_js(&payload)
}
