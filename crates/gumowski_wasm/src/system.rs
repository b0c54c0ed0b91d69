//! Core WASM kernel wrapper and the orbit/sweep queries.

use gumowski_core::bifurcation::{
    sweep, BifurcationDiagram, BifurcationSettings, Component, SweepRange,
};
use gumowski_core::trajectory::{finite_bounds, generate, Bounds, TrajectoryColumns};
use gumowski_core::{GumowskiMira, Parameter, ParameterTriple, State};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGumowskiMira {
    pub(crate) kernel: GumowskiMira,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrajectoryPayload {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) bounds: Option<Bounds>,
}

impl From<&[State]> for TrajectoryPayload {
    fn from(states: &[State]) -> Self {
        let TrajectoryColumns { x, y } = TrajectoryColumns::from(states);
        Self {
            x,
            y,
            bounds: finite_bounds(states),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BifurcationPayload {
    pub(crate) parameter: &'static str,
    pub(crate) param_values: Vec<f64>,
    pub(crate) values: Vec<f64>,
    pub(crate) last_states: Vec<State>,
}

impl BifurcationPayload {
    pub(crate) fn new(diagram: &BifurcationDiagram, component: Component) -> Self {
        let (param_values, values) = diagram.flatten(component);
        Self {
            parameter: diagram.parameter.name(),
            param_values,
            values,
            last_states: diagram.last_states.clone(),
        }
    }
}

pub(crate) fn parse_component(name: &str) -> Result<Component, String> {
    match name {
        "x" => Ok(Component::X),
        "y" => Ok(Component::Y),
        other => Err(format!("Unknown state component \"{other}\"; expected \"x\" or \"y\".")),
    }
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
}

impl WasmGumowskiMira {
    pub(crate) fn trajectory_payload(
        &self,
        x0: f64,
        y0: f64,
        n_steps: u32,
        transient: u32,
    ) -> Result<TrajectoryPayload, String> {
        let states = generate(
            &self.kernel,
            State::new(x0, y0),
            n_steps as usize,
            transient as usize,
        )
        .map_err(|err| err.to_string())?;
        Ok(TrajectoryPayload::from(states.as_slice()))
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn bifurcation_payload(
        &self,
        x0: f64,
        y0: f64,
        param_index: u32,
        min: f64,
        max: f64,
        count: u32,
        total_time: u32,
        transient_time: u32,
        component: &str,
    ) -> Result<BifurcationPayload, String> {
        let parameter = Parameter::from_index(param_index as usize).ok_or_else(|| {
            format!("Parameter index {param_index} is out of range (0 = a, 1 = b, 2 = mu).")
        })?;
        let component = parse_component(component)?;
        let settings = BifurcationSettings {
            initial_state: State::new(x0, y0),
            base: self.kernel.params,
            parameter,
            range: SweepRange::new(min, max, count as usize),
            total_time: total_time as usize,
            transient_time: transient_time as usize,
        };
        let diagram = sweep(&settings).map_err(|err| err.to_string())?;
        Ok(BifurcationPayload::new(&diagram, component))
    }
}

#[wasm_bindgen]
impl WasmGumowskiMira {
    #[wasm_bindgen(constructor)]
    pub fn new(a: f64, b: f64, mu: f64) -> WasmGumowskiMira {
        console_error_panic_hook::set_once();
        WasmGumowskiMira {
            kernel: GumowskiMira::new(ParameterTriple::new(a, b, mu)),
        }
    }

    pub fn set_parameters(&mut self, a: f64, b: f64, mu: f64) {
        self.kernel = GumowskiMira::new(ParameterTriple::new(a, b, mu));
    }

    pub fn get_parameters(&self) -> Vec<f64> {
        self.kernel.params.to_array().to_vec()
    }

    pub fn step(&self, x: f64, y: f64) -> Vec<f64> {
        self.kernel.step(State::new(x, y)).to_array().to_vec()
    }

    /// Row-major 2×2 Jacobian at `(x, y)`.
    pub fn compute_jacobian(&self, x: f64, y: f64) -> Vec<f64> {
        self.kernel
            .jacobian(State::new(x, y))
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    /// `{ x, y, bounds }` of the orbit after `transient` of `n_steps` iterations.
    pub fn trajectory(
        &self,
        x0: f64,
        y0: f64,
        n_steps: u32,
        transient: u32,
    ) -> Result<JsValue, JsValue> {
        let payload = self
            .trajectory_payload(x0, y0, n_steps, transient)
            .map_err(|err| JsValue::from_str(&err))?;
        to_js(&payload)
    }

    /// `{ parameter, param_values, values, last_states }`, flattened for a scatter plot.
    /// The parameters not being swept are taken from this kernel.
    #[allow(clippy::too_many_arguments)]
    pub fn bifurcation(
        &self,
        x0: f64,
        y0: f64,
        param_index: u32,
        min: f64,
        max: f64,
        count: u32,
        total_time: u32,
        transient_time: u32,
        component: &str,
    ) -> Result<JsValue, JsValue> {
        let payload = self
            .bifurcation_payload(
                x0,
                y0,
                param_index,
                min,
                max,
                count,
                total_time,
                transient_time,
                component,
            )
            .map_err(|err| JsValue::from_str(&err))?;
        to_js(&payload)
    }
}
