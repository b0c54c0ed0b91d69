//! One-parameter bifurcation sweeps.
//!
//! Every sample is an independent orbit from the same seed; nothing is carried
//! over between neighbouring parameter values.

use crate::error::{MapError, Result};
use crate::kernel::{GumowskiMira, Parameter, ParameterTriple, State};
use crate::trajectory::Orbit;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Uniform partition of `[min, max]` into `count` samples, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl SweepRange {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// `min == max` is a valid degenerate range: every sample equals `min`.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(MapError::EmptyRange);
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(MapError::NonFiniteBound {
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(MapError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Sample values; `count == 1` yields `[min]`.
    pub fn values(&self) -> Result<Vec<f64>> {
        self.validate()?;
        if self.count == 1 {
            return Ok(vec![self.min]);
        }
        if self.min == self.max {
            return Ok(vec![self.min; self.count]);
        }
        // Blending the endpoints stays finite even when `max - min` overflows.
        let last = (self.count - 1) as f64;
        let mut values: Vec<f64> = (0..self.count)
            .map(|i| {
                let t = i as f64 / last;
                self.min * (1.0 - t) + self.max * t
            })
            .collect();
        // Pin the last sample so the axis ends exactly at `max`.
        if let Some(last) = values.last_mut() {
            *last = self.max;
        }
        Ok(values)
    }
}

/// Inputs of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BifurcationSettings {
    pub initial_state: State,
    /// Values of the parameters that are held fixed. The swept component is overwritten.
    pub base: ParameterTriple,
    pub parameter: Parameter,
    pub range: SweepRange,
    pub total_time: usize,
    pub transient_time: usize,
}

impl Default for BifurcationSettings {
    fn default() -> Self {
        Self {
            initial_state: State::new(0.0, 0.5),
            base: ParameterTriple::new(0.30, 0.20, 0.0),
            parameter: Parameter::Mu,
            range: SweepRange::new(-0.6, 0.6, 1000),
            total_time: 2000,
            transient_time: 1000,
        }
    }
}

/// State component plotted on the diagram's vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Component {
    #[default]
    X,
    Y,
}

impl Component {
    pub fn of(self, state: &State) -> f64 {
        match self {
            Component::X => state.x,
            Component::Y => state.y,
        }
    }
}

/// Post-transient orbits aligned with the sampled parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationDiagram {
    pub parameter: Parameter,
    pub param_values: Vec<f64>,
    pub orbits: Vec<Vec<State>>,
    /// Final state reached at each sample.
    pub last_states: Vec<State>,
}

impl BifurcationDiagram {
    /// Total number of retained states across all samples.
    pub fn point_count(&self) -> usize {
        self.orbits.iter().map(Vec::len).sum()
    }

    /// `(params, values)` scatter columns: each parameter value repeated once
    /// per retained state, paired with `component` of that state.
    pub fn flatten(&self, component: Component) -> (Vec<f64>, Vec<f64>) {
        let total = self.point_count();
        let mut params = Vec::with_capacity(total);
        let mut values = Vec::with_capacity(total);
        for (&p, orbit) in self.param_values.iter().zip(&self.orbits) {
            for state in orbit {
                params.push(p);
                values.push(component.of(state));
            }
        }
        (params, values)
    }
}

/// Runs one orbit per sample of `settings.range`, keeping the states after
/// `transient_time` of `total_time` iterations.
pub fn sweep(settings: &BifurcationSettings) -> Result<BifurcationDiagram> {
    let BifurcationSettings {
        initial_state,
        base,
        parameter,
        range,
        total_time,
        transient_time,
    } = *settings;

    if transient_time > total_time {
        return Err(MapError::TransientExceedsTotal {
            transient: transient_time,
            total: total_time,
        });
    }
    let param_values = range.values()?;

    debug!(
        parameter = parameter.name(),
        min = range.min,
        max = range.max,
        count = range.count,
        total_time,
        transient_time,
        "starting bifurcation sweep"
    );

    let retained = total_time - transient_time;
    let mut orbits = Vec::with_capacity(param_values.len());
    let mut last_states = Vec::with_capacity(param_values.len());
    let mut diverged = 0usize;

    for &value in &param_values {
        let kernel = GumowskiMira::new(base.with(parameter, value));
        let mut orbit = Orbit::new(kernel, initial_state);

        let mut last = initial_state;
        for state in orbit.by_ref().take(transient_time) {
            last = state;
        }
        let kept: Vec<State> = orbit.take(retained).collect();
        if let Some(&state) = kept.last() {
            last = state;
        }

        if !last.is_finite() {
            diverged += 1;
            trace!(value, "orbit diverged");
        }
        orbits.push(kept);
        last_states.push(last);
    }

    debug!(
        samples = param_values.len(),
        diverged, "finished bifurcation sweep"
    );

    Ok(BifurcationDiagram {
        parameter,
        param_values,
        orbits,
        last_states,
    })
}
