//! Orbits of the map.
//!
//! The initial state is never part of the output: `generate` applies the map
//! `n_steps` times, yielding `s_1 ..= s_n`, and drops the first `transient`
//! of those.

use crate::error::{MapError, Result};
use crate::kernel::{GumowskiMira, State};
use crate::solvers::DiscreteMap;
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lazy, unbounded sequence of successive states starting after the seed.
pub struct Orbit {
    kernel: GumowskiMira,
    stepper: DiscreteMap<f64>,
    state: [f64; 2],
    iteration: usize,
}

impl Orbit {
    pub fn new(kernel: GumowskiMira, initial_state: State) -> Self {
        Self {
            kernel,
            stepper: DiscreteMap::new(2),
            state: initial_state.to_array(),
            iteration: 0,
        }
    }

    /// Number of map applications performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }
}

impl Iterator for Orbit {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        self.stepper.step(&self.kernel, &mut self.iteration, &mut self.state);
        Some(State::from(self.state))
    }
}

/// Iterates `kernel` from `initial_state` and returns the `n_steps - transient`
/// states that follow the transient.
pub fn generate(
    kernel: &GumowskiMira,
    initial_state: State,
    n_steps: usize,
    transient: usize,
) -> Result<Vec<State>> {
    if transient > n_steps {
        return Err(MapError::TransientExceedsTotal {
            transient,
            total: n_steps,
        });
    }

    let states: Vec<State> = Orbit::new(*kernel, initial_state)
        .take(n_steps)
        .skip(transient)
        .collect();

    debug!(
        n_steps,
        transient,
        retained = states.len(),
        diverged = states.iter().filter(|s| !s.is_finite()).count(),
        "generated orbit"
    );
    Ok(states)
}

/// Column-split orbit, ready for a scatter plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryColumns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl From<&[State]> for TrajectoryColumns {
    fn from(states: &[State]) -> Self {
        Self {
            x: states.iter().map(|s| s.x).collect(),
            y: states.iter().map(|s| s.y).collect(),
        }
    }
}

/// Axis-aligned box enclosing a point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn contains(&self, state: State) -> bool {
        (self.x_min..=self.x_max).contains(&state.x) && (self.y_min..=self.y_max).contains(&state.y)
    }
}

/// Bounds of the finite states only; `None` when no state is finite.
/// Renderers clip diverged orbits to this box.
pub fn finite_bounds(states: &[State]) -> Option<Bounds> {
    let mut finite = states.iter().filter(|s| s.is_finite());
    let first = finite.next()?;
    let init = Bounds {
        x_min: first.x,
        x_max: first.x,
        y_min: first.y,
        y_max: first.y,
    };
    Some(finite.fold(init, |b, s| Bounds {
        x_min: b.x_min.min(s.x),
        x_max: b.x_max.max(s.x),
        y_min: b.y_min.min(s.y),
        y_max: b.y_max.max(s.y),
    }))
}
